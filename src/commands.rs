// commands.rs
// Viewer commands and the line-oriented script format used to drive them headlessly

use crate::charge::Polarity;
use crate::config::TraceParameters;
use crate::error::SceneError;
use crate::geometry::Viewport;
use crate::viewer::RenderMode;
use std::str::FromStr;

/// A single edited tracing parameter, as typed into an options panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParameterEdit {
    Step(f32),
    DrawLimit(i32),
    Scale(i32),
    DynamicScaleFactor(f32),
    UseDynamicScale(bool),
    ChargeDrawRadius(f32),
    TestChargeMagnitude(f32),
    VectorFieldSeparation(f32),
}

impl ParameterEdit {
    pub fn apply(&self, params: &mut TraceParameters) {
        match *self {
            ParameterEdit::Step(v) => params.step = v,
            ParameterEdit::DrawLimit(v) => params.draw_limit = v,
            ParameterEdit::Scale(v) => params.scale = v,
            ParameterEdit::DynamicScaleFactor(v) => params.dynamic_scale_factor = v,
            ParameterEdit::UseDynamicScale(v) => params.use_dynamic_scale = v,
            ParameterEdit::ChargeDrawRadius(v) => params.charge_draw_radius = v,
            ParameterEdit::TestChargeMagnitude(v) => params.test_charge_magnitude = v,
            ParameterEdit::VectorFieldSeparation(v) => params.vector_field_separation = v,
        }
    }

    fn parse(key: &str, value: &str) -> Result<Self, String> {
        fn num<T: FromStr>(key: &str, value: &str) -> Result<T, String> {
            value
                .parse::<T>()
                .map_err(|_| format!("'{}' is not a valid value for {}", value, key))
        }
        match key {
            "step" => Ok(ParameterEdit::Step(num(key, value)?)),
            "draw_limit" => Ok(ParameterEdit::DrawLimit(num(key, value)?)),
            "scale" => Ok(ParameterEdit::Scale(num(key, value)?)),
            "dynamic_scale_factor" => Ok(ParameterEdit::DynamicScaleFactor(num(key, value)?)),
            "use_dynamic_scale" => Ok(ParameterEdit::UseDynamicScale(num(key, value)?)),
            "charge_draw_radius" => Ok(ParameterEdit::ChargeDrawRadius(num(key, value)?)),
            "test_charge_magnitude" => Ok(ParameterEdit::TestChargeMagnitude(num(key, value)?)),
            "vector_field_separation" => Ok(ParameterEdit::VectorFieldSeparation(num(key, value)?)),
            _ => Err(format!("unknown parameter '{}'", key)),
        }
    }
}

// Viewer commands
// These mirror the UI events of the interactive viewer
#[derive(Clone, Debug, PartialEq)]
pub enum ViewerCommand {
    /// Left click places a positive charge, right click a negative one.
    PlaceCharge { x: f32, y: f32, polarity: Polarity },
    ClearAll,
    SetParameters(TraceParameters),
    Edit(ParameterEdit),
    SetPlacedCharge(f32),
    SetMode(RenderMode),
    SetTraceFrom(Polarity),
    SetViewport(Viewport),
    Probe { x: f32, y: f32 },
    Refresh,
}

fn parse_polarity(token: &str) -> Result<Polarity, String> {
    match token {
        "+" | "positive" | "left" => Ok(Polarity::Positive),
        "-" | "negative" | "right" => Ok(Polarity::Negative),
        _ => Err(format!("expected + or -, got '{}'", token)),
    }
}

fn parse_f32(token: &str) -> Result<f32, String> {
    token
        .parse::<f32>()
        .map_err(|_| format!("'{}' is not a number", token))
}

fn expect_args<'a>(args: &'a [&'a str], n: usize, usage: &str) -> Result<&'a [&'a str], String> {
    if args.len() == n {
        Ok(args)
    } else {
        Err(format!("usage: {}", usage))
    }
}

/// Parse one script line. Blank lines and `#` comments give `Ok(None)`.
///
/// ```text
/// place + 120 80      # left click
/// place - 300 80      # right click
/// charge 2.5
/// set step 5
/// mode grid
/// from -
/// viewport 0 0 500 400
/// probe 200 200
/// refresh
/// clear
/// ```
pub fn parse_command(line: &str) -> Result<Option<ViewerCommand>, String> {
    let line = line.split('#').next().unwrap_or("").trim();
    if line.is_empty() {
        return Ok(None);
    }
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (name, args) = (tokens[0], &tokens[1..]);

    let cmd = match name {
        "place" => {
            let a = expect_args(args, 3, "place <+|-> <x> <y>")?;
            ViewerCommand::PlaceCharge {
                polarity: parse_polarity(a[0])?,
                x: parse_f32(a[1])?,
                y: parse_f32(a[2])?,
            }
        }
        "clear" => ViewerCommand::ClearAll,
        "refresh" => ViewerCommand::Refresh,
        "charge" => {
            let a = expect_args(args, 1, "charge <magnitude>")?;
            ViewerCommand::SetPlacedCharge(parse_f32(a[0])?)
        }
        "set" => {
            let a = expect_args(args, 2, "set <parameter> <value>")?;
            ViewerCommand::Edit(ParameterEdit::parse(a[0], a[1])?)
        }
        "mode" => {
            let a = expect_args(args, 1, "mode <lines|grid>")?;
            match a[0] {
                "lines" => ViewerCommand::SetMode(RenderMode::FieldLines),
                "grid" => ViewerCommand::SetMode(RenderMode::VectorGrid),
                other => return Err(format!("unknown mode '{}'", other)),
            }
        }
        "from" => {
            let a = expect_args(args, 1, "from <+|->")?;
            ViewerCommand::SetTraceFrom(parse_polarity(a[0])?)
        }
        "viewport" => {
            let a = expect_args(args, 4, "viewport <x_min> <y_min> <x_max> <y_max>")?;
            ViewerCommand::SetViewport(Viewport::new(
                parse_f32(a[0])?,
                parse_f32(a[1])?,
                parse_f32(a[2])?,
                parse_f32(a[3])?,
            ))
        }
        "probe" => {
            let a = expect_args(args, 2, "probe <x> <y>")?;
            ViewerCommand::Probe {
                x: parse_f32(a[0])?,
                y: parse_f32(a[1])?,
            }
        }
        other => return Err(format!("unknown command '{}'", other)),
    };
    Ok(Some(cmd))
}

/// Parse a whole script, reporting the first bad line.
pub fn parse_script(text: &str) -> Result<Vec<ViewerCommand>, SceneError> {
    let mut commands = Vec::new();
    for (i, line) in text.lines().enumerate() {
        match parse_command(line) {
            Ok(Some(cmd)) => commands.push(cmd),
            Ok(None) => {}
            Err(message) => return Err(SceneError::Script { line: i + 1, message }),
        }
    }
    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_placements_with_either_sign() {
        assert_eq!(
            parse_command("place + 10 20.5").unwrap(),
            Some(ViewerCommand::PlaceCharge { x: 10.0, y: 20.5, polarity: Polarity::Positive })
        );
        assert_eq!(
            parse_command("  place right 1 2 # trailing comment").unwrap(),
            Some(ViewerCommand::PlaceCharge { x: 1.0, y: 2.0, polarity: Polarity::Negative })
        );
    }

    #[test]
    fn skips_blank_lines_and_comments() {
        assert_eq!(parse_command("").unwrap(), None);
        assert_eq!(parse_command("   # just a note").unwrap(), None);
    }

    #[test]
    fn parameter_edits_apply_to_params() {
        let mut params = TraceParameters::default();
        for line in ["set step 2.5", "set draw_limit 42", "set use_dynamic_scale true"] {
            match parse_command(line).unwrap() {
                Some(ViewerCommand::Edit(edit)) => edit.apply(&mut params),
                other => panic!("unexpected parse of '{}': {:?}", line, other),
            }
        }
        assert_eq!(params.step, 2.5);
        assert_eq!(params.draw_limit, 42);
        assert!(params.use_dynamic_scale);
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_command("place + 10").is_err());
        assert!(parse_command("place * 10 10").is_err());
        assert!(parse_command("set draw_limit ten").is_err());
        assert!(parse_command("set colour red").is_err());
        assert!(parse_command("mode spiral").is_err());
        assert!(parse_command("explode").is_err());
    }

    #[test]
    fn script_errors_report_line_numbers() {
        let script = "place + 1 1\n\nmode grid\nprobe 1\n";
        match parse_script(script) {
            Err(SceneError::Script { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected script error, got {:?}", other),
        }

        let ok = parse_script("clear\nviewport 0 0 10 10\nrefresh\nfrom -\n").unwrap();
        assert_eq!(ok.len(), 4);
        assert_eq!(ok[3], ViewerCommand::SetTraceFrom(Polarity::Negative));
    }
}
