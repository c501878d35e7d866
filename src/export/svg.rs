use super::write_atomic;
use crate::charge::Polarity;
use crate::error::ExportError;
use crate::geometry::{Segment, Viewport};
use crate::viewer::{ChargeMarker, Frame};
use palette::{Hsluv, IntoColor, Srgba};
use std::fmt::Write as _;
use std::path::Path;
use ultraviolet::Vec2;

/// Maps scene coordinates to SVG pixels. Both use a downward y axis.
#[derive(Clone, Copy, Debug)]
struct PixelMap {
    origin: Vec2,
    scale: f32,
}

impl PixelMap {
    fn new(viewport: &Viewport, width_px: u32) -> Self {
        let scale = if viewport.width() > 0.0 {
            width_px as f32 / viewport.width()
        } else {
            1.0
        };
        Self { origin: Vec2::new(viewport.x_min, viewport.y_min), scale }
    }

    fn map(&self, p: Vec2) -> Vec2 {
        (p - self.origin) * self.scale
    }
}

fn hsluv_hex(h: f32, s: f32, l: f32) -> String {
    let rgba: Srgba = Hsluv::new(h, s, l).into_color();
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", channel(rgba.red), channel(rgba.green), channel(rgba.blue))
}

fn polarity_color(polarity: Option<Polarity>) -> String {
    match polarity {
        Some(Polarity::Positive) => hsluv_hex(12.0, 90.0, 50.0),
        Some(Polarity::Negative) => hsluv_hex(250.0, 90.0, 45.0),
        None => hsluv_hex(0.0, 0.0, 55.0),
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn push_segment(svg: &mut String, map: &PixelMap, seg: &Segment, color: &str, width: f32) {
    if !seg.is_finite() {
        return;
    }
    let (a, b) = (map.map(seg.start), map.map(seg.end));
    let _ = writeln!(
        svg,
        "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"{}\"/>",
        a.x, a.y, b.x, b.y, color, width
    );
}

fn push_marker(svg: &mut String, map: &PixelMap, marker: &ChargeMarker) {
    let c = map.map(marker.center);
    let color = polarity_color(marker.polarity);
    let _ = writeln!(
        svg,
        "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"{:.1}\" fill=\"white\" stroke=\"{}\" stroke-width=\"2\"/>",
        c.x,
        c.y,
        marker.radius * map.scale,
        color
    );
    let _ = writeln!(
        svg,
        "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"middle\" dominant-baseline=\"central\" fill=\"{}\">{}</text>",
        c.x,
        c.y,
        color,
        escape_text(&marker.label)
    );
}

/// Render a frame as a standalone SVG document `width_px` wide. The height
/// follows the viewport aspect ratio.
pub fn render_svg(frame: &Frame, viewport: &Viewport, width_px: u32) -> String {
    let map = PixelMap::new(viewport, width_px);
    let height_px = (viewport.height().max(0.0) * map.scale).round() as u32;

    let mut svg = format!(
        "<svg width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" xmlns=\"http://www.w3.org/2000/svg\">\n\
         <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n",
        w = width_px,
        h = height_px
    );

    for line in &frame.lines {
        let color = polarity_color(Some(line.polarity));
        let points: Vec<String> = line
            .points()
            .filter(|p| p.x.is_finite() && p.y.is_finite())
            .map(|p| {
                let q = map.map(p);
                format!("{:.1},{:.1}", q.x, q.y)
            })
            .collect();
        if points.len() < 2 {
            continue;
        }
        let _ = writeln!(
            svg,
            "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1\"/>",
            points.join(" "),
            color
        );
    }

    let vector_color = hsluv_hex(0.0, 0.0, 35.0);
    for seg in &frame.vectors {
        push_segment(&mut svg, &map, seg, &vector_color, 1.0);
    }

    let probe_color = hsluv_hex(130.0, 90.0, 55.0);
    for seg in &frame.probes {
        push_segment(&mut svg, &map, seg, &probe_color, 2.0);
    }

    for marker in &frame.markers {
        push_marker(&mut svg, &map, marker);
    }

    svg.push_str("</svg>\n");
    svg
}

pub fn write_svg<P: AsRef<Path>>(
    frame: &Frame,
    viewport: &Viewport,
    width_px: u32,
    path: P,
) -> Result<(), ExportError> {
    let svg = render_svg(frame, viewport, width_px);
    write_atomic(path.as_ref(), |writer| {
        use std::io::Write;
        writer.write_all(svg.as_bytes())
    })
}
