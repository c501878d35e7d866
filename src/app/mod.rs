use crate::commands::parse_script;
use crate::error::SceneError;
use crate::export;
use crate::init_config::{SceneConfig, DEFAULT_SCENE_FILE};
use crate::scene::{build_viewer, load_scene};
use crate::viewer::{Frame, RenderMode, Viewer};
use std::error::Error;
use std::path::{Path, PathBuf};

pub mod command_loop;


/// Command line options for the headless driver.
#[derive(Debug, Default, PartialEq)]
pub struct RunOptions {
    pub scene: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub svg: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub width: Option<u32>,
    pub grid: bool,
    pub parallel: bool,
    pub help: bool,
}

impl RunOptions {
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut opts = RunOptions::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let mut value = |flag: &str| {
                iter.next()
                    .cloned()
                    .ok_or_else(|| format!("{} needs a value", flag))
            };
            match arg.as_str() {
                "--script" => opts.script = Some(value(arg)?.into()),
                "--svg" => opts.svg = Some(value(arg)?.into()),
                "--json" => opts.json = Some(value(arg)?.into()),
                "--csv" => opts.csv = Some(value(arg)?.into()),
                "--width" => {
                    let raw = value(arg)?;
                    let width = raw
                        .parse::<u32>()
                        .ok()
                        .filter(|&w| w > 0)
                        .ok_or_else(|| format!("invalid width '{}'", raw))?;
                    opts.width = Some(width);
                }
                "--grid" => opts.grid = true,
                "--parallel" => opts.parallel = true,
                "-h" | "--help" => opts.help = true,
                flag if flag.starts_with("--") => return Err(format!("unknown option {}", flag)),
                path => {
                    if opts.scene.is_some() {
                        return Err(format!("unexpected argument '{}'", path));
                    }
                    opts.scene = Some(path.into());
                }
            }
        }
        Ok(opts)
    }
}

pub fn print_usage() {
    println!("Usage: field_viewer [scene.toml] [options]");
    println!();
    println!("Without a scene argument, {} is used when present.", DEFAULT_SCENE_FILE);
    println!();
    println!("Options:");
    println!("  --script <file>   apply viewer commands from a script");
    println!("  --svg <file>      write the frame as SVG");
    println!("  --json <file>     write the frame as JSON");
    println!("  --csv <file>      write every segment as CSV");
    println!("  --width <px>      SVG width in pixels (default: canvas width)");
    println!("  --grid            draw the vector grid instead of field lines");
    println!("  --parallel        trace on the rayon thread pool");
}

fn initial_viewer(scene: Option<&Path>) -> Result<Viewer, SceneError> {
    match scene {
        Some(path) => load_scene(path),
        None if Path::new(DEFAULT_SCENE_FILE).exists() => load_scene(DEFAULT_SCENE_FILE),
        None => {
            log::info!("no scene given, starting empty");
            Ok(build_viewer(&SceneConfig::default()))
        }
    }
}

/// Load, apply the script and command line overrides, and compute the frame.
pub fn prepare(opts: &RunOptions) -> Result<(Viewer, Frame), Box<dyn Error>> {
    let mut viewer = initial_viewer(opts.scene.as_deref())?;

    if let Some(path) = &opts.script {
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.clone(),
            source,
        })?;
        let commands = parse_script(&text)?;
        let redraws = command_loop::handle_commands(commands, &mut viewer);
        log::debug!("script {} requested {} redraws", path.display(), redraws);
    }

    if opts.grid {
        viewer.settings.mode = RenderMode::VectorGrid;
    }
    if opts.parallel {
        viewer.settings.parallel = true;
    }

    let frame = viewer.frame();
    Ok((viewer, frame))
}

fn print_summary(viewer: &Viewer, frame: &Frame) {
    println!("charges:  {} (net {})", viewer.charges.len(), viewer.charges.net_charge());
    match viewer.settings.mode {
        RenderMode::FieldLines => {
            let sinks = frame.lines.iter().filter(|l| l.reached_sink()).count();
            println!("lines:    {}", frame.lines.len());
            println!("  reached a sink: {}", sinks);
            println!("  other:          {}", frame.lines.len() - sinks);
        }
        RenderMode::VectorGrid => println!("vectors:  {}", frame.vectors.len()),
    }
    if !frame.probes.is_empty() {
        println!("probes:   {}", frame.probes.len());
    }
    println!("segments: {}", frame.segment_count());
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let _ = env_logger::try_init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = RunOptions::parse(&args)?;
    if opts.help {
        print_usage();
        return Ok(());
    }

    let (viewer, frame) = prepare(&opts)?;
    print_summary(&viewer, &frame);

    let viewport = viewer.settings.viewport;
    if let Some(path) = &opts.svg {
        let width = opts.width.unwrap_or(crate::config::CANVAS_WIDTH as u32);
        export::write_svg(&frame, &viewport, width, path)?;
        println!("wrote {}", path.display());
    }
    if let Some(path) = &opts.json {
        export::write_frame(&frame, path)?;
        println!("wrote {}", path.display());
    }
    if let Some(path) = &opts.csv {
        export::write_segments(&frame, path)?;
        println!("wrote {}", path.display());
    }

    #[cfg(feature = "profiling")]
    crate::PROFILER.lock().log_and_clear();

    Ok(())
}
