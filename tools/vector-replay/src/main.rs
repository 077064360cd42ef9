//! Vector Replay - headless replay of display-list scripts.
//!
//! Feeds a script of clears, segments and clip rectangles through a
//! `VectorDisplay` and prints what each frame would hand the rasterizer.

mod output;
mod script;

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use vector_crt::{PrimitiveList, VectorConfig, VectorDisplay, VisibleArea};

use output::{format_frame, OutputMode};
use script::Command;

#[derive(Parser)]
#[command(
    name = "vector-replay",
    about = "Replay a vector display-list script and print the rendered primitives"
)]
struct Args {
    /// Script file to replay
    script: PathBuf,

    /// JSON display configuration; missing fields use the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Visible area width in pixels
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Visible area height in pixels
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Override the flicker percentage
    #[arg(short, long)]
    flicker: Option<f32>,

    /// Override the beam width
    #[arg(short, long)]
    beam: Option<f32>,

    /// Seed for the flicker jitter; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print one summary line per frame instead of every primitive
    #[arg(long)]
    summary: bool,
}

fn load_config(path: Option<&Path>) -> Result<VectorConfig, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(VectorConfig::default());
    };
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    let config: VectorConfig = serde_json::from_str(&text)
        .map_err(|e| format!("invalid config {}: {}", path.display(), e))?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let source = fs::read_to_string(&args.script)
        .map_err(|e| format!("failed to read {}: {}", args.script.display(), e))?;
    let commands = script::parse(&source)?;
    log::debug!("Parsed {} commands", commands.len());

    let mut config = load_config(args.config.as_deref())?;
    if let Some(flicker) = args.flicker {
        config = config.with_flicker(flicker);
    }
    if let Some(beam) = args.beam {
        config = config.with_beam_width(beam);
    }

    let mut display = match args.seed {
        Some(seed) => VectorDisplay::seeded(config, seed)?,
        None => VectorDisplay::new(config)?,
    };
    let area = VisibleArea::with_size(args.width, args.height)?;
    let mode = if args.summary {
        OutputMode::Summary
    } else {
        OutputMode::Primitives
    };

    let mut sink = PrimitiveList::new();
    let mut frames = 0;
    let mut pending = false;
    for command in commands {
        match command {
            Command::Clear => {
                display.clear();
                pending = true;
            }
            Command::Segment {
                end,
                color,
                intensity,
            } => {
                display.append_segment(end.x, end.y, color, intensity);
                pending = true;
            }
            Command::Clip { from, to } => {
                display.append_clip(from.x, from.y, to.x, to.y);
                pending = true;
            }
            Command::Frame => {
                let summary = display.render(&area, &mut sink);
                print!("{}", format_frame(frames, &summary, sink.primitives(), mode));
                frames += 1;
                pending = false;
            }
        }
    }

    // A script without a closing `frame` still shows what it drew
    if pending {
        let summary = display.render(&area, &mut sink);
        print!("{}", format_frame(frames, &summary, sink.primitives(), mode));
        frames += 1;
    }

    if display.display_list().overflow_count() > 0 {
        log::warn!(
            "Display list overflowed {} times since the last clear",
            display.display_list().overflow_count()
        );
    }
    log::info!("Replayed {} frames", frames);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
