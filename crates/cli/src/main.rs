#![deny(unsafe_code)]
//! CLI binary for the surface-stream demo engine.
//!
//! Subcommands:
//! - `list`: print available patterns and the config schema
//! - `generate <pattern>`: sample one frame and print it
//! - `snapshot <pattern>`: write one frame's intensities as a PNG
//! - `animate <pattern>`: run the surface animator for N frames
//! - `stream`: run the stream driver for N ticks

mod error;
mod sinks;

use clap::{Parser, Subcommand, ValueEnum};
use error::CliError;
use sinks::{JsonLinesSurface, TextSeries};
use std::io;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use surface_stream_core::config::DemoConfig;
use surface_stream_core::generator::generate;
use surface_stream_core::sink::{negotiate, Capabilities, HeatmapSink, SurfaceSink};
use surface_stream_core::{Pattern, SurfaceError};
use surface_stream_drivers::{Driver, StreamDriver, SurfaceAnimator};
use surface_stream_render::heatmap::PngHeatmapSink;
use surface_stream_render::snapshot::write_png;

#[derive(Parser)]
#[command(name = "surface-stream", about = "Procedural surface and stream demo CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Base configuration as a JSON string; flags override its keys.
    #[arg(long, global = true, default_value = "{}")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum FieldKind {
    Heights,
    Intensities,
}

#[derive(Subcommand)]
enum Command {
    /// List available patterns and configuration keys.
    List,
    /// Generate one frame and print a summary (or the full frame with --json).
    Generate {
        /// Pattern name (dataset, wave, gaussian, saddle, ripple).
        pattern: String,

        /// Grid cells per side.
        #[arg(short, long)]
        resolution: Option<usize>,

        /// Animation tick.
        #[arg(short, long, default_value_t = 0)]
        time: u64,
    },
    /// Write one frame's field as a grayscale PNG.
    Snapshot {
        pattern: String,

        #[arg(short, long)]
        resolution: Option<usize>,

        #[arg(short, long, default_value_t = 0)]
        time: u64,

        /// Which field to render.
        #[arg(short, long, value_enum, default_value = "intensities")]
        field: FieldKind,

        /// Output file path.
        #[arg(short, long, default_value = "surface.png")]
        output: PathBuf,
    },
    /// Run the surface animator for a number of frames.
    ///
    /// Frames go to stdout as JSON lines, or to numbered PNG heatmaps when
    /// --out-dir is given (the no-3D fallback).
    Animate {
        pattern: String,

        #[arg(short, long)]
        resolution: Option<usize>,

        /// Number of frames to render.
        #[arg(short, long, default_value_t = 60)]
        frames: usize,

        /// Directory for PNG heatmap frames.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Run the stream driver for a number of ticks on a simulated clock.
    Stream {
        /// Number of points to append.
        #[arg(short, long, default_value_t = 100)]
        ticks: u64,

        /// Noise seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Milliseconds between points.
        #[arg(long)]
        period_ms: Option<u64>,
    },
}

fn base_config(raw: &str) -> Result<DemoConfig, CliError> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| CliError::Input(format!("invalid --config JSON: {e}")))?;
    Ok(DemoConfig::from_json(&value)?)
}

fn surface_config(
    base: DemoConfig,
    pattern: &str,
    resolution: Option<usize>,
) -> Result<DemoConfig, CliError> {
    let config = DemoConfig {
        pattern: pattern.parse()?,
        resolution: resolution.unwrap_or(base.resolution),
        ..base
    };
    config.validate()?;
    Ok(config)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let base = base_config(&cli.config)?;
    match cli.command {
        Command::List => {
            let patterns = Pattern::names();
            if cli.json {
                let info = serde_json::json!({
                    "patterns": patterns,
                    "config": DemoConfig::param_schema(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Patterns:");
                for name in patterns {
                    println!("  {name}");
                }
                println!("Config keys:");
                if let Some(schema) = DemoConfig::param_schema().as_object() {
                    for (key, spec) in schema {
                        println!("  {key} (default {})", spec["default"]);
                    }
                }
            }
        }
        Command::Generate {
            pattern,
            resolution,
            time,
        } => {
            let config = surface_config(base, &pattern, resolution)?;
            let frame = generate(config.pattern, config.resolution, time)?;
            let (min, max) = frame.heights.min_max();
            if cli.json {
                let info = serde_json::json!({
                    "pattern": config.pattern,
                    "resolution": frame.resolution,
                    "time": time,
                    "min": min,
                    "max": max,
                    "points": frame.points,
                    "heights": frame.heights.to_columns(),
                    "intensities": frame.intensities.to_columns(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!(
                    "{} {}x{} at t={time}: height range [{min:.5}, {max:.5}], corner {:.5}",
                    config.pattern,
                    frame.resolution,
                    frame.resolution,
                    frame.heights.get(0, 0)
                );
            }
        }
        Command::Snapshot {
            pattern,
            resolution,
            time,
            field,
            output,
        } => {
            let config = surface_config(base, &pattern, resolution)?;
            let frame = generate(config.pattern, config.resolution, time)?;
            let data = match field {
                FieldKind::Heights => &frame.heights,
                FieldKind::Intensities => &frame.intensities,
            };
            write_png(data, &output)?;
            if cli.json {
                let info = serde_json::json!({
                    "pattern": config.pattern,
                    "resolution": config.resolution,
                    "time": time,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} ({}x{}, t={time}) -> {}",
                    config.pattern,
                    config.resolution,
                    config.resolution,
                    output.display()
                );
            }
        }
        Command::Animate {
            pattern,
            resolution,
            frames,
            out_dir,
        } => {
            let config = surface_config(base, &pattern, resolution)?;
            let caps = Capabilities {
                surface_3d: out_dir.is_none(),
            };
            let heatmap_dir = out_dir.clone();
            let target = negotiate(
                caps,
                || Ok(Box::new(JsonLinesSurface::new(io::stdout())) as Box<dyn SurfaceSink>),
                move || {
                    let dir = heatmap_dir.ok_or_else(|| {
                        SurfaceError::InvalidConfig("heatmap output needs --out-dir".into())
                    })?;
                    Ok(Box::new(PngHeatmapSink::new(dir)?) as Box<dyn HeatmapSink>)
                },
            )?;
            let mut animator = SurfaceAnimator::from_config(&config, target)?;
            animator.play(Duration::ZERO);
            let rendered: usize = (0..frames).map(|_| animator.poll(Duration::ZERO)).sum();
            animator.pause();
            log::info!(
                "animated {rendered} frames, {} rejected",
                animator.rejected_frames()
            );
            if let Some(dir) = out_dir {
                eprintln!("wrote {rendered} heatmap frames -> {}", dir.display());
            }
        }
        Command::Stream {
            ticks,
            seed,
            period_ms,
        } => {
            let config = DemoConfig {
                seed: seed.unwrap_or(base.seed),
                stream_period_ms: period_ms.unwrap_or(base.stream_period_ms),
                ..base
            };
            let sink = TextSeries::new(io::stdout(), cli.json);
            let mut driver = StreamDriver::new(sink, &config)?;
            let mut now = Duration::ZERO;
            driver.play(now);
            let mut fired = 0;
            for _ in 0..ticks {
                now += driver.period();
                fired += driver.advance(now);
            }
            driver.pause();
            log::info!("streamed {fired} points");
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
