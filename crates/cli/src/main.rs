#![deny(unsafe_code)]
//! CLI binary for the fx-engine animation system.
//!
//! Subcommands:
//! - `render <effect>` — simulate an effect for N frames, write a PNG
//! - `list` — print available effects

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use fx_engine_core::take::{Take, DEFAULT_FRAME_MS};
use fx_engine_core::Effect;
use fx_engine_effects::EffectKind;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "fx-engine", about = "Frame-driven visual effect CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate an effect for N frames and write a PNG snapshot.
    Render {
        /// Effect name (e.g. "blackhole").
        effect: String,

        /// Surface width in pixels.
        #[arg(short = 'W', long, default_value_t = 800)]
        width: usize,

        /// Surface height in pixels.
        #[arg(short = 'H', long, default_value_t = 600)]
        height: usize,

        /// Number of simulated frames.
        #[arg(short, long, default_value_t = 600)]
        frames: usize,

        /// Milliseconds of simulated time between frames.
        #[arg(long, default_value_t = DEFAULT_FRAME_MS)]
        frame_ms: f64,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Fire a named trigger during the run (e.g. "activate").
        #[arg(short, long)]
        trigger: Option<String>,

        /// Elapsed milliseconds at which the trigger fires.
        #[arg(long, default_value_t = 0.0)]
        trigger_at: f64,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,

        /// Effect parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// List available effects.
    List,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let effects = EffectKind::list_effects();
            if cli.json {
                let info = serde_json::json!({ "effects": effects });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Effects:");
                for name in effects {
                    println!("  {name}");
                }
            }
        }
        Command::Render {
            effect,
            width,
            height,
            frames,
            frame_ms,
            seed,
            trigger,
            trigger_at,
            output,
            params,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;

            let mut take = Take::new(&effect, width, height, seed);
            take.params = params;
            take.frames = frames;
            take.frame_ms = frame_ms;
            take.validate()?;

            let mut fx =
                EffectKind::from_name(&take.effect, take.width, take.height, take.seed, &take.params)?;

            let mut pending_trigger = trigger;
            for frame in 0..take.frames {
                let elapsed = take.elapsed_at(frame);
                if let Some(name) = pending_trigger.as_deref() {
                    if elapsed >= trigger_at {
                        if !fx.trigger(name) {
                            return Err(CliError::Input(format!(
                                "effect '{}' has no trigger '{name}'",
                                take.effect
                            )));
                        }
                        pending_trigger = None;
                    }
                }
                fx.advance(elapsed)?;
            }

            fx_engine_effects::snapshot::write_png(fx.surface(), &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "effect": take.effect,
                    "width": take.width,
                    "height": take.height,
                    "frames": take.frames,
                    "frame_ms": take.frame_ms,
                    "seed": take.seed,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} ({}x{}, {} frames, seed {}) -> {}",
                    take.effect,
                    take.width,
                    take.height,
                    take.frames,
                    take.seed,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
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
