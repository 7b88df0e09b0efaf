#![deny(unsafe_code)]
//! CLI binary for the mathviz algorithm engines.
//!
//! Subcommands:
//! - `list`: print available engines
//! - `schema <engine>`: print an engine's parameter schema
//! - `run <engine>`: step an engine N times, print or write the final frame
//! - `replay <preset>`: run a saved preset file

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use mathviz_core::{Engine, EngineError};
use mathviz_engines::snapshot::{read_preset, write_frame};
use mathviz_engines::{advance, EngineKind};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "mathviz", about = "Step-by-step algorithm and math engines")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log engine progress to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List available engines.
    List,
    /// Print an engine's parameter schema.
    Schema {
        /// Engine name (e.g. "dijkstra").
        engine: String,
    },
    /// Run an engine for up to N steps and emit the final frame.
    Run {
        /// Engine name (e.g. "dijkstra").
        engine: String,

        /// Maximum number of steps; finished engines stop early.
        #[arg(short, long, default_value_t = 100)]
        steps: usize,

        /// PRNG seed for graph and sort input.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Engine parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Write the frame to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run a preset file (engine, params, seed, steps).
    Replay {
        /// Path to the preset JSON file.
        preset: PathBuf,

        /// Write the frame to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Prints the frame, or writes it to `output` and reports where it went.
fn emit_frame(
    engine: &EngineKind,
    name: &str,
    steps: usize,
    output: Option<&Path>,
    json_mode: bool,
) -> Result<(), CliError> {
    let frame = engine.frame();
    let Some(path) = output else {
        println!("{}", serde_json::to_string_pretty(&frame)?);
        return Ok(());
    };
    write_frame(&frame, path)?;
    if json_mode {
        let info = json!({
            "engine": name,
            "steps": steps,
            "finished": engine.is_finished(),
            "output": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        eprintln!("ran {name} for {steps} steps -> {}", path.display());
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let engines = EngineKind::list_engines();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&json!({ "engines": engines }))?);
            } else {
                println!("Engines:");
                for name in engines {
                    println!("  {name}");
                }
            }
        }
        Command::Schema { engine } => {
            let eng = EngineKind::from_name(&engine, 0, &json!({}))?;
            let schema = eng.param_schema();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&schema)?);
            } else {
                println!("{engine} parameters:");
                if let Some(fields) = schema.as_object() {
                    for (key, field) in fields {
                        println!(
                            "  {key} ({}, default {}): {}",
                            field["type"].as_str().unwrap_or("?"),
                            field["default"],
                            field["description"].as_str().unwrap_or("")
                        );
                    }
                }
            }
        }
        Command::Run {
            engine,
            steps,
            seed,
            params,
            output,
        } => {
            let params: Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            if !params.is_object() {
                return Err(CliError::Input("--params must be a JSON object".into()));
            }
            let mut eng = EngineKind::from_name(&engine, seed, &params)?;
            let taken = advance(&mut eng, steps)?;
            emit_frame(&eng, &engine, taken, output.as_deref(), cli.json)?;
        }
        Command::Replay { preset, output } => {
            let preset = read_preset(&preset).map_err(|e| match e {
                EngineError::InvalidParam { .. } | EngineError::ParamTypeMismatch { .. } => {
                    CliError::Input(e.to_string())
                }
                other => CliError::from(other),
            })?;
            let eng = EngineKind::from_preset(&preset)?;
            emit_frame(&eng, &preset.engine, preset.steps, output.as_deref(), cli.json)?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
