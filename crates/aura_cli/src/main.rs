//! Aura CLI
//!
//! Replays recorded pointer traces through the gesture widgets on a virtual
//! frame clock, and validates aura.toml widget configuration.

mod config;
mod replay;
mod trace;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::AuraConfig;
use crate::replay::WidgetKind;
use crate::trace::Trace;

#[derive(Parser, Debug)]
#[command(name = "aura")]
#[command(about = "Replay gesture traces through Aura widgets")]
#[command(version)]
struct Cli {
    /// Log controller decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a pointer trace and print frames and commits
    Replay {
        /// Trace file (JSON)
        trace: PathBuf,

        /// Widget to drive
        #[arg(short, long, value_enum)]
        widget: WidgetKind,

        /// Widget configuration (aura.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Frames per second of the virtual clock
        #[arg(long, default_value_t = 60)]
        fps: u32,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate an aura.toml
    CheckConfig {
        path: PathBuf,

        /// Print the configuration with defaults filled in
        #[arg(long)]
        print: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    match cli.command {
        Commands::Replay {
            trace,
            widget,
            config,
            fps,
            json,
        } => cmd_replay(trace, widget, config, fps, json),
        Commands::CheckConfig { path, print } => cmd_check_config(path, print),
    }
}

fn cmd_replay(
    trace_path: PathBuf,
    widget: WidgetKind,
    config_path: Option<PathBuf>,
    fps: u32,
    json: bool,
) -> Result<()> {
    let config = match config_path {
        Some(path) => AuraConfig::load(&path)?,
        None => AuraConfig::default(),
    };
    let trace = Trace::load(&trace_path)?;
    tracing::info!(
        events = trace.events.len(),
        ?widget,
        fps,
        "replaying {}",
        trace_path.display()
    );

    let report = replay::run(widget, &config, &trace, fps)?;
    if json {
        let text = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{text}");
    } else {
        print!("{}", replay::render_text(&report));
    }
    Ok(())
}

fn cmd_check_config(path: PathBuf, print: bool) -> Result<()> {
    let config = AuraConfig::load(&path)?;
    if print {
        print!("{}", config.to_toml()?);
    } else {
        println!("{}: ok", path.display());
    }
    Ok(())
}
