//! # valtypes CLI entry point
//!
//! Parses command-line arguments, resolves configuration and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use valtypes_cli::check::{run_check, CheckArgs};
use valtypes_cli::config::{CliConfig, Settings};
use valtypes_cli::inspect::{run_inspect, InspectArgs};
use valtypes_cli::now::{run_now, NowArgs};
use valtypes_cli::shift::{run_shift, ShiftArgs};
use valtypes_cli::weekday::{run_weekday, WeekdayArgs};

/// Validate, inspect and shift calendar dates and UTC datetimes.
#[derive(Parser, Debug)]
#[command(name = "valtypes", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Zone offset (±HH:MM) for today-style values. Overrides the config.
    #[arg(long, global = true, allow_hyphen_values = true)]
    zone: Option<String>,

    /// Pin the clock to a canonical datetime. Overrides the config.
    #[arg(long, global = true)]
    now: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a value; exits 1 when it is invalid.
    Check(CheckArgs),

    /// Print the derived fields of a value as JSON.
    Inspect(InspectArgs),

    /// Apply adjustments to a value in order.
    Shift(ShiftArgs),

    /// Print a clock-derived value.
    Now(NowArgs),

    /// Resolve a weekday relative to today.
    Weekday(WeekdayArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("valtypes CLI v{} starting", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let settings = load_settings(&cli)?;
    match &cli.command {
        Commands::Check(args) => run_check(args),
        Commands::Inspect(args) => run_inspect(args),
        Commands::Shift(args) => run_shift(args),
        Commands::Now(args) => run_now(args, &settings),
        Commands::Weekday(args) => run_weekday(args, &settings),
    }
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let file = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    file.with_overrides(cli.zone.clone(), cli.now.clone()).resolve()
}
