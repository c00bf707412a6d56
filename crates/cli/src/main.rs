//! twinjetctl - Twin-engine EICAS trainer CLI
//!
//! Runs scripted training scenarios headlessly, records flight logs and
//! inspects the fault catalogue and session configuration.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::RunArgs;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "twinjetctl")]
#[command(about = "Twin-engine EICAS trainer - run scenarios and inspect alerting")]
#[command(version)]
#[command(long_about = "
twinjetctl drives the twin-engine powerplant simulator and its crew alerting
system without a display. Scenarios script crew commands and instructor fault
injections against simulated time; the run prints every alert raised, every
alert cleared and every automatic shutdown.

Use --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario headlessly and print the alert timeline
    Run(RunArgs),

    /// List fault conditions with band, criticality and crew message
    Faults {
        /// Show a single fault code
        code: Option<String>,
    },

    /// Print the session configuration as YAML
    Config {
        /// Configuration file to validate and show (defaults otherwise)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Check a scenario file without running it
    Validate {
        /// Scenario file
        scenario: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            ExitCode::from(e.downcast_ref::<CliError>().map_or(1, CliError::exit_code))
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Run(args) => commands::run::execute(args, cli.json),
        Commands::Faults { code } => commands::faults::execute(code.as_deref(), cli.json),
        Commands::Config { path } => commands::config::execute(path.as_deref(), cli.json),
        Commands::Validate { scenario } => commands::validate::execute(scenario, cli.json),
    }
}
