//! Command implementations for twinjetctl CLI

pub mod config;
pub mod faults;
pub mod run;
pub mod validate;

use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Scenario file (.yaml, .yml or .json)
    #[arg(short, long)]
    pub scenario: PathBuf,

    /// Session configuration file
    #[arg(short, long, env = "TWINJET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the flight log to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Seed for the steady-state noise (overrides the config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable automatic shutdown on critical alerts
    #[arg(long)]
    pub no_protection: bool,

    /// Pace the run against the wall clock instead of running flat out
    #[arg(long)]
    pub realtime: bool,

    /// Exit with an error if an automatic shutdown occurred
    #[arg(long)]
    pub strict: bool,
}
