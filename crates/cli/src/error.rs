//! Error types for twinjetctl CLI

use thiserror::Error;
use twinjet_session::SessionError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Unknown fault code: {0}")]
    UnknownFault(String),

    #[error("Automatic shutdown triggered {0} time(s)")]
    AutoShutdown(usize),

    #[error("Run failed: {0}")]
    Run(SessionError),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::InvalidConfiguration(_) => 2,
            CliError::InvalidScenario(_) => 3,
            CliError::UnknownFault(_) => 4,
            CliError::AutoShutdown(_) => 5,
            CliError::Run(_) => 1,
        }
    }
}
