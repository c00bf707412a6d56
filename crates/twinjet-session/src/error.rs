//! Error types for sessions, scenarios and configuration files.

use std::path::PathBuf;

use thiserror::Error;
use twinjet_eicas::EicasError;
use twinjet_faults::ParseFaultError;
use twinjet_sim::SimError;
use twinjet_timing::TimingError;

/// Session setup and I/O errors.
///
/// Nothing that happens inside a running simulation is an error; these only
/// arise from files, settings and sinks.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Reading or writing a file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML document did not parse.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON document did not parse.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension names no supported format.
    #[error("Unsupported file format: {} (expected .yaml, .yml or .json)", path.display())]
    UnsupportedFormat {
        /// Offending path.
        path: PathBuf,
    },

    /// A scenario is internally inconsistent.
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    /// Session settings are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Simulator constants rejected.
    #[error(transparent)]
    Sim(#[from] SimError),

    /// Alert thresholds rejected.
    #[error(transparent)]
    Eicas(#[from] EicasError),

    /// Timestep settings rejected.
    #[error(transparent)]
    Timing(#[from] TimingError),

    /// Unknown fault code.
    #[error(transparent)]
    Fault(#[from] ParseFaultError),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
