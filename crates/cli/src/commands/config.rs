//! Configuration inspection

use anyhow::Result;
use std::path::Path;
use twinjet_session::SessionConfig;

use crate::error::CliError;
use crate::output;

/// Execute the config command
///
/// Prints the defaults, or the validated contents of `path` with defaults
/// filled in.
pub fn execute(path: Option<&Path>, json: bool) -> Result<()> {
    let config = match path {
        Some(path) => SessionConfig::load(path)
            .map_err(|e| CliError::InvalidConfiguration(format!("{}: {e}", path.display())))?,
        None => SessionConfig::default(),
    };
    output::print_config(&config, json)
}
