//! Scenario validation

use anyhow::Result;
use std::path::Path;
use twinjet_session::Scenario;

use crate::error::CliError;
use crate::output;

/// Execute the validate command
pub fn execute(path: &Path, json: bool) -> Result<()> {
    let scenario = Scenario::load(path)
        .map_err(|e| CliError::InvalidScenario(format!("{}: {e}", path.display())))?;
    let timeline = scenario
        .timeline()
        .map_err(|e| CliError::InvalidScenario(e.to_string()))?;
    output::print_scenario(&scenario, &timeline, json)
}
