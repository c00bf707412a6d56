//! Scripted training scenarios.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::document::load_document;
use crate::{SessionError, SessionResult};

/// A command scheduled at a time offset from the start of the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioEvent {
    /// Offset in seconds.
    pub at_secs: f64,
    /// Command to deliver.
    pub command: Command,
}

/// A headless run: how long, and which commands when.
///
/// ```yaml
/// name: overspeed drill
/// duration_secs: 20.0
/// events:
///   - { at_secs: 0.0, command: start }
///   - { at_secs: 9.0, command: { inject: OVERSPEED_SEVERE } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Short identifier shown in output.
    pub name: String,
    /// Free-form notes for the instructor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Total simulated time in seconds.
    pub duration_secs: f64,
    /// Scheduled commands; need not be sorted.
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
}

fn seconds(name: &str, value: f64) -> SessionResult<Duration> {
    if !value.is_finite() || value < 0.0 {
        return Err(SessionError::InvalidScenario(format!(
            "{name} must be a finite, non-negative number of seconds, got {value}"
        )));
    }
    Duration::try_from_secs_f64(value)
        .map_err(|e| SessionError::InvalidScenario(format!("{name}: {e}")))
}

impl Scenario {
    /// Load and validate a `.yaml`, `.yml` or `.json` scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or fails
    /// [`Scenario::validate`].
    pub fn load(path: &Path) -> SessionResult<Self> {
        let scenario: Scenario = load_document(path)?;
        scenario.validate()?;
        tracing::info!(
            path = %path.display(),
            name = %scenario.name,
            events = scenario.events.len(),
            "Loaded scenario"
        );
        Ok(scenario)
    }

    /// Parse and validate YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not parse or fails validation.
    pub fn from_yaml_str(text: &str) -> SessionResult<Self> {
        let scenario: Scenario = serde_yaml::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Total simulated time.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidScenario`] for a negative or
    /// non-finite duration.
    pub fn duration(&self) -> SessionResult<Duration> {
        seconds("duration_secs", self.duration_secs)
    }

    /// Events as `(offset, command)` pairs sorted by offset.
    ///
    /// Events sharing an offset keep their file order.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidScenario`] for a bad offset.
    pub fn timeline(&self) -> SessionResult<Vec<(Duration, Command)>> {
        let mut timeline = self
            .events
            .iter()
            .map(|event| Ok((seconds("at_secs", event.at_secs)?, event.command)))
            .collect::<SessionResult<Vec<_>>>()?;
        timeline.sort_by_key(|&(at, _)| at);
        Ok(timeline)
    }

    /// Check the name, the duration and every event offset.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidScenario`] describing the first
    /// problem found.
    pub fn validate(&self) -> SessionResult<()> {
        if self.name.trim().is_empty() {
            return Err(SessionError::InvalidScenario(
                "name must not be empty".to_string(),
            ));
        }
        let duration = self.duration()?;
        if duration.is_zero() {
            return Err(SessionError::InvalidScenario(
                "duration_secs must be positive".to_string(),
            ));
        }
        for (at, command) in self.timeline()? {
            if at > duration {
                return Err(SessionError::InvalidScenario(format!(
                    "'{command}' at {:.3}s is past the end of the run ({:.3}s)",
                    at.as_secs_f64(),
                    duration.as_secs_f64()
                )));
            }
        }
        Ok(())
    }
}
