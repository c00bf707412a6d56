//! Layered session configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use twinjet_eicas::AlertThresholds;
use twinjet_sim::SimConfig;
use twinjet_timing::FixedStepAccumulator;

use crate::document::load_document;
use crate::{SessionError, SessionResult};

/// Everything needed to build a [`Session`](crate::Session).
///
/// Every field has a default, so a config file only needs to name what it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Fixed simulation step in milliseconds.
    pub step_ms: u64,
    /// Clamp on one frame's elapsed wall time in milliseconds.
    pub max_frame_ms: u64,
    /// How long a raised alert stays on the display, in seconds.
    pub display_window_secs: f64,
    /// Random seed for the steady-state noise; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Stop the engines automatically on critical alerts.
    pub auto_protection: bool,
    /// Physics constants.
    pub sim: SimConfig,
    /// Alert limits.
    pub thresholds: AlertThresholds,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            step_ms: 5,
            max_frame_ms: 250,
            display_window_secs: 5.0,
            seed: None,
            auto_protection: true,
            sim: SimConfig::default(),
            thresholds: AlertThresholds::default(),
        }
    }
}

impl SessionConfig {
    /// Load and validate a `.yaml`, `.yml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any
    /// setting fails validation.
    pub fn load(path: &Path) -> SessionResult<Self> {
        let config: SessionConfig = load_document(path)?;
        config.validate()?;
        tracing::info!(path = %path.display(), "Loaded session configuration");
        Ok(config)
    }

    /// Parse and validate YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not parse or fails validation.
    pub fn from_yaml_str(text: &str) -> SessionResult<Self> {
        let config: SessionConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml_string(&self) -> SessionResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Fixed simulation step.
    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }

    /// Frame clamp.
    pub fn max_frame(&self) -> Duration {
        Duration::from_millis(self.max_frame_ms)
    }

    /// Alert display window.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidConfiguration`] unless the window is a
    /// finite, positive number of seconds.
    pub fn display_window(&self) -> SessionResult<Duration> {
        if !(self.display_window_secs.is_finite() && self.display_window_secs > 0.0) {
            return Err(SessionError::InvalidConfiguration(format!(
                "display_window_secs must be positive, got {}",
                self.display_window_secs
            )));
        }
        Duration::try_from_secs_f64(self.display_window_secs)
            .map_err(|e| SessionError::InvalidConfiguration(format!("display_window_secs: {e}")))
    }

    /// Build the timestep accumulator described by this config.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Timing`] for a zero step or a clamp shorter
    /// than one step.
    pub fn accumulator(&self) -> SessionResult<FixedStepAccumulator> {
        Ok(FixedStepAccumulator::new(self.step(), self.max_frame())?)
    }

    /// Validate every layer.
    ///
    /// # Errors
    ///
    /// Returns the first failing layer's error.
    pub fn validate(&self) -> SessionResult<()> {
        self.accumulator()?;
        self.display_window()?;
        self.sim.validate()?;
        self.thresholds.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_default_is_valid() -> TestResult {
        SessionConfig::default().validate()?;
        Ok(())
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() -> TestResult {
        let config = SessionConfig::from_yaml_str(
            "seed: 7\nauto_protection: false\nthresholds:\n  low_fuel: 900.0\n",
        )?;
        assert_eq!(config.seed, Some(7));
        assert!(!config.auto_protection);
        approx::assert_relative_eq!(config.thresholds.low_fuel, 900.0);
        approx::assert_relative_eq!(config.thresholds.high_fuel_flow, 50.0);
        assert_eq!(config.step(), Duration::from_millis(5));
        Ok(())
    }

    #[test]
    fn test_rejects_bad_layers() {
        assert!(matches!(
            SessionConfig::from_yaml_str("step_ms: 0"),
            Err(SessionError::Timing(_))
        ));
        assert!(matches!(
            SessionConfig::from_yaml_str("display_window_secs: -1.0"),
            Err(SessionError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            SessionConfig::from_yaml_str("sim:\n  decay_base: 2.0"),
            Err(SessionError::Sim(_))
        ));
        assert!(matches!(
            SessionConfig::from_yaml_str("thresholds:\n  speed_amber_percent: 130.0"),
            Err(SessionError::Eicas(_))
        ));
    }

    #[test]
    fn test_yaml_round_trip() -> TestResult {
        let config = SessionConfig {
            seed: Some(99),
            ..SessionConfig::default()
        };
        let text = config.to_yaml_string()?;
        assert_eq!(SessionConfig::from_yaml_str(&text)?, config);
        Ok(())
    }
}
