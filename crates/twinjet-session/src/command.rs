//! Crew and instructor commands.

use std::fmt;

use serde::{Deserialize, Serialize};
use twinjet_faults::FaultCondition;
use twinjet_sim::{PhysicsSimulator, ThrustDirection};

/// A fire-and-forget command for the simulator.
///
/// In scenario files unit commands are plain strings (`start`,
/// `thrust_up`) and injection names the fault code:
///
/// ```yaml
/// command: { inject: OVERSPEED_SEVERE }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Begin engine start.
    Start,
    /// Begin engine shutdown.
    Stop,
    /// Nudge thrust up.
    ThrustUp,
    /// Nudge thrust down.
    ThrustDown,
    /// Inject a sensor fault, or clear it with `None`.
    Inject(Option<FaultCondition>),
    /// Clear any injected fault.
    ClearFault,
}

impl Command {
    /// Deliver this command to `sim`.
    pub fn apply_to(self, sim: &mut PhysicsSimulator) {
        match self {
            Command::Start => sim.start(),
            Command::Stop => sim.stop(),
            Command::ThrustUp => sim.adjust_thrust(ThrustDirection::Increase),
            Command::ThrustDown => sim.adjust_thrust(ThrustDirection::Decrease),
            Command::Inject(condition) => sim.inject_fault(condition),
            Command::ClearFault => sim.clear_fault(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Start => write!(f, "start"),
            Command::Stop => write!(f, "stop"),
            Command::ThrustUp => write!(f, "thrust up"),
            Command::ThrustDown => write!(f, "thrust down"),
            Command::Inject(Some(condition)) => write!(f, "inject {}", condition.code()),
            Command::Inject(None) | Command::ClearFault => write!(f, "clear fault"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_yaml_forms() -> TestResult {
        let start: Command = serde_yaml::from_str("start")?;
        assert_eq!(start, Command::Start);

        let inject: Command = serde_yaml::from_str("inject: SENSOR_ALL")?;
        assert_eq!(inject, Command::Inject(Some(FaultCondition::SensorAll)));

        let clear: Command = serde_yaml::from_str("inject: null")?;
        assert_eq!(clear, Command::Inject(None));
        Ok(())
    }

    #[test]
    fn test_json_forms() -> TestResult {
        let thrust: Command = serde_json::from_str(r#""thrust_down""#)?;
        assert_eq!(thrust, Command::ThrustDown);
        let inject: Command = serde_json::from_str(r#"{"inject":"low_fuel"}"#)?;
        assert_eq!(inject, Command::Inject(Some(FaultCondition::LowFuel)));
        Ok(())
    }

    #[test]
    fn test_unknown_fault_code_is_rejected() {
        assert!(serde_yaml::from_str::<Command>("inject: ENGINE_FIRE").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Command::Inject(Some(FaultCondition::FuelLeak)).to_string(),
            "inject FUEL_LEAK"
        );
        assert_eq!(Command::ThrustUp.to_string(), "thrust up");
    }
}
