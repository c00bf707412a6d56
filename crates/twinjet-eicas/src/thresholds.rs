//! Named alert limits.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use twinjet_faults::ThermalPhase;
use twinjet_sim::LifecycleState;

use crate::EicasError;

/// Limits the evaluator compares readings against.
///
/// Speed limits are percentages of rated speed. Exhaust temperature limits
/// come in two sets: a tighter one while the engines are starting and a
/// wider one for every other state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AlertThresholds {
    /// Red speed limit (% of rated).
    pub speed_red_percent: f64,
    /// Amber speed limit (% of rated).
    pub speed_amber_percent: f64,
    /// Red exhaust temperature limit while starting (°C).
    pub egt_red_start_celsius: f64,
    /// Amber exhaust temperature limit while starting (°C).
    pub egt_amber_start_celsius: f64,
    /// Red exhaust temperature limit otherwise (°C).
    pub egt_red_run_celsius: f64,
    /// Amber exhaust temperature limit otherwise (°C).
    pub egt_amber_run_celsius: f64,
    /// Fuel quantity below which LOW FUEL is raised.
    pub low_fuel: f64,
    /// Fuel flow above which a leak is suspected.
    pub high_fuel_flow: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            speed_red_percent: 120.0,
            speed_amber_percent: 105.0,
            egt_red_start_celsius: 1000.0,
            egt_amber_start_celsius: 850.0,
            egt_red_run_celsius: 1100.0,
            egt_amber_run_celsius: 950.0,
            low_fuel: 500.0,
            high_fuel_flow: 50.0,
        }
    }
}

/// The exhaust temperature limit set that applies in one lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureLimits {
    /// Phase tag carried by overheat conditions.
    pub phase: ThermalPhase,
    /// Red limit (°C).
    pub red: f64,
    /// Amber limit (°C).
    pub amber: f64,
}

impl AlertThresholds {
    /// Temperature limits for `state`.
    pub fn temperature_limits(&self, state: LifecycleState) -> TemperatureLimits {
        match state {
            LifecycleState::Starting => TemperatureLimits {
                phase: ThermalPhase::Start,
                red: self.egt_red_start_celsius,
                amber: self.egt_amber_start_celsius,
            },
            LifecycleState::Off | LifecycleState::Running | LifecycleState::Stopping => {
                TemperatureLimits {
                    phase: ThermalPhase::Run,
                    red: self.egt_red_run_celsius,
                    amber: self.egt_amber_run_celsius,
                }
            }
        }
    }

    /// Validate thresholds are finite and each amber limit sits below its red limit.
    ///
    /// # Errors
    ///
    /// Returns [`EicasError::InvalidThreshold`] naming the first bad field.
    pub fn validate(&self) -> Result<(), EicasError> {
        let fields = [
            ("speed_red_percent", self.speed_red_percent),
            ("speed_amber_percent", self.speed_amber_percent),
            ("egt_red_start_celsius", self.egt_red_start_celsius),
            ("egt_amber_start_celsius", self.egt_amber_start_celsius),
            ("egt_red_run_celsius", self.egt_red_run_celsius),
            ("egt_amber_run_celsius", self.egt_amber_run_celsius),
            ("low_fuel", self.low_fuel),
            ("high_fuel_flow", self.high_fuel_flow),
        ];
        if let Some(&(name, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(EicasError::invalid(name, "must be finite"));
        }

        if self.speed_amber_percent <= 0.0 {
            return Err(EicasError::invalid("speed_amber_percent", "must be positive"));
        }
        if self.speed_amber_percent >= self.speed_red_percent {
            return Err(EicasError::invalid(
                "speed_amber_percent",
                "must be below speed_red_percent",
            ));
        }
        if self.egt_amber_start_celsius >= self.egt_red_start_celsius {
            return Err(EicasError::invalid(
                "egt_amber_start_celsius",
                "must be below egt_red_start_celsius",
            ));
        }
        if self.egt_amber_run_celsius >= self.egt_red_run_celsius {
            return Err(EicasError::invalid(
                "egt_amber_run_celsius",
                "must be below egt_red_run_celsius",
            ));
        }
        if self.low_fuel < 0.0 {
            return Err(EicasError::invalid("low_fuel", "cannot be negative"));
        }
        if self.high_fuel_flow <= 0.0 {
            return Err(EicasError::invalid("high_fuel_flow", "must be positive"));
        }
        Ok(())
    }
}
