//! Physics constants for the engine model.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::SimError;

/// Physics constants of the twin-engine model.
///
/// The formulas these feed are illustrative rather than certified; every
/// constant is exposed so tests and training scenarios can move the model to
/// its boundaries.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Rated maximum speed (the 100% reference) in RPM.
    pub rated_speed_rpm: f64,
    /// Ambient temperature in Celsius; exhaust temperature never decays below it.
    pub ambient_celsius: f64,
    /// Fuel quantity at simulator creation.
    pub initial_fuel: f64,
    /// Speed gain per second during the linear spool-up phase.
    pub spool_rate_rpm_per_sec: f64,
    /// Fuel flow gain per second during the linear spool-up phase.
    pub spool_fuel_rate: f64,
    /// Duration of the linear spool-up phase in seconds.
    pub linear_phase_secs: f64,
    /// Time offset of the logarithmic growth curve in seconds.
    pub log_phase_offset_secs: f64,
    /// Speed coefficient of the logarithmic growth curve.
    pub log_speed_gain: f64,
    /// Speed intercept of the logarithmic growth curve.
    pub log_speed_base: f64,
    /// Temperature coefficient of the logarithmic growth curve.
    pub log_temp_gain: f64,
    /// Fuel flow coefficient of the logarithmic growth curve.
    pub log_flow_gain: f64,
    /// Fuel flow intercept of the logarithmic growth curve.
    pub log_flow_base: f64,
    /// Fraction of rated speed at which STARTING hands over to RUNNING.
    pub running_fraction: f64,
    /// Half-width of the shared steady-state noise fraction.
    pub running_noise: f64,
    /// Smallest relative thrust step.
    pub thrust_step_min: f64,
    /// Largest relative thrust step.
    pub thrust_step_max: f64,
    /// Fuel flow change per thrust step.
    pub thrust_fuel_step: f64,
    /// Cap on the steady-state speed baseline as a fraction of rated speed.
    pub max_speed_fraction: f64,
    /// Per-second decay base used while stopping.
    pub decay_base: f64,
    /// Time after which a stopping engine is forced off, in seconds.
    pub stop_timeout_secs: f64,
    /// Latest spool-up time at which the growth curve must reach the running
    /// threshold, in seconds.
    pub start_timeout_secs: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rated_speed_rpm: 40_000.0,
            ambient_celsius: 20.0,
            initial_fuel: 20_000.0,
            spool_rate_rpm_per_sec: 10_000.0,
            spool_fuel_rate: 5.0,
            linear_phase_secs: 2.0,
            log_phase_offset_secs: 1.0,
            log_speed_gain: 23_000.0,
            log_speed_base: 20_000.0,
            log_temp_gain: 900.0,
            log_flow_gain: 42.0,
            log_flow_base: 10.0,
            running_fraction: 0.95,
            running_noise: 0.03,
            thrust_step_min: 0.03,
            thrust_step_max: 0.05,
            thrust_fuel_step: 1.0,
            max_speed_fraction: 1.25,
            decay_base: 0.6,
            stop_timeout_secs: 10.0,
            start_timeout_secs: 60.0,
        }
    }
}

impl SimConfig {
    /// Speed at which the engine is considered spooled up, in RPM.
    pub fn running_threshold_rpm(&self) -> f64 {
        self.running_fraction * self.rated_speed_rpm
    }

    /// Speed on the logarithmic growth curve `t` seconds into spool-up.
    pub fn log_curve_rpm(&self, t: f64) -> f64 {
        self.log_speed_gain * (t - self.log_phase_offset_secs).log10() + self.log_speed_base
    }

    /// Upper bound of the steady-state speed baseline, in RPM.
    pub fn max_speed_rpm(&self) -> f64 {
        self.max_speed_fraction * self.rated_speed_rpm
    }

    /// Validate every constant.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameter`] naming the first field that is
    /// non-finite or outside its range.
    pub fn validate(&self) -> Result<(), SimError> {
        let fields = [
            ("rated_speed_rpm", self.rated_speed_rpm),
            ("ambient_celsius", self.ambient_celsius),
            ("initial_fuel", self.initial_fuel),
            ("spool_rate_rpm_per_sec", self.spool_rate_rpm_per_sec),
            ("spool_fuel_rate", self.spool_fuel_rate),
            ("linear_phase_secs", self.linear_phase_secs),
            ("log_phase_offset_secs", self.log_phase_offset_secs),
            ("log_speed_gain", self.log_speed_gain),
            ("log_speed_base", self.log_speed_base),
            ("log_temp_gain", self.log_temp_gain),
            ("log_flow_gain", self.log_flow_gain),
            ("log_flow_base", self.log_flow_base),
            ("running_fraction", self.running_fraction),
            ("running_noise", self.running_noise),
            ("thrust_step_min", self.thrust_step_min),
            ("thrust_step_max", self.thrust_step_max),
            ("thrust_fuel_step", self.thrust_fuel_step),
            ("max_speed_fraction", self.max_speed_fraction),
            ("decay_base", self.decay_base),
            ("stop_timeout_secs", self.stop_timeout_secs),
            ("start_timeout_secs", self.start_timeout_secs),
        ];
        if let Some(&(name, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(SimError::invalid(name, "must be finite"));
        }

        if self.rated_speed_rpm <= 0.0 {
            return Err(SimError::invalid("rated_speed_rpm", "must be positive"));
        }
        if self.initial_fuel < 0.0 {
            return Err(SimError::invalid("initial_fuel", "cannot be negative"));
        }
        if self.spool_rate_rpm_per_sec <= 0.0 {
            return Err(SimError::invalid(
                "spool_rate_rpm_per_sec",
                "must be positive",
            ));
        }
        if self.spool_fuel_rate < 0.0 {
            return Err(SimError::invalid("spool_fuel_rate", "cannot be negative"));
        }
        if self.log_phase_offset_secs < 0.0 {
            return Err(SimError::invalid(
                "log_phase_offset_secs",
                "cannot be negative",
            ));
        }
        if self.linear_phase_secs <= self.log_phase_offset_secs {
            return Err(SimError::invalid(
                "linear_phase_secs",
                "must exceed log_phase_offset_secs",
            ));
        }
        if self.running_fraction <= 0.0 || self.running_fraction > 1.0 {
            return Err(SimError::invalid(
                "running_fraction",
                "must be in (0, 1]",
            ));
        }
        if self.log_speed_gain <= 0.0 {
            return Err(SimError::invalid("log_speed_gain", "must be positive"));
        }
        if self.start_timeout_secs <= self.linear_phase_secs {
            return Err(SimError::invalid(
                "start_timeout_secs",
                "must exceed linear_phase_secs",
            ));
        }
        // RUNNING is only entered from the growth curve, which rises with t.
        if self.log_curve_rpm(self.start_timeout_secs) < self.running_threshold_rpm() {
            return Err(SimError::invalid(
                "log_speed_gain",
                "growth curve does not reach the running threshold before start_timeout_secs",
            ));
        }
        if !(0.0..0.5).contains(&self.running_noise) {
            return Err(SimError::invalid("running_noise", "must be in [0, 0.5)"));
        }
        if self.thrust_step_min < 0.0 {
            return Err(SimError::invalid("thrust_step_min", "cannot be negative"));
        }
        if self.thrust_step_max < self.thrust_step_min || self.thrust_step_max >= 1.0 {
            return Err(SimError::invalid(
                "thrust_step_max",
                "must be in [thrust_step_min, 1)",
            ));
        }
        if self.thrust_fuel_step < 0.0 {
            return Err(SimError::invalid("thrust_fuel_step", "cannot be negative"));
        }
        if self.max_speed_fraction < self.running_fraction {
            return Err(SimError::invalid(
                "max_speed_fraction",
                "must be at least running_fraction",
            ));
        }
        if self.decay_base <= 0.0 || self.decay_base >= 1.0 {
            return Err(SimError::invalid("decay_base", "must be between 0 and 1"));
        }
        if self.stop_timeout_secs <= 0.0 {
            return Err(SimError::invalid("stop_timeout_secs", "must be positive"));
        }
        Ok(())
    }
}
