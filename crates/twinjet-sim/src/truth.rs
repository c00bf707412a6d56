//! Physical ground truth of both engines.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::SimConfig;

/// Physically "real" engine quantities.
///
/// Only the simulator holds a mutable instance; everyone else sees it
/// through a shared reference. Fault injection never writes here.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineTruth {
    /// Left engine speed (RPM).
    pub rpm_left: f64,
    /// Right engine speed (RPM).
    pub rpm_right: f64,
    /// Left exhaust gas temperature (°C).
    pub egt_left: f64,
    /// Right exhaust gas temperature (°C).
    pub egt_right: f64,
    /// Remaining fuel (units). Never negative.
    pub fuel_quantity: f64,
    /// Fuel consumption rate (units/s).
    pub fuel_flow: f64,
}

impl EngineTruth {
    /// Engines at rest with a full tank.
    pub fn at_rest(config: &SimConfig) -> Self {
        Self {
            rpm_left: 0.0,
            rpm_right: 0.0,
            egt_left: config.ambient_celsius,
            egt_right: config.ambient_celsius,
            fuel_quantity: config.initial_fuel.max(0.0),
            fuel_flow: 0.0,
        }
    }

    /// Pin every dynamic quantity to idle: no rotation, ambient exhaust, no flow.
    ///
    /// Fuel quantity is left untouched.
    pub fn settle(&mut self, ambient_celsius: f64) {
        self.rpm_left = 0.0;
        self.rpm_right = 0.0;
        self.egt_left = ambient_celsius;
        self.egt_right = ambient_celsius;
        self.fuel_flow = 0.0;
    }

    /// Burn fuel for `dt_secs` at the current flow, never going below empty.
    pub fn burn_fuel(&mut self, dt_secs: f64) {
        self.fuel_quantity = (self.fuel_quantity - self.fuel_flow * dt_secs).max(0.0);
    }

    /// Returns true once the tank is empty.
    pub fn is_fuel_exhausted(&self) -> bool {
        self.fuel_quantity <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_at_rest() {
        let truth = EngineTruth::at_rest(&SimConfig::default());
        assert_relative_eq!(truth.rpm_left, 0.0);
        assert_relative_eq!(truth.egt_right, 20.0);
        assert_relative_eq!(truth.fuel_quantity, 20_000.0);
        assert!(!truth.is_fuel_exhausted());
    }

    #[test]
    fn test_burn_fuel_floors_at_zero() {
        let mut truth = EngineTruth::at_rest(&SimConfig::default());
        truth.fuel_quantity = 0.1;
        truth.fuel_flow = 50.0;
        truth.burn_fuel(0.005);
        assert_relative_eq!(truth.fuel_quantity, 0.0);
        assert!(truth.is_fuel_exhausted());
    }

    #[test]
    fn test_settle_keeps_fuel() {
        let mut truth = EngineTruth {
            rpm_left: 30_000.0,
            rpm_right: 30_000.0,
            egt_left: 600.0,
            egt_right: 600.0,
            fuel_quantity: 1234.0,
            fuel_flow: 40.0,
        };
        truth.settle(20.0);
        assert_relative_eq!(truth.rpm_right, 0.0);
        assert_relative_eq!(truth.egt_left, 20.0);
        assert_relative_eq!(truth.fuel_flow, 0.0);
        assert_relative_eq!(truth.fuel_quantity, 1234.0);
    }
}
