//! Sensor-reported view of the engines.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::EngineTruth;

/// Which engine a reading belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EngineSide {
    /// Engine 1.
    Left,
    /// Engine 2.
    Right,
}

impl EngineSide {
    /// Both sides, left first.
    pub const BOTH: [EngineSide; 2] = [EngineSide::Left, EngineSide::Right];
}

/// One of the two redundant sensors fitted per measured quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SensorSlot {
    /// First sensor of the pair.
    A,
    /// Second sensor of the pair.
    B,
}

/// Validity flags of a redundant sensor pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorPair {
    /// Sensor A is reporting.
    pub a: bool,
    /// Sensor B is reporting.
    pub b: bool,
}

impl Default for SensorPair {
    fn default() -> Self {
        Self::VALID
    }
}

impl SensorPair {
    /// Both sensors reporting.
    pub const VALID: SensorPair = SensorPair { a: true, b: true };

    /// Number of failed sensors in the pair (0, 1 or 2).
    pub fn invalid_count(&self) -> u8 {
        u8::from(!self.a) + u8::from(!self.b)
    }

    /// Mark one sensor as failed.
    pub fn invalidate(&mut self, slot: SensorSlot) {
        match slot {
            SensorSlot::A => self.a = false,
            SensorSlot::B => self.b = false,
        }
    }
}

/// Validity flags for every sensor on the powerplant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorValidity {
    /// Left engine speed sensors.
    pub speed_left: SensorPair,
    /// Right engine speed sensors.
    pub speed_right: SensorPair,
    /// Left engine temperature sensors.
    pub temp_left: SensorPair,
    /// Right engine temperature sensors.
    pub temp_right: SensorPair,
    /// Fuel quantity sensor.
    pub fuel: bool,
}

impl SensorValidity {
    /// Every sensor reporting.
    pub fn all_valid() -> Self {
        Self {
            speed_left: SensorPair::VALID,
            speed_right: SensorPair::VALID,
            temp_left: SensorPair::VALID,
            temp_right: SensorPair::VALID,
            fuel: true,
        }
    }

    /// Speed sensor pair of one engine.
    pub fn speed(&self, side: EngineSide) -> SensorPair {
        match side {
            EngineSide::Left => self.speed_left,
            EngineSide::Right => self.speed_right,
        }
    }

    /// Temperature sensor pair of one engine.
    pub fn temperature(&self, side: EngineSide) -> SensorPair {
        match side {
            EngineSide::Left => self.temp_left,
            EngineSide::Right => self.temp_right,
        }
    }

    /// Mutable speed sensor pair of one engine.
    pub fn speed_mut(&mut self, side: EngineSide) -> &mut SensorPair {
        match side {
            EngineSide::Left => &mut self.speed_left,
            EngineSide::Right => &mut self.speed_right,
        }
    }

    /// Mutable temperature sensor pair of one engine.
    pub fn temperature_mut(&mut self, side: EngineSide) -> &mut SensorPair {
        match side {
            EngineSide::Left => &mut self.temp_left,
            EngineSide::Right => &mut self.temp_right,
        }
    }
}

/// Sensor-reported engine data for one tick.
///
/// Derived from [`EngineTruth`] and then distorted by the injected fault, so
/// it may disagree arbitrarily with the physical values. The snapshot is a
/// plain `Copy` value: once handed out it cannot change.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObservedData {
    /// Left engine speed reading (RPM).
    pub rpm_left: f64,
    /// Right engine speed reading (RPM).
    pub rpm_right: f64,
    /// Left exhaust temperature reading (°C).
    pub egt_left: f64,
    /// Right exhaust temperature reading (°C).
    pub egt_right: f64,
    /// Fuel quantity reading.
    pub fuel_quantity: f64,
    /// Fuel flow reading (units/s).
    pub fuel_flow: f64,
    /// Left speed as a percentage of rated speed.
    pub speed_percent_left: f64,
    /// Right speed as a percentage of rated speed.
    pub speed_percent_right: f64,
    /// Sensor validity flags.
    pub sensors: SensorValidity,
}

impl ObservedData {
    /// Copy the truth into a fresh snapshot with every sensor valid.
    pub fn from_truth(truth: &EngineTruth, rated_speed_rpm: f64) -> Self {
        let mut observed = Self {
            rpm_left: truth.rpm_left,
            rpm_right: truth.rpm_right,
            egt_left: truth.egt_left,
            egt_right: truth.egt_right,
            fuel_quantity: truth.fuel_quantity,
            fuel_flow: truth.fuel_flow,
            speed_percent_left: 0.0,
            speed_percent_right: 0.0,
            sensors: SensorValidity::all_valid(),
        };
        observed.refresh_percent(rated_speed_rpm);
        observed
    }

    /// Recompute the percent-of-rated readouts from the speed readings.
    pub fn refresh_percent(&mut self, rated_speed_rpm: f64) {
        if rated_speed_rpm > 0.0 {
            self.speed_percent_left = self.rpm_left / rated_speed_rpm * 100.0;
            self.speed_percent_right = self.rpm_right / rated_speed_rpm * 100.0;
        } else {
            self.speed_percent_left = 0.0;
            self.speed_percent_right = 0.0;
        }
    }

    /// Speed reading of one engine (RPM).
    pub fn rpm(&self, side: EngineSide) -> f64 {
        match side {
            EngineSide::Left => self.rpm_left,
            EngineSide::Right => self.rpm_right,
        }
    }

    /// Exhaust temperature reading of one engine (°C).
    pub fn egt(&self, side: EngineSide) -> f64 {
        match side {
            EngineSide::Left => self.egt_left,
            EngineSide::Right => self.egt_right,
        }
    }

    /// Speed of one engine as a percentage of rated speed.
    pub fn speed_percent(&self, side: EngineSide) -> f64 {
        match side {
            EngineSide::Left => self.speed_percent_left,
            EngineSide::Right => self.speed_percent_right,
        }
    }

    /// Overwrite the speed reading of one engine.
    pub fn set_rpm(&mut self, side: EngineSide, rpm: f64) {
        match side {
            EngineSide::Left => self.rpm_left = rpm,
            EngineSide::Right => self.rpm_right = rpm,
        }
    }

    /// Overwrite the exhaust temperature reading of one engine.
    pub fn set_egt(&mut self, side: EngineSide, egt: f64) {
        match side {
            EngineSide::Left => self.egt_left = egt,
            EngineSide::Right => self.egt_right = egt,
        }
    }
}
