//! Fault overlay table: how each injected condition distorts sensor readings.
//!
//! The mapping is a fixed table from [`FaultCondition`] to a list of
//! [`Distortion`]s, so the same condition yields the same reading every tick
//! it stays injected. Overlays only ever touch [`ObservedData`].

use twinjet_faults::{FaultCondition, ThermalPhase};

use crate::{EngineSide, ObservedData, SensorSlot};

/// A single deterministic change applied to an observed snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distortion {
    /// Mark one speed sensor as failed.
    InvalidSpeedSensor(EngineSide, SensorSlot),
    /// Mark one temperature sensor as failed.
    InvalidTemperatureSensor(EngineSide, SensorSlot),
    /// Mark the fuel quantity sensor as failed.
    InvalidFuelSensor,
    /// Force a speed reading to a fraction of rated speed.
    SpeedFraction(EngineSide, f64),
    /// Force an exhaust temperature reading (°C).
    Temperature(EngineSide, f64),
    /// Force the fuel quantity reading.
    FuelQuantity(f64),
    /// Force the fuel flow reading.
    FuelFlow(f64),
}

impl Distortion {
    /// Apply this distortion to `observed`.
    pub fn apply(&self, observed: &mut ObservedData, rated_speed_rpm: f64) {
        match *self {
            Distortion::InvalidSpeedSensor(side, slot) => {
                observed.sensors.speed_mut(side).invalidate(slot);
            }
            Distortion::InvalidTemperatureSensor(side, slot) => {
                observed.sensors.temperature_mut(side).invalidate(slot);
            }
            Distortion::InvalidFuelSensor => observed.sensors.fuel = false,
            Distortion::SpeedFraction(side, fraction) => {
                observed.set_rpm(side, fraction * rated_speed_rpm);
            }
            Distortion::Temperature(side, celsius) => observed.set_egt(side, celsius),
            Distortion::FuelQuantity(quantity) => observed.fuel_quantity = quantity,
            Distortion::FuelFlow(flow) => observed.fuel_flow = flow,
        }
    }
}

use Distortion::*;
use EngineSide::{Left, Right};
use SensorSlot::{A, B};

const SPEED_SINGLE: &[Distortion] = &[InvalidSpeedSensor(Left, A)];
const SPEED_PAIR: &[Distortion] = &[InvalidSpeedSensor(Left, A), InvalidSpeedSensor(Left, B)];
const TEMP_SINGLE: &[Distortion] = &[InvalidTemperatureSensor(Left, A)];
const TEMP_PAIR: &[Distortion] = &[
    InvalidTemperatureSensor(Left, A),
    InvalidTemperatureSensor(Left, B),
];
const SENSOR_FUEL: &[Distortion] = &[InvalidFuelSensor];
const SENSOR_ALL: &[Distortion] = &[
    InvalidSpeedSensor(Left, A),
    InvalidSpeedSensor(Left, B),
    InvalidSpeedSensor(Right, A),
    InvalidSpeedSensor(Right, B),
    InvalidTemperatureSensor(Left, A),
    InvalidTemperatureSensor(Left, B),
    InvalidTemperatureSensor(Right, A),
    InvalidTemperatureSensor(Right, B),
];
const LOW_FUEL: &[Distortion] = &[FuelQuantity(400.0)];
const FUEL_LEAK: &[Distortion] = &[FuelFlow(60.0)];
const OVERSPEED_CAUTION: &[Distortion] = &[SpeedFraction(Left, 1.10)];
const OVERSPEED_SEVERE: &[Distortion] = &[SpeedFraction(Left, 1.25)];
const OVERHEAT_CAUTION_START: &[Distortion] = &[Temperature(Left, 900.0)];
const OVERHEAT_SEVERE_START: &[Distortion] = &[Temperature(Left, 1050.0)];
const OVERHEAT_CAUTION_RUN: &[Distortion] = &[Temperature(Left, 1000.0)];
const OVERHEAT_SEVERE_RUN: &[Distortion] = &[Temperature(Left, 1150.0)];

/// Distortions injected for `condition`.
pub fn distortions(condition: FaultCondition) -> &'static [Distortion] {
    match condition {
        FaultCondition::SpeedSensorSingleFail => SPEED_SINGLE,
        FaultCondition::SpeedSensorPairFail => SPEED_PAIR,
        FaultCondition::TempSensorSingleFail => TEMP_SINGLE,
        FaultCondition::TempSensorPairFail => TEMP_PAIR,
        FaultCondition::SensorFuel => SENSOR_FUEL,
        FaultCondition::SensorAll => SENSOR_ALL,
        FaultCondition::LowFuel => LOW_FUEL,
        FaultCondition::FuelLeak => FUEL_LEAK,
        FaultCondition::OverspeedCaution => OVERSPEED_CAUTION,
        FaultCondition::OverspeedSevere => OVERSPEED_SEVERE,
        FaultCondition::OverheatCaution(ThermalPhase::Start) => OVERHEAT_CAUTION_START,
        FaultCondition::OverheatSevere(ThermalPhase::Start) => OVERHEAT_SEVERE_START,
        FaultCondition::OverheatCaution(ThermalPhase::Run) => OVERHEAT_CAUTION_RUN,
        FaultCondition::OverheatSevere(ThermalPhase::Run) => OVERHEAT_SEVERE_RUN,
    }
}

/// Apply the overlay for `injected` (if any) and refresh the percent readouts.
pub fn apply_overlay(
    injected: Option<FaultCondition>,
    observed: &mut ObservedData,
    rated_speed_rpm: f64,
) {
    if let Some(condition) = injected {
        for distortion in distortions(condition) {
            distortion.apply(observed, rated_speed_rpm);
        }
    }
    observed.refresh_percent(rated_speed_rpm);
}
