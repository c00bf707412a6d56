//! Fault conditions, severity bands, and crew messages.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ParseFaultError;

/// Number of distinct [`FaultCondition`] values.
pub const CONDITION_COUNT: usize = 14;

/// Severity band of a fault condition.
///
/// Ordering follows severity: `White < Amber < Red`, so the most severe band
/// compares greatest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SeverityBand {
    /// Advisory: awareness only.
    White,
    /// Caution: prompt crew attention.
    Amber,
    /// Warning: immediate crew action.
    Red,
}

impl SeverityBand {
    /// Prefix used in front of crew messages for this band.
    pub fn label(&self) -> &'static str {
        match self {
            SeverityBand::Red => "WARNING",
            SeverityBand::Amber => "CAUTION",
            SeverityBand::White => "ADVISORY",
        }
    }
}

impl fmt::Display for SeverityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeverityBand::Red => f.pad("red"),
            SeverityBand::Amber => f.pad("amber"),
            SeverityBand::White => f.pad("white"),
        }
    }
}

/// Lifecycle phase whose temperature limits were crossed.
///
/// Starting an engine tolerates a lower exhaust temperature than steady
/// running, so overheat conditions carry the limit set they were judged
/// against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ThermalPhase {
    /// Limits applied while the engine is starting.
    Start,
    /// Limits applied in every other lifecycle state.
    Run,
}

/// Detectable problem reported by the alerting logic.
///
/// The enumeration is closed; [`FaultCondition::ALL`] lists every value in
/// evaluation order (red band first, white band last).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultCondition {
    /// Every speed and every temperature sensor on both engines is invalid.
    SensorAll,
    /// Fuel quantity sensor is invalid.
    SensorFuel,
    /// An engine exceeded the red speed limit.
    OverspeedSevere,
    /// An engine exceeded the red exhaust temperature limit.
    OverheatSevere(ThermalPhase),
    /// An engine lost both of its speed sensors.
    SpeedSensorPairFail,
    /// An engine lost both of its temperature sensors.
    TempSensorPairFail,
    /// Fuel quantity below the low-fuel threshold.
    LowFuel,
    /// Fuel flow above the high-flow threshold.
    FuelLeak,
    /// An engine exceeded the amber speed limit.
    OverspeedCaution,
    /// An engine exceeded the amber exhaust temperature limit.
    OverheatCaution(ThermalPhase),
    /// An engine lost exactly one of its speed sensors.
    SpeedSensorSingleFail,
    /// An engine lost exactly one of its temperature sensors.
    TempSensorSingleFail,
}

impl FaultCondition {
    /// Every condition, in evaluation order.
    pub const ALL: [FaultCondition; CONDITION_COUNT] = [
        FaultCondition::SensorAll,
        FaultCondition::SensorFuel,
        FaultCondition::OverspeedSevere,
        FaultCondition::OverheatSevere(ThermalPhase::Start),
        FaultCondition::OverheatSevere(ThermalPhase::Run),
        FaultCondition::SpeedSensorPairFail,
        FaultCondition::TempSensorPairFail,
        FaultCondition::LowFuel,
        FaultCondition::FuelLeak,
        FaultCondition::OverspeedCaution,
        FaultCondition::OverheatCaution(ThermalPhase::Start),
        FaultCondition::OverheatCaution(ThermalPhase::Run),
        FaultCondition::SpeedSensorSingleFail,
        FaultCondition::TempSensorSingleFail,
    ];

    /// Returns the severity band of this condition.
    pub fn band(&self) -> SeverityBand {
        match self {
            FaultCondition::SensorAll
            | FaultCondition::SensorFuel
            | FaultCondition::OverspeedSevere
            | FaultCondition::OverheatSevere(_) => SeverityBand::Red,
            FaultCondition::SpeedSensorPairFail
            | FaultCondition::TempSensorPairFail
            | FaultCondition::LowFuel
            | FaultCondition::FuelLeak
            | FaultCondition::OverspeedCaution
            | FaultCondition::OverheatCaution(_) => SeverityBand::Amber,
            FaultCondition::SpeedSensorSingleFail | FaultCondition::TempSensorSingleFail => {
                SeverityBand::White
            }
        }
    }

    /// Returns true if this condition demands an automatic engine shutdown.
    ///
    /// `SensorFuel` is red but not critical: losing the fuel gauge does not
    /// endanger the running engines.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            FaultCondition::SensorAll
                | FaultCondition::OverspeedSevere
                | FaultCondition::OverheatSevere(_)
        )
    }

    /// Position of this condition in [`FaultCondition::ALL`].
    ///
    /// Lower values are displayed first.
    pub fn priority(&self) -> usize {
        match self {
            FaultCondition::SensorAll => 0,
            FaultCondition::SensorFuel => 1,
            FaultCondition::OverspeedSevere => 2,
            FaultCondition::OverheatSevere(ThermalPhase::Start) => 3,
            FaultCondition::OverheatSevere(ThermalPhase::Run) => 4,
            FaultCondition::SpeedSensorPairFail => 5,
            FaultCondition::TempSensorPairFail => 6,
            FaultCondition::LowFuel => 7,
            FaultCondition::FuelLeak => 8,
            FaultCondition::OverspeedCaution => 9,
            FaultCondition::OverheatCaution(ThermalPhase::Start) => 10,
            FaultCondition::OverheatCaution(ThermalPhase::Run) => 11,
            FaultCondition::SpeedSensorSingleFail => 12,
            FaultCondition::TempSensorSingleFail => 13,
        }
    }

    /// Stable machine-readable code, used by configuration files, scenarios
    /// and the command line.
    pub fn code(&self) -> &'static str {
        match self {
            FaultCondition::SensorAll => "SENSOR_ALL",
            FaultCondition::SensorFuel => "SENSOR_FUEL",
            FaultCondition::OverspeedSevere => "OVERSPEED_SEVERE",
            FaultCondition::OverheatSevere(ThermalPhase::Start) => "OVERHEAT_SEVERE_START",
            FaultCondition::OverheatSevere(ThermalPhase::Run) => "OVERHEAT_SEVERE_RUN",
            FaultCondition::SpeedSensorPairFail => "SPEED_SENSOR_PAIR_FAIL",
            FaultCondition::TempSensorPairFail => "TEMP_SENSOR_PAIR_FAIL",
            FaultCondition::LowFuel => "LOW_FUEL",
            FaultCondition::FuelLeak => "FUEL_LEAK",
            FaultCondition::OverspeedCaution => "OVERSPEED_CAUTION",
            FaultCondition::OverheatCaution(ThermalPhase::Start) => "OVERHEAT_CAUTION_START",
            FaultCondition::OverheatCaution(ThermalPhase::Run) => "OVERHEAT_CAUTION_RUN",
            FaultCondition::SpeedSensorSingleFail => "SPEED_SENSOR_SINGLE_FAIL",
            FaultCondition::TempSensorSingleFail => "TEMP_SENSOR_SINGLE_FAIL",
        }
    }

    /// Crew message shown on the alert display.
    pub fn message(&self) -> &'static str {
        match self {
            FaultCondition::SensorAll => "WARNING: DUAL ENG SENSOR FAIL",
            FaultCondition::SensorFuel => "WARNING: FUEL SENSOR FAIL",
            FaultCondition::OverspeedSevere => "WARNING: ENG OVERSPEED",
            FaultCondition::OverheatSevere(ThermalPhase::Start) => "WARNING: EGT CRITICAL (START)",
            FaultCondition::OverheatSevere(ThermalPhase::Run) => "WARNING: EGT CRITICAL",
            FaultCondition::SpeedSensorPairFail => "CAUTION: ENG N1 SENSOR FAIL",
            FaultCondition::TempSensorPairFail => "CAUTION: ENG EGT SENSOR FAIL",
            FaultCondition::LowFuel => "CAUTION: LOW FUEL QTY",
            FaultCondition::FuelLeak => "CAUTION: HIGH FUEL FLOW",
            FaultCondition::OverspeedCaution => "CAUTION: N1 OVERSPEED",
            FaultCondition::OverheatCaution(ThermalPhase::Start) => {
                "CAUTION: EGT OVERHEAT (START)"
            }
            FaultCondition::OverheatCaution(ThermalPhase::Run) => "CAUTION: EGT OVERHEAT",
            FaultCondition::SpeedSensorSingleFail => "ADVISORY: N1 SENSOR FAULT",
            FaultCondition::TempSensorSingleFail => "ADVISORY: EGT SENSOR FAULT",
        }
    }

    /// Returns true if both conditions report on the same physical metric.
    ///
    /// Speed and temperature each have a red and an amber variant; the
    /// evaluator never reports both for one reading.
    pub fn same_metric(&self, other: &FaultCondition) -> bool {
        matches!(
            (self, other),
            (
                FaultCondition::OverspeedSevere | FaultCondition::OverspeedCaution,
                FaultCondition::OverspeedSevere | FaultCondition::OverspeedCaution
            ) | (
                FaultCondition::OverheatSevere(_) | FaultCondition::OverheatCaution(_),
                FaultCondition::OverheatSevere(_) | FaultCondition::OverheatCaution(_)
            )
        )
    }
}

impl fmt::Display for FaultCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl FromStr for FaultCondition {
    type Err = ParseFaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.is_empty() {
            return Err(ParseFaultError::Empty);
        }

        FaultCondition::ALL
            .iter()
            .copied()
            .find(|condition| condition.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ParseFaultError::UnknownCode(code.to_string()))
    }
}

#[cfg(feature = "serde")]
impl Serialize for FaultCondition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for FaultCondition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}
