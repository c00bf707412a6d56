//! Stateless raw-condition detection.

use twinjet_faults::{CONDITION_COUNT, FaultCondition};
use twinjet_sim::{EngineSide, LifecycleState, ObservedData};

use crate::AlertThresholds;

/// Ordered set of conditions, at most one of each.
pub type ConditionSet = heapless::Vec<FaultCondition, CONDITION_COUNT>;

pub(crate) fn push_unique(set: &mut ConditionSet, condition: FaultCondition) {
    if set.contains(&condition) {
        return;
    }
    if let Err(rejected) = set.push(condition) {
        tracing::warn!(fault = rejected.code(), "Condition set full, dropping");
    }
}

/// Conditions that hold for `observed` in `state`, red band first.
///
/// Re-run from scratch every tick. Speed and temperature never report both
/// their red and amber variant in the same call. Non-finite readings never
/// trip a limit.
pub fn evaluate(
    observed: &ObservedData,
    state: LifecycleState,
    thresholds: &AlertThresholds,
) -> ConditionSet {
    let mut raw = ConditionSet::new();
    let sensors = &observed.sensors;
    let speed_lost = |n: u8| {
        EngineSide::BOTH
            .iter()
            .any(|&s| sensors.speed(s).invalid_count() == n)
    };
    let temp_lost = |n: u8| {
        EngineSide::BOTH
            .iter()
            .any(|&s| sensors.temperature(s).invalid_count() == n)
    };
    let speed_above = |limit: f64| {
        EngineSide::BOTH
            .iter()
            .any(|&s| observed.speed_percent(s) > limit)
    };
    let egt_above = |limit: f64| EngineSide::BOTH.iter().any(|&s| observed.egt(s) > limit);
    let egt = thresholds.temperature_limits(state);

    // Red
    let everything_lost = EngineSide::BOTH.iter().all(|&s| {
        sensors.speed(s).invalid_count() == 2 && sensors.temperature(s).invalid_count() == 2
    });
    if everything_lost {
        push_unique(&mut raw, FaultCondition::SensorAll);
    }
    if !sensors.fuel {
        push_unique(&mut raw, FaultCondition::SensorFuel);
    }
    let speed_red = speed_above(thresholds.speed_red_percent);
    if speed_red {
        push_unique(&mut raw, FaultCondition::OverspeedSevere);
    }
    let egt_red = egt_above(egt.red);
    if egt_red {
        push_unique(&mut raw, FaultCondition::OverheatSevere(egt.phase));
    }

    // Amber
    if speed_lost(2) {
        push_unique(&mut raw, FaultCondition::SpeedSensorPairFail);
    }
    if temp_lost(2) {
        push_unique(&mut raw, FaultCondition::TempSensorPairFail);
    }
    if observed.fuel_quantity < thresholds.low_fuel {
        push_unique(&mut raw, FaultCondition::LowFuel);
    }
    if observed.fuel_flow > thresholds.high_fuel_flow {
        push_unique(&mut raw, FaultCondition::FuelLeak);
    }
    if !speed_red && speed_above(thresholds.speed_amber_percent) {
        push_unique(&mut raw, FaultCondition::OverspeedCaution);
    }
    if !egt_red && egt_above(egt.amber) {
        push_unique(&mut raw, FaultCondition::OverheatCaution(egt.phase));
    }

    // White
    if speed_lost(1) {
        push_unique(&mut raw, FaultCondition::SpeedSensorSingleFail);
    }
    if temp_lost(1) {
        push_unique(&mut raw, FaultCondition::TempSensorSingleFail);
    }

    raw
}

#[cfg(test)]
mod tests {
    use super::*;
    use twinjet_faults::ThermalPhase;
    use twinjet_sim::{EngineTruth, SensorSlot, SimConfig};

    fn running() -> ObservedData {
        let mut truth = EngineTruth::at_rest(&SimConfig::default());
        truth.rpm_left = 39_000.0;
        truth.rpm_right = 39_000.0;
        truth.egt_left = 700.0;
        truth.egt_right = 700.0;
        truth.fuel_flow = 40.0;
        ObservedData::from_truth(&truth, 40_000.0)
    }

    fn eval(observed: &ObservedData, state: LifecycleState) -> ConditionSet {
        evaluate(observed, state, &AlertThresholds::default())
    }

    #[test]
    fn test_nominal_is_empty() {
        assert!(eval(&running(), LifecycleState::Running).is_empty());
    }

    #[test]
    fn test_overspeed_red_suppresses_amber() {
        let mut observed = running();
        observed.speed_percent_left = 125.0;
        let raw = eval(&observed, LifecycleState::Running);
        assert_eq!(raw.as_slice(), &[FaultCondition::OverspeedSevere]);
    }

    #[test]
    fn test_overspeed_amber_band() {
        let mut observed = running();
        observed.speed_percent_right = 110.0;
        let raw = eval(&observed, LifecycleState::Running);
        assert_eq!(raw.as_slice(), &[FaultCondition::OverspeedCaution]);
    }

    #[test]
    fn test_limits_are_strict() {
        let mut observed = running();
        observed.speed_percent_left = 105.0;
        observed.egt_left = 950.0;
        observed.fuel_quantity = 500.0;
        observed.fuel_flow = 50.0;
        assert!(eval(&observed, LifecycleState::Running).is_empty());
    }

    #[test]
    fn test_egt_limits_follow_state() {
        let mut observed = running();
        observed.egt_left = 900.0;
        assert_eq!(
            eval(&observed, LifecycleState::Starting).as_slice(),
            &[FaultCondition::OverheatCaution(ThermalPhase::Start)]
        );
        assert!(eval(&observed, LifecycleState::Running).is_empty());

        observed.egt_left = 1050.0;
        assert_eq!(
            eval(&observed, LifecycleState::Starting).as_slice(),
            &[FaultCondition::OverheatSevere(ThermalPhase::Start)]
        );
        assert_eq!(
            eval(&observed, LifecycleState::Stopping).as_slice(),
            &[FaultCondition::OverheatCaution(ThermalPhase::Run)]
        );
    }

    #[test]
    fn test_pair_fail_omits_single_fail() {
        let mut observed = running();
        observed
            .sensors
            .speed_mut(EngineSide::Left)
            .invalidate(SensorSlot::A);
        observed
            .sensors
            .speed_mut(EngineSide::Left)
            .invalidate(SensorSlot::B);
        assert_eq!(
            eval(&observed, LifecycleState::Running).as_slice(),
            &[FaultCondition::SpeedSensorPairFail]
        );
    }

    #[test]
    fn test_single_fail_on_each_side_reports_once() {
        let mut observed = running();
        for side in EngineSide::BOTH {
            observed.sensors.temperature_mut(side).invalidate(SensorSlot::B);
        }
        assert_eq!(
            eval(&observed, LifecycleState::Running).as_slice(),
            &[FaultCondition::TempSensorSingleFail]
        );
    }

    #[test]
    fn test_pair_on_one_side_single_on_other() {
        let mut observed = running();
        observed.sensors.speed_left.a = false;
        observed.sensors.speed_left.b = false;
        observed.sensors.speed_right.a = false;
        assert_eq!(
            eval(&observed, LifecycleState::Running).as_slice(),
            &[
                FaultCondition::SpeedSensorPairFail,
                FaultCondition::SpeedSensorSingleFail
            ]
        );
    }

    #[test]
    fn test_severity_order() {
        let mut observed = running();
        observed.sensors.fuel = false;
        observed.sensors.temp_right.a = false;
        observed.fuel_quantity = 100.0;
        observed.speed_percent_left = 130.0;
        let raw = eval(&observed, LifecycleState::Running);
        assert_eq!(
            raw.as_slice(),
            &[
                FaultCondition::SensorFuel,
                FaultCondition::OverspeedSevere,
                FaultCondition::LowFuel,
                FaultCondition::TempSensorSingleFail,
            ]
        );
    }

    #[test]
    fn test_nan_readings_trip_nothing() {
        let mut observed = running();
        observed.speed_percent_left = f64::NAN;
        observed.egt_right = f64::NAN;
        observed.fuel_quantity = f64::NAN;
        observed.fuel_flow = f64::NAN;
        assert!(eval(&observed, LifecycleState::Running).is_empty());
    }

    #[test]
    fn test_push_unique_dedupes() {
        let mut set = ConditionSet::new();
        push_unique(&mut set, FaultCondition::LowFuel);
        push_unique(&mut set, FaultCondition::LowFuel);
        assert_eq!(set.len(), 1);
    }
}
