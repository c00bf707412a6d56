//! Automatic engine protection policy.

use twinjet_faults::FaultCondition;
use twinjet_sim::LifecycleState;

/// First critical condition among `visible`, if any.
pub fn first_critical(visible: &[FaultCondition]) -> Option<FaultCondition> {
    visible.iter().copied().find(FaultCondition::is_critical)
}

/// Returns true when a critical alert is displayed while the engines are
/// still turning under power (neither OFF nor already STOPPING).
pub fn requires_shutdown(visible: &[FaultCondition], state: LifecycleState) -> bool {
    !state.is_shutting_down() && first_critical(visible).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use twinjet_faults::ThermalPhase;

    #[test]
    fn test_critical_conditions_trigger_shutdown() {
        for condition in [
            FaultCondition::SensorAll,
            FaultCondition::OverspeedSevere,
            FaultCondition::OverheatSevere(ThermalPhase::Start),
            FaultCondition::OverheatSevere(ThermalPhase::Run),
        ] {
            assert!(requires_shutdown(&[condition], LifecycleState::Running));
            assert!(requires_shutdown(&[condition], LifecycleState::Starting));
        }
    }

    #[test]
    fn test_non_critical_conditions_do_not() {
        let visible = [
            FaultCondition::SensorFuel,
            FaultCondition::LowFuel,
            FaultCondition::OverspeedCaution,
            FaultCondition::SpeedSensorPairFail,
        ];
        assert!(!requires_shutdown(&visible, LifecycleState::Running));
        assert_eq!(first_critical(&visible), None);
    }

    #[test]
    fn test_already_shutting_down() {
        let visible = [FaultCondition::OverspeedSevere];
        assert!(!requires_shutdown(&visible, LifecycleState::Stopping));
        assert!(!requires_shutdown(&visible, LifecycleState::Off));
    }

    #[test]
    fn test_first_critical_respects_order() {
        let visible = [
            FaultCondition::LowFuel,
            FaultCondition::OverheatSevere(ThermalPhase::Run),
            FaultCondition::SensorAll,
        ];
        assert_eq!(
            first_critical(&visible),
            Some(FaultCondition::OverheatSevere(ThermalPhase::Run))
        );
    }
}
