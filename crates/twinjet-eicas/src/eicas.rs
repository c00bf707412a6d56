//! Evaluator and display queue behind one call.

use core::time::Duration;

use twinjet_faults::FaultCondition;
use twinjet_sim::{LifecycleState, ObservedData};

use crate::{AlertQueue, AlertThresholds, ConditionSet, EicasError, evaluate, requires_shutdown};

/// Result of one [`Eicas::process`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EicasOutput {
    /// Conditions true this tick, in severity order.
    pub raw: ConditionSet,
    /// Conditions on the display, in insertion order.
    pub visible: ConditionSet,
}

impl EicasOutput {
    /// Returns true if the auto-protection policy demands a shutdown.
    pub fn requires_shutdown(&self, state: LifecycleState) -> bool {
        requires_shutdown(&self.visible, state)
    }

    /// Conditions that became visible in this output but not in `previous`.
    pub fn newly_visible<'a>(
        &'a self,
        previous: &'a EicasOutput,
    ) -> impl Iterator<Item = FaultCondition> + 'a {
        self.visible
            .iter()
            .copied()
            .filter(|c| !previous.visible.contains(c))
    }
}

/// Engine indication and crew alerting system.
#[derive(Debug, Clone, Default)]
pub struct Eicas {
    thresholds: AlertThresholds,
    queue: AlertQueue,
}

impl Eicas {
    /// Create an alerting system with custom thresholds and display window.
    ///
    /// # Errors
    ///
    /// Returns [`EicasError`] if the thresholds fail validation or the
    /// window is zero.
    pub fn new(thresholds: AlertThresholds, window: Duration) -> Result<Self, EicasError> {
        thresholds.validate()?;
        Ok(Self {
            thresholds,
            queue: AlertQueue::with_window(window)?,
        })
    }

    /// Evaluate `observed` and update the display at simulation time `now`.
    pub fn process(
        &mut self,
        observed: &ObservedData,
        state: LifecycleState,
        now: Duration,
    ) -> EicasOutput {
        let raw = evaluate(observed, state, &self.thresholds);
        let visible = self.queue.update(&raw, now);
        EicasOutput { raw, visible }
    }

    /// Thresholds in use.
    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }

    /// Display queue.
    pub fn queue(&self) -> &AlertQueue {
        &self.queue
    }

    /// Clear the display and forget the previous tick.
    pub fn reset(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twinjet_sim::{EngineTruth, SimConfig};

    fn idle() -> ObservedData {
        ObservedData::from_truth(&EngineTruth::at_rest(&SimConfig::default()), 40_000.0)
    }

    #[test]
    fn test_new_validates() {
        let bad = AlertThresholds {
            low_fuel: -1.0,
            ..AlertThresholds::default()
        };
        assert!(Eicas::new(bad, Duration::from_secs(5)).is_err());
        assert!(Eicas::new(AlertThresholds::default(), Duration::ZERO).is_err());
    }

    #[test]
    fn test_process_feeds_queue() {
        let mut eicas = Eicas::default();
        let mut observed = idle();
        observed.speed_percent_left = 130.0;

        let output = eicas.process(&observed, LifecycleState::Running, Duration::ZERO);
        assert_eq!(output.raw.as_slice(), &[FaultCondition::OverspeedSevere]);
        assert_eq!(output.visible.as_slice(), &[FaultCondition::OverspeedSevere]);
        assert!(output.requires_shutdown(LifecycleState::Running));
        assert!(eicas.queue().is_active(FaultCondition::OverspeedSevere));

        eicas.reset();
        assert!(eicas.queue().active().is_empty());
    }

    #[test]
    fn test_newly_visible() {
        let mut eicas = Eicas::default();
        let mut observed = idle();
        observed.fuel_quantity = 100.0;
        let first = eicas.process(&observed, LifecycleState::Running, Duration::ZERO);

        observed.sensors.fuel = false;
        let second = eicas.process(&observed, LifecycleState::Running, Duration::from_millis(5));
        let fresh: Vec<_> = second.newly_visible(&first).collect();
        assert_eq!(fresh, vec![FaultCondition::SensorFuel]);
    }
}
