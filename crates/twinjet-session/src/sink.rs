//! Per-tick output consumers.

use std::time::Duration;

use twinjet_eicas::ConditionSet;
use twinjet_sim::{LifecycleState, ObservedData};

use crate::SessionResult;

/// Everything collaborators need to know about one simulation tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Simulation time at the end of the tick.
    pub time: Duration,
    /// Lifecycle state after the tick (and after any auto-shutdown).
    pub state: LifecycleState,
    /// Sensor snapshot produced by the tick.
    pub observed: ObservedData,
    /// Conditions true this tick, in severity order.
    pub raw: ConditionSet,
    /// Conditions on the display.
    pub visible: ConditionSet,
    /// Conditions raised or re-triggered this tick.
    pub raised: ConditionSet,
    /// Conditions that dropped off the display this tick.
    pub expired: ConditionSet,
    /// Running with both speeds at or above the stabilization threshold.
    pub stabilized: bool,
    /// The auto-protection policy stopped the engines this tick.
    pub auto_shutdown: bool,
}

/// Receives every [`TickReport`] a session produces.
pub trait TickSink {
    /// Consume one report.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot accept the report (for example a
    /// failed write); the session stops and propagates it.
    fn record(&mut self, report: &TickReport) -> SessionResult<()>;
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TickSink for NullSink {
    fn record(&mut self, _report: &TickReport) -> SessionResult<()> {
        Ok(())
    }
}

impl TickSink for Vec<TickReport> {
    fn record(&mut self, report: &TickReport) -> SessionResult<()> {
        self.push(report.clone());
        Ok(())
    }
}

impl<S: TickSink + ?Sized> TickSink for &mut S {
    fn record(&mut self, report: &TickReport) -> SessionResult<()> {
        (**self).record(report)
    }
}

impl<A: TickSink, B: TickSink> TickSink for (A, B) {
    fn record(&mut self, report: &TickReport) -> SessionResult<()> {
        self.0.record(report)?;
        self.1.record(report)
    }
}

impl<S: TickSink> TickSink for Option<S> {
    fn record(&mut self, report: &TickReport) -> SessionResult<()> {
        match self {
            Some(sink) => sink.record(report),
            None => Ok(()),
        }
    }
}
