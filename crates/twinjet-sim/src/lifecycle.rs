//! Engine lifecycle states and crew commands.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lifecycle state of the powerplant.
///
/// Owned by [`PhysicsSimulator`](crate::PhysicsSimulator); changed only by
/// `start`, `stop`, and the simulator's internal transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum LifecycleState {
    /// Engines at rest.
    #[default]
    Off,
    /// Spool-up in progress.
    Starting,
    /// Steady state.
    Running,
    /// Spool-down in progress.
    Stopping,
}

impl LifecycleState {
    /// Returns true for the states that run a phase timer.
    pub fn is_transient(&self) -> bool {
        matches!(self, LifecycleState::Starting | LifecycleState::Stopping)
    }

    /// Returns true if the engines are shut down or already on their way down.
    pub fn is_shutting_down(&self) -> bool {
        matches!(self, LifecycleState::Off | LifecycleState::Stopping)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Off => write!(f, "OFF"),
            LifecycleState::Starting => write!(f, "STARTING"),
            LifecycleState::Running => write!(f, "RUNNING"),
            LifecycleState::Stopping => write!(f, "STOPPING"),
        }
    }
}

/// Direction of a thrust lever nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ThrustDirection {
    /// Thrust up.
    Increase,
    /// Thrust down.
    Decrease,
}

impl ThrustDirection {
    /// Sign applied to the relative step.
    pub fn sign(&self) -> f64 {
        match self {
            ThrustDirection::Increase => 1.0,
            ThrustDirection::Decrease => -1.0,
        }
    }
}
