//! Rising-edge alert display queue.

use core::time::Duration;

use twinjet_faults::{CONDITION_COUNT, FaultCondition};

use crate::evaluator::push_unique;
use crate::{ConditionSet, EicasError};

/// How long an alert stays on the display after its rising edge.
pub const DEFAULT_DISPLAY_WINDOW: Duration = Duration::from_secs(5);

/// A condition currently on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveAlert {
    /// The displayed condition.
    pub condition: FaultCondition,
    /// Simulation time of the latest rising edge.
    pub raised_at: Duration,
    /// Simulation time after which the alert is removed.
    pub expire_at: Duration,
}

/// Turns per-tick raw condition sets into the list of visible alerts.
///
/// A condition is shown when it newly appears (absent last tick, present
/// now) and stays for the display window. Staying true does not extend the
/// window; only a fresh rising edge does. Alerts are listed in the order
/// they were first raised.
#[derive(Debug, Clone)]
pub struct AlertQueue {
    window: Duration,
    previous: ConditionSet,
    alerts: heapless::Vec<ActiveAlert, CONDITION_COUNT>,
}

impl Default for AlertQueue {
    fn default() -> Self {
        Self {
            window: DEFAULT_DISPLAY_WINDOW,
            previous: ConditionSet::new(),
            alerts: heapless::Vec::new(),
        }
    }
}

impl AlertQueue {
    /// Create a queue with the default five second window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a queue with a custom display window.
    ///
    /// # Errors
    ///
    /// Returns [`EicasError::ZeroDisplayWindow`] if `window` is zero.
    pub fn with_window(window: Duration) -> Result<Self, EicasError> {
        if window.is_zero() {
            return Err(EicasError::ZeroDisplayWindow);
        }
        Ok(Self {
            window,
            ..Self::default()
        })
    }

    /// Feed this tick's raw conditions and return what should be visible.
    pub fn update(&mut self, raw: &[FaultCondition], now: Duration) -> ConditionSet {
        for &condition in raw {
            if self.previous.contains(&condition) {
                continue;
            }
            let expire_at = now.saturating_add(self.window);
            if let Some(alert) = self.alerts.iter_mut().find(|a| a.condition == condition) {
                alert.raised_at = now;
                alert.expire_at = expire_at;
                tracing::debug!(fault = condition.code(), ?now, "Alert re-triggered");
            } else if self
                .alerts
                .push(ActiveAlert {
                    condition,
                    raised_at: now,
                    expire_at,
                })
                .is_ok()
            {
                tracing::debug!(fault = condition.code(), ?now, "Alert raised");
            }
        }

        self.alerts.retain(|alert| {
            let keep = alert.expire_at >= now;
            if !keep {
                tracing::trace!(fault = alert.condition.code(), ?now, "Alert expired");
            }
            keep
        });

        self.previous.clear();
        for &condition in raw {
            push_unique(&mut self.previous, condition);
        }

        self.visible()
    }

    /// Conditions currently displayed, in insertion order.
    pub fn visible(&self) -> ConditionSet {
        let mut visible = ConditionSet::new();
        for alert in &self.alerts {
            push_unique(&mut visible, alert.condition);
        }
        visible
    }

    /// Alerts currently displayed.
    pub fn active(&self) -> &[ActiveAlert] {
        &self.alerts
    }

    /// Returns true if `condition` is on the display.
    pub fn is_active(&self, condition: FaultCondition) -> bool {
        self.alerts.iter().any(|a| a.condition == condition)
    }

    /// Raw conditions seen on the last update.
    pub fn previous(&self) -> &[FaultCondition] {
        &self.previous
    }

    /// Display window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Forget every alert and the previous raw set.
    pub fn clear(&mut self) {
        self.alerts.clear();
        self.previous.clear();
    }
}
