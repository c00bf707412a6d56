//! Monotonic wall clock producing frame durations.

use std::time::{Duration, Instant};

/// Measures the wall time between successive frames.
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    last: Instant,
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClock {
    /// Start measuring from now.
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Time since the previous call (or since construction).
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        elapsed
    }

    /// Restart measuring from now.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lap_is_monotonic() {
        let mut clock = WallClock::new();
        std::thread::sleep(Duration::from_millis(2));
        let first = clock.lap();
        assert!(first >= Duration::from_millis(2));

        let second = clock.lap();
        assert!(second < first + Duration::from_secs(1));
    }
}
