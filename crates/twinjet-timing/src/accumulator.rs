//! Fixed-timestep accumulator with frame clamping.

use core::time::Duration;

use crate::error::{TimingError, TimingResult};

/// Default simulation step (5 ms, 200 Hz).
pub const DEFAULT_STEP: Duration = Duration::from_millis(5);

/// Default clamp applied to one frame's elapsed time.
pub const DEFAULT_MAX_FRAME: Duration = Duration::from_millis(250);

/// Converts variable frame times into whole fixed simulation steps.
///
/// Call [`push_frame`](Self::push_frame) once per rendered frame, then drain
/// with [`consume_step`](Self::consume_step) until it returns `false`.
/// Leftover time carries over to the next frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedStepAccumulator {
    step: Duration,
    max_frame: Duration,
    pending: Duration,
    sim_time: Duration,
    steps: u64,
    clamped_frames: u64,
}

impl Default for FixedStepAccumulator {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            max_frame: DEFAULT_MAX_FRAME,
            pending: Duration::ZERO,
            sim_time: Duration::ZERO,
            steps: 0,
            clamped_frames: 0,
        }
    }
}

impl FixedStepAccumulator {
    /// Create an accumulator with a custom step and frame clamp.
    ///
    /// # Errors
    ///
    /// Returns [`TimingError::ZeroStep`] for a zero step and
    /// [`TimingError::FrameClampTooSmall`] if `max_frame < step`.
    pub fn new(step: Duration, max_frame: Duration) -> TimingResult<Self> {
        if step.is_zero() {
            return Err(TimingError::ZeroStep);
        }
        if max_frame < step {
            return Err(TimingError::FrameClampTooSmall { step, max_frame });
        }
        Ok(Self {
            step,
            max_frame,
            ..Self::default()
        })
    }

    /// Accumulate one frame's elapsed wall time, clamped to the frame limit.
    ///
    /// Returns the amount actually accumulated.
    pub fn push_frame(&mut self, elapsed: Duration) -> Duration {
        let accepted = if elapsed > self.max_frame {
            self.clamped_frames = self.clamped_frames.saturating_add(1);
            tracing::debug!(?elapsed, max_frame = ?self.max_frame, "Frame time clamped");
            self.max_frame
        } else {
            elapsed
        };
        self.pending = self.pending.saturating_add(accepted);
        accepted
    }

    /// Drain one step if enough time is pending.
    ///
    /// The simulation clock advances by exactly one step on success.
    pub fn consume_step(&mut self) -> bool {
        match self.pending.checked_sub(self.step) {
            Some(rest) => {
                self.pending = rest;
                self.sim_time = self.sim_time.saturating_add(self.step);
                self.steps = self.steps.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Advance the simulation clock by one step without drawing on pending
    /// frame time.
    ///
    /// Used by headless runs that tick as fast as possible. Returns the new
    /// simulation time.
    pub fn advance_step(&mut self) -> Duration {
        self.sim_time = self.sim_time.saturating_add(self.step);
        self.steps = self.steps.saturating_add(1);
        self.sim_time
    }

    /// Number of whole steps currently pending.
    pub fn steps_available(&self) -> u128 {
        self.pending.as_nanos() / self.step.as_nanos()
    }

    /// Simulated time advanced so far.
    pub fn sim_time(&self) -> Duration {
        self.sim_time
    }

    /// Fixed step length.
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Frame clamp.
    pub fn max_frame(&self) -> Duration {
        self.max_frame
    }

    /// Accumulated time not yet consumed.
    pub fn pending(&self) -> Duration {
        self.pending
    }

    /// Total steps consumed.
    pub fn steps_consumed(&self) -> u64 {
        self.steps
    }

    /// Frames whose elapsed time exceeded the clamp.
    pub fn clamped_frames(&self) -> u64 {
        self.clamped_frames
    }

    /// Drop pending time and rewind the simulation clock to zero.
    pub fn reset(&mut self) {
        self.pending = Duration::ZERO;
        self.sim_time = Duration::ZERO;
        self.steps = 0;
        self.clamped_frames = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates() {
        assert_eq!(
            FixedStepAccumulator::new(Duration::ZERO, DEFAULT_MAX_FRAME),
            Err(TimingError::ZeroStep)
        );
        assert_eq!(
            FixedStepAccumulator::new(Duration::from_millis(10), Duration::from_millis(5)),
            Err(TimingError::FrameClampTooSmall {
                step: Duration::from_millis(10),
                max_frame: Duration::from_millis(5),
            })
        );
        assert!(FixedStepAccumulator::new(Duration::from_millis(5), Duration::from_millis(5)).is_ok());
    }

    #[test]
    fn test_clock_only_moves_on_consume() {
        let mut acc = FixedStepAccumulator::default();
        acc.push_frame(Duration::from_millis(4));
        assert!(!acc.consume_step());
        assert_eq!(acc.sim_time(), Duration::ZERO);

        acc.push_frame(Duration::from_millis(1));
        assert!(acc.consume_step());
        assert_eq!(acc.sim_time(), Duration::from_millis(5));
        assert_eq!(acc.pending(), Duration::ZERO);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut acc = FixedStepAccumulator::default();
        let accepted = acc.push_frame(Duration::from_secs(3));
        assert_eq!(accepted, DEFAULT_MAX_FRAME);
        assert_eq!(acc.clamped_frames(), 1);
        assert_eq!(acc.steps_available(), 50);

        let mut n = 0;
        while acc.consume_step() {
            n += 1;
        }
        assert_eq!(n, 50);
        assert_eq!(acc.sim_time(), Duration::from_millis(250));
    }

    #[test]
    fn test_exact_seconds_after_many_steps() {
        let mut acc = FixedStepAccumulator::default();
        for _ in 0..2_000 {
            acc.push_frame(DEFAULT_STEP);
            assert!(acc.consume_step());
        }
        assert_eq!(acc.sim_time(), Duration::from_secs(10));
        assert_eq!(acc.steps_consumed(), 2_000);
    }

    #[test]
    fn test_advance_step_leaves_pending_untouched() {
        let mut acc = FixedStepAccumulator::default();
        acc.push_frame(Duration::from_millis(3));
        assert_eq!(acc.advance_step(), Duration::from_millis(5));
        assert_eq!(acc.advance_step(), Duration::from_millis(10));
        assert_eq!(acc.steps_consumed(), 2);
        assert_eq!(acc.pending(), Duration::from_millis(3));

        acc.push_frame(Duration::from_millis(2));
        assert!(acc.consume_step());
        assert_eq!(acc.sim_time(), Duration::from_millis(15));
        assert_eq!(acc.steps_consumed(), 3);
    }

    #[test]
    fn test_reset() {
        let mut acc = FixedStepAccumulator::default();
        acc.push_frame(Duration::from_millis(12));
        acc.consume_step();
        acc.reset();
        assert_eq!(acc.sim_time(), Duration::ZERO);
        assert_eq!(acc.pending(), Duration::ZERO);
        assert_eq!(acc.step(), DEFAULT_STEP);
    }
}
