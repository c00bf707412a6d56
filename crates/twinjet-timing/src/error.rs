//! Error types for the timing crate.

use core::time::Duration;

/// Invalid timestep configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TimingError {
    /// The fixed step must be longer than zero.
    #[error("fixed step must be greater than zero")]
    ZeroStep,
    /// The frame clamp must allow at least one whole step per frame.
    #[error("frame clamp {max_frame:?} is shorter than the fixed step {step:?}")]
    FrameClampTooSmall {
        /// Configured fixed step.
        step: Duration,
        /// Configured frame clamp.
        max_frame: Duration,
    },
}

/// Result type for timing setup.
pub type TimingResult<T = ()> = Result<T, TimingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = TimingError::FrameClampTooSmall {
            step: Duration::from_millis(5),
            max_frame: Duration::from_millis(1),
        };
        assert_eq!(
            err.to_string(),
            "frame clamp 1ms is shorter than the fixed step 5ms"
        );
        assert_eq!(
            TimingError::ZeroStep.to_string(),
            "fixed step must be greater than zero"
        );
    }
}
