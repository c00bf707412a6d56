//! Prelude for convenient imports.

pub use crate::accumulator::{DEFAULT_MAX_FRAME, DEFAULT_STEP, FixedStepAccumulator};
pub use crate::clock::WallClock;
pub use crate::error::{TimingError, TimingResult};
