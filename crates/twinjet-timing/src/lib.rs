//! Fixed-timestep driving for the twinjet simulation.
//!
//! Rendering and input run at whatever rate the host manages; physics and
//! alerting must advance in identical, deterministic steps. The
//! [`FixedStepAccumulator`] bridges the two: wall-clock frame time goes in,
//! whole simulation steps come out.
//!
//! - Each frame's elapsed time is clamped (250 ms by default) before it is
//!   accumulated, so a stalled frame cannot force an unbounded catch-up burst.
//! - The simulation clock only advances when a step is consumed.
//! - All arithmetic is on [`Duration`](core::time::Duration), so 5 ms steps
//!   sum to exact simulated seconds.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use twinjet_timing::FixedStepAccumulator;
//!
//! let mut timer = FixedStepAccumulator::default();
//! timer.push_frame(Duration::from_millis(16));
//!
//! let mut steps = 0;
//! while timer.consume_step() {
//!     steps += 1;
//! }
//! assert_eq!(steps, 3);
//! assert_eq!(timer.sim_time(), Duration::from_millis(15));
//! assert_eq!(timer.pending(), Duration::from_millis(1));
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod accumulator;
pub mod clock;
pub mod error;

pub mod prelude;

pub use accumulator::{DEFAULT_MAX_FRAME, DEFAULT_STEP, FixedStepAccumulator};
pub use clock::WallClock;
pub use error::{TimingError, TimingResult};
