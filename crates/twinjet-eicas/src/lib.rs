//! Engine indication and crew alerting for the twinjet trainer.
//!
//! Two pieces run once per simulation tick:
//!
//! - [`evaluate`]: a pure function from an [`ObservedData`] snapshot and the
//!   [`LifecycleState`] to the set of raw [`FaultCondition`]s that are true
//!   right now, in severity order (red, then amber, then white).
//! - [`AlertQueue`]: stateful rising-edge detection over those raw sets. A
//!   condition that appears is displayed for a fixed window (5 s by default)
//!   and then drops off, even if it is still true.
//!
//! ```text
//! ObservedData ──► evaluate() ──► raw ──► AlertQueue::update() ──► visible
//!                       ▲                          │
//!               AlertThresholds            requires_shutdown()
//! ```
//!
//! [`Eicas`] bundles both behind a single `process` call.
//!
//! # Example
//!
//! ```rust
//! use core::time::Duration;
//! use twinjet_eicas::Eicas;
//! use twinjet_sim::{EngineTruth, LifecycleState, ObservedData, SimConfig};
//! use twinjet_faults::FaultCondition;
//!
//! let config = SimConfig::default();
//! let mut observed = ObservedData::from_truth(&EngineTruth::at_rest(&config), 40_000.0);
//! observed.sensors.fuel = false;
//!
//! let mut eicas = Eicas::default();
//! let output = eicas.process(&observed, LifecycleState::Running, Duration::ZERO);
//! assert_eq!(output.visible.as_slice(), &[FaultCondition::SensorFuel]);
//! ```
//!
//! [`ObservedData`]: twinjet_sim::ObservedData
//! [`LifecycleState`]: twinjet_sim::LifecycleState
//! [`FaultCondition`]: twinjet_faults::FaultCondition

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod eicas;
mod error;
mod evaluator;
mod protection;
mod queue;
mod thresholds;

pub mod prelude;

pub use eicas::{Eicas, EicasOutput};
pub use error::{EicasError, EicasResult};
pub use evaluator::{ConditionSet, evaluate};
pub use protection::{first_critical, requires_shutdown};
pub use queue::{ActiveAlert, AlertQueue, DEFAULT_DISPLAY_WINDOW};
pub use thresholds::{AlertThresholds, TemperatureLimits};
