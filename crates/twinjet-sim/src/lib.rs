//! Twin-engine physics and sensor fault-injection simulator.
//!
//! The simulator owns the physical ground truth of both engines
//! ([`EngineTruth`]) and advances it once per fixed tick through the
//! start/run/stop lifecycle. After every tick it derives a separate
//! [`ObservedData`] snapshot, which is what the sensors report and what the
//! alerting logic sees. Injected faults only ever distort the observed view;
//! the truth keeps evolving undisturbed underneath.
//!
//! # Lifecycle
//!
//! ```text
//!            start()                 speed >= 95% rated
//!   ┌─────┐ ────────► ┌──────────┐ ─────────────────────► ┌─────────┐
//!   │ OFF │           │ STARTING │                        │ RUNNING │
//!   └─────┘ ◄──┐      └──────────┘                        └─────────┘
//!              │        │     ▲ start()                        │
//!   timeout    │ stop() │     │            stop() / fuel out   │
//!   (10 s)     │        ▼     │                                │
//!              │      ┌──────────┐ ◄──────────────────────────┘
//!              └───── │ STOPPING │
//!                     └──────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use core::time::Duration;
//! use twinjet_sim::{LifecycleState, PhysicsSimulator, SimConfig};
//!
//! let mut sim = PhysicsSimulator::with_seed(SimConfig::default(), 7)?;
//! sim.start();
//! while sim.state() == LifecycleState::Starting {
//!     sim.tick(Duration::from_millis(5));
//! }
//! assert_eq!(sim.state(), LifecycleState::Running);
//! # Ok::<(), twinjet_sim::SimError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod config;
mod error;
mod lifecycle;
mod observed;
mod overlay;
mod simulator;
mod truth;

pub mod prelude;

pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use lifecycle::{LifecycleState, ThrustDirection};
pub use observed::{EngineSide, ObservedData, SensorPair, SensorSlot, SensorValidity};
pub use overlay::{Distortion, apply_overlay, distortions};
pub use simulator::PhysicsSimulator;
pub use truth::EngineTruth;
