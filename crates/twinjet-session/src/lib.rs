//! Session pipeline for the twinjet EICAS trainer.
//!
//! A [`Session`] wires the physics simulator, the alerting system and a
//! fixed-step clock into one tick pipeline:
//!
//! ```text
//!  frame time ──► FixedStepAccumulator ──► step() ──► TickReport ──► TickSink
//!                                            │
//!         Command ──► PhysicsSimulator ──► ObservedData ──► Eicas
//!                            ▲                               │
//!                            └──── stop() ◄── auto-protection┘
//! ```
//!
//! Around it sit the pieces needed to drive a session from files:
//! [`SessionConfig`] (layered YAML/JSON settings), [`Scenario`] (timed
//! commands for headless runs) and [`CsvRecorder`] (the flight log).
//!
//! # Example
//!
//! ```rust
//! use twinjet_session::{NullSink, Scenario, Session, SessionConfig};
//! use twinjet_sim::LifecycleState;
//!
//! let scenario = Scenario::from_yaml_str(
//!     "name: start\nduration_secs: 10.0\nevents:\n  - { at_secs: 0.0, command: start }\n",
//! )?;
//! let config = SessionConfig { seed: Some(1), ..SessionConfig::default() };
//! let mut session = Session::new(&config)?;
//! let summary = session.run_scenario(&scenario, NullSink)?;
//! assert_eq!(summary.ticks, 2_000);
//! assert_eq!(summary.final_state, LifecycleState::Running);
//! # Ok::<(), twinjet_session::SessionError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod command;
mod config;
mod document;
mod error;
mod recorder;
mod scenario;
mod session;
mod sink;

pub mod prelude;

pub use command::Command;
pub use config::SessionConfig;
pub use document::{DocumentFormat, load_document};
pub use error::{SessionError, SessionResult};
pub use recorder::{ALERT_REPEAT_INTERVAL, AUTO_SHUTDOWN_MESSAGE, CSV_HEADER, CsvRecorder};
pub use scenario::{Scenario, ScenarioEvent};
pub use session::{RaisedAlert, ScenarioSummary, Session};
pub use sink::{NullSink, TickReport, TickSink};
