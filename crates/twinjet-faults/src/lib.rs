//! Crew-alerting fault taxonomy for the twinjet EICAS trainer.
//!
//! Every problem the alerting logic can report is a value of the closed
//! [`FaultCondition`] enumeration. Conditions are partitioned into three
//! [`SeverityBand`]s whose order doubles as on-screen priority:
//!
//! ```text
//! ┌───────────┐   ┌───────────┐   ┌───────────┐
//! │    RED    │ > │   AMBER   │ > │   WHITE   │
//! │ (warning) │   │ (caution) │   │ (advisory)│
//! └───────────┘   └───────────┘   └───────────┘
//! ```
//!
//! The same taxonomy is shared by the simulator (fault injection overlays),
//! the evaluator (detection) and the display queue, so each of those crates
//! depends on this one and nothing here depends on them.
//!
//! # Example
//!
//! ```rust
//! use twinjet_faults::{FaultCondition, SeverityBand};
//!
//! let condition: FaultCondition = "OVERSPEED_SEVERE".parse()?;
//! assert_eq!(condition.band(), SeverityBand::Red);
//! assert!(condition.is_critical());
//! assert_eq!(condition.to_string(), "WARNING: ENG OVERSPEED");
//! # Ok::<(), twinjet_faults::ParseFaultError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod condition;
mod error;

pub mod prelude;

pub use condition::{CONDITION_COUNT, FaultCondition, SeverityBand, ThermalPhase};
pub use error::ParseFaultError;
