//! Prelude for convenient imports.
//!
//! ```rust
//! use twinjet_faults::prelude::*;
//! ```

pub use crate::{CONDITION_COUNT, FaultCondition, ParseFaultError, SeverityBand, ThermalPhase};
