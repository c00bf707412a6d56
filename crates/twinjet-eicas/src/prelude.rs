//! Prelude for convenient imports.
//!
//! ```rust
//! use twinjet_eicas::prelude::*;
//! ```

pub use crate::{
    ActiveAlert, AlertQueue, AlertThresholds, ConditionSet, DEFAULT_DISPLAY_WINDOW, Eicas,
    EicasError, EicasOutput, EicasResult, TemperatureLimits, evaluate, first_critical,
    requires_shutdown,
};
pub use twinjet_faults::{FaultCondition, SeverityBand, ThermalPhase};
