//! Prelude for convenient imports.
//!
//! ```rust
//! use twinjet_session::prelude::*;
//! ```

pub use crate::{
    Command, CsvRecorder, NullSink, Scenario, ScenarioEvent, ScenarioSummary, Session,
    SessionConfig, SessionError, SessionResult, TickReport, TickSink,
};
pub use twinjet_eicas::{AlertThresholds, ConditionSet};
pub use twinjet_faults::{FaultCondition, SeverityBand, ThermalPhase};
pub use twinjet_sim::{LifecycleState, SimConfig};
