//! Prelude for convenient imports.
//!
//! ```rust
//! use twinjet_sim::prelude::*;
//! ```

pub use crate::{
    Distortion, EngineSide, EngineTruth, LifecycleState, ObservedData, PhysicsSimulator,
    SensorPair, SensorSlot, SensorValidity, SimConfig, SimError, SimResult, ThrustDirection,
};
pub use twinjet_faults::{FaultCondition, ThermalPhase};
