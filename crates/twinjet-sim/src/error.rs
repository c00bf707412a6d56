//! Error types for simulator configuration.

/// Simulator configuration errors.
///
/// Simulation itself never fails; only building a simulator from an
/// out-of-range [`SimConfig`](crate::SimConfig) does.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// A physics parameter is outside its valid range.
    #[error("invalid simulator parameter '{name}': {reason}")]
    InvalidParameter {
        /// Name of the offending field.
        name: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

impl SimError {
    /// Create a new invalid parameter error.
    pub fn invalid(name: &'static str, reason: &'static str) -> Self {
        SimError::InvalidParameter { name, reason }
    }
}

/// Result type for simulator operations.
pub type SimResult<T> = Result<T, SimError>;
