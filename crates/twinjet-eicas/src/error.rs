//! Error types for alerting configuration.

/// Alerting configuration errors.
///
/// Evaluation and queue updates never fail; only building them from bad
/// settings does.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EicasError {
    /// A threshold is non-finite or inconsistent with its neighbours.
    #[error("invalid alert threshold '{name}': {reason}")]
    InvalidThreshold {
        /// Name of the offending threshold.
        name: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
    /// The display window must be longer than zero.
    #[error("alert display window must be greater than zero")]
    ZeroDisplayWindow,
}

impl EicasError {
    /// Create a new invalid threshold error.
    pub fn invalid(name: &'static str, reason: &'static str) -> Self {
        EicasError::InvalidThreshold { name, reason }
    }
}

/// Result type for alerting setup.
pub type EicasResult<T> = Result<T, EicasError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EicasError::invalid("low_fuel", "cannot be negative");
        assert_eq!(
            err.to_string(),
            "invalid alert threshold 'low_fuel': cannot be negative"
        );
        assert!(EicasError::ZeroDisplayWindow.to_string().contains("window"));
    }
}
