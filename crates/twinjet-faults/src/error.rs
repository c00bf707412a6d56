//! Error types for fault code parsing.

/// Error returned when a string does not name a [`FaultCondition`](crate::FaultCondition).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseFaultError {
    /// The code is not one of the known condition codes.
    #[error("unknown fault condition code: '{0}'")]
    UnknownCode(String),
    /// The input was empty or whitespace only.
    #[error("fault condition code is empty")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fault_error_display() {
        let err = ParseFaultError::UnknownCode("BOGUS".to_string());
        assert!(err.to_string().contains("BOGUS"));
        assert_eq!(ParseFaultError::Empty.to_string(), "fault condition code is empty");
    }
}
