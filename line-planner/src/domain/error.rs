//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from input and solver errors.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A line must have exactly one fewer cost than stops
    #[error("malformed line: {stops} stops but {costs} costs (need one fewer cost than stops)")]
    MalformedLineDefinition { stops: usize, costs: usize },

    /// A line has no stops at all
    #[error("line must have at least one stop")]
    EmptyLine,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::MalformedLineDefinition { stops: 3, costs: 3 };
        assert_eq!(err.to_string(), "malformed line: 3 stops but 3 costs (need one fewer cost than stops)");

        let err = DomainError::EmptyLine;
        assert_eq!(err.to_string(), "line must have at least one stop");
    }
}
