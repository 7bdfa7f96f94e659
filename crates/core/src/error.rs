//! Domain error model.

use thiserror::Error;

/// Domain-level error.
///
/// Deterministic, business-level failures only. Dispatch and output failures
/// live in `herald-events`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        assert_eq!(
            DomainError::validation("email is empty").to_string(),
            "validation failed: email is empty"
        );
        assert_eq!(
            DomainError::invalid_id("AggregateId: bad").to_string(),
            "invalid identifier: AggregateId: bad"
        );
    }
}
