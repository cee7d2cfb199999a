//! Domain error model.

use thiserror::Error;

/// Result type used across the catalog layers.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every failure a catalog operation can report to a caller maps onto one of
/// these variants. Infrastructure detail (driver messages, SQLSTATE codes) is
/// folded in by the store before it reaches this type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A request body failed required-field, length or type checks.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// No row exists for the given identifier.
    #[error("not found")]
    NotFound,

    /// A uniqueness or foreign-key rule was breached.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::ConstraintViolation(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_detail() {
        let err = DomainError::constraint("duplicate sku X-1");
        assert_eq!(err.to_string(), "constraint violation: duplicate sku X-1");
        assert_eq!(DomainError::not_found().to_string(), "not found");
    }
}
