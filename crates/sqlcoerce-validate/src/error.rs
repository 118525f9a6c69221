//! Coercion errors
//!
//! Failing to find a common type is never an error; strategies report it by
//! returning `false`. Errors are reserved for trees that break guarantees the
//! validator established before calling into coercion.

use log::warn;
use sqlcoerce_diagnostics::SqlError;
use thiserror::Error;

/// Structural misuse of the coercion engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    /// An upstream guarantee does not hold (bad column index, column-count
    /// mismatch, dangling operand path)
    #[error("Invariant violation: {message}")]
    InvariantViolation { message: String },

    /// A strategy that rewrites call operands received a non-call node
    #[error("Expected a call, found {found}")]
    NotACall { found: String },

    /// A strategy received a call of the wrong operator
    #[error("Expected {expected}, found {found}")]
    UnexpectedOperator {
        expected: &'static str,
        found: String,
    },
}

impl CoercionError {
    /// Build an invariant violation, logging it at warn level
    pub fn invariant(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!("coercion invariant violated: {message}");
        Self::InvariantViolation { message }
    }
}

/// Coercion result
pub type CoercionResult<T> = Result<T, CoercionError>;

impl From<CoercionError> for SqlError {
    fn from(err: CoercionError) -> Self {
        match err {
            CoercionError::InvariantViolation { message } => SqlError::invariant(message),
            other => SqlError::internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlcoerce_diagnostics::{SQL0400, SQL0407};

    #[test]
    fn test_into_sql_error() {
        let err: SqlError = CoercionError::invariant("column 4 of 2").into();
        assert_eq!(err.code(), SQL0407);
        assert!(err.to_string().contains("column 4 of 2"));

        let err: SqlError = CoercionError::NotACall {
            found: "literal".to_string(),
        }
        .into();
        assert_eq!(err.code(), SQL0400);
    }
}
