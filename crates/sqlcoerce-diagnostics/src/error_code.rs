//! Error codes following a structured numbering system
//!
//! Error code ranges:
//! - SQL0100-SQL0199: Validation errors (type mismatches, bad operands)
//! - SQL0400-SQL0499: System errors (configuration, internal invariants)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a validation error (0100-0199)
    pub const fn is_validation_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is a system error (0400-0499)
    pub const fn is_system_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SQL{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Validation errors (0100-0199)
    map.insert(
        110,
        ErrorInfo::new("Type mismatch")
            .with_help("Add an explicit CAST if the conversion is intended"),
    );
    map.insert(111, ErrorInfo::new("Invalid argument count"));
    map.insert(112, ErrorInfo::new("Invalid argument type"));
    map.insert(115, ErrorInfo::new("Invalid cast"));
    map.insert(116, ErrorInfo::new("Invalid comparison"));
    map.insert(117, ErrorInfo::new("Invalid operation"));
    map.insert(121, ErrorInfo::new("Column count mismatch"));

    // System errors (0400-0499)
    map.insert(400, ErrorInfo::new("Internal error"));
    map.insert(402, ErrorInfo::new("Configuration error"));
    map.insert(
        407,
        ErrorInfo::new("Invariant violation")
            .with_help("The caller passed a tree that violates an upstream validation guarantee"),
    );

    map
});

// Validation errors
pub const SQL0110: ErrorCode = ErrorCode::new(110);
pub const SQL0111: ErrorCode = ErrorCode::new(111);
pub const SQL0112: ErrorCode = ErrorCode::new(112);
pub const SQL0115: ErrorCode = ErrorCode::new(115);
pub const SQL0116: ErrorCode = ErrorCode::new(116);
pub const SQL0117: ErrorCode = ErrorCode::new(117);
pub const SQL0121: ErrorCode = ErrorCode::new(121);

// System errors
pub const SQL0400: ErrorCode = ErrorCode::new(400);
pub const SQL0402: ErrorCode = ErrorCode::new(402);
pub const SQL0407: ErrorCode = ErrorCode::new(407);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(SQL0110.to_string(), "SQL0110");
        assert_eq!(SQL0407.to_string(), "SQL0407");
    }

    #[test]
    fn test_error_categories() {
        assert!(SQL0110.is_validation_error());
        assert!(!SQL0110.is_system_error());
        assert!(SQL0402.is_system_error());
    }

    #[test]
    fn test_error_info() {
        assert_eq!(SQL0110.info().description, "Type mismatch");
        assert!(SQL0110.info().help.is_some());
        assert_eq!(ErrorCode::new(999).info().description, "Unknown error");
    }
}
