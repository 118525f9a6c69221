//! Diagnostics for SQL type coercion
//!
//! This crate provides the error handling infrastructure shared by the
//! coercion engine and the validators that drive it: error codes, source
//! spans and user-facing diagnostics.

mod error;
mod error_code;
mod span;

pub use error::*;
pub use error_code::*;
pub use span::*;

/// Result type for validation operations
pub type Result<T> = std::result::Result<T, SqlError>;
