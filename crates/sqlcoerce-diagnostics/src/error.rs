//! Error and diagnostic types

use crate::{ErrorCode, SQL0110, SQL0400, SQL0402, SQL0407, Span};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Validation cannot proceed
    Error,
    /// Potential issue, validation continues
    Warning,
    /// Informational message
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A diagnostic message with location and context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: ErrorCode,
    pub message: String,
    pub span: Option<Span>,
    /// Additional context or help
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            span: None,
            help: None,
        }
    }

    /// Create a new warning diagnostic
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            span: None,
            help: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.severity, self.code, self.message)?;
        if let Some(span) = &self.span {
            write!(f, " at {}", span)?;
        }
        Ok(())
    }
}

/// Main error type for validation and coercion
#[derive(Debug, Clone, Error)]
pub enum SqlError {
    /// User-facing validation error (type mismatch, bad operand)
    #[error("{code}: {message}")]
    Validation {
        code: ErrorCode,
        message: String,
        span: Option<Span>,
        context: Option<String>,
    },

    /// Invalid engine configuration
    #[error("{code}: {message}")]
    Configuration {
        code: ErrorCode,
        message: String,
        context: Option<String>,
    },

    /// Internal error, usually a broken upstream invariant
    #[error("{code}: {message}")]
    Internal {
        code: ErrorCode,
        message: String,
        context: Option<String>,
    },

    /// Multiple errors collected
    #[error("Multiple errors: {}", .0.len())]
    Multiple(Vec<SqlError>),
}

impl SqlError {
    /// Create a validation error
    pub fn validation(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
            span: None,
            context: None,
        }
    }

    /// Type mismatch raised by a validator after coercion found no common type
    pub fn type_mismatch(
        operation: impl fmt::Display,
        left: impl fmt::Display,
        right: impl fmt::Display,
    ) -> Self {
        Self::Validation {
            code: SQL0110,
            message: format!("Cannot apply '{operation}' to arguments of type {left} and {right}"),
            span: None,
            context: SQL0110.info().help.map(str::to_string),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            code: SQL0402,
            message: message.into(),
            context: None,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            code: SQL0400,
            message: message.into(),
            context: None,
        }
    }

    /// Internal error for a violated upstream invariant
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Internal {
            code: SQL0407,
            message: message.into(),
            context: SQL0407.info().help.map(str::to_string),
        }
    }

    /// Attach a source span (validation errors only)
    pub fn at(self, at: Span) -> Self {
        match self {
            Self::Validation {
                code,
                message,
                context,
                ..
            } => Self::Validation {
                code,
                message,
                span: Some(at),
                context,
            },
            other => other,
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { code, .. } => *code,
            Self::Configuration { code, .. } => *code,
            Self::Internal { code, .. } => *code,
            Self::Multiple(errors) => errors.first().map(|e| e.code()).unwrap_or(SQL0400),
        }
    }

    /// Get the span if available
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Validation { span, .. } => *span,
            _ => None,
        }
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::Validation {
                code,
                message,
                span,
                context,
            } => {
                let mut diag = Diagnostic::error(*code, message.clone());
                if let Some(span) = span {
                    diag = diag.with_span(*span);
                }
                if let Some(ctx) = context {
                    diag = diag.with_help(ctx.clone());
                }
                diag
            }
            Self::Configuration { code, message, context }
            | Self::Internal { code, message, context } => {
                let mut diag = Diagnostic::error(*code, message.clone());
                if let Some(ctx) = context {
                    diag = diag.with_help(ctx.clone());
                }
                diag
            }
            Self::Multiple(errors) => match errors.first() {
                Some(first) => first.to_diagnostic(),
                None => Diagnostic::error(SQL0400, "Unknown error"),
            },
        }
    }
}
