//! Numeric precision policy
//!
//! The policy carries the system limits for DECIMAL and the default length
//! used when a value is promoted to a string. It is passed explicitly into
//! every resolver call.

use crate::{DOUBLE_PRECISION, REAL_PRECISION, SqlType, TypeFamily};
use serde::{Deserialize, Serialize};
use sqlcoerce_diagnostics::{Result, SqlError};

/// Default maximum DECIMAL precision
pub const DEFAULT_MAX_PRECISION: u32 = 19;
/// Default maximum DECIMAL scale
pub const DEFAULT_MAX_SCALE: u32 = 19;

/// DECIMAL limits and string promotion length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PrecisionPolicy {
    /// Maximum DECIMAL precision
    pub max_precision: u32,
    /// Maximum DECIMAL scale
    pub max_scale: u32,
    /// Length of the VARCHAR produced by string promotion (`None` = unbounded)
    pub default_varchar_precision: Option<u32>,
}

impl Default for PrecisionPolicy {
    fn default() -> Self {
        Self {
            max_precision: DEFAULT_MAX_PRECISION,
            max_scale: DEFAULT_MAX_SCALE,
            default_varchar_precision: None,
        }
    }
}

impl PrecisionPolicy {
    pub fn new(max_precision: u32, max_scale: u32) -> Self {
        Self {
            max_precision,
            max_scale,
            default_varchar_precision: None,
        }
    }

    pub fn with_default_varchar_precision(mut self, length: Option<u32>) -> Self {
        self.default_varchar_precision = length;
        self
    }

    /// Reject limits no DECIMAL can satisfy
    pub fn validate(&self) -> Result<()> {
        if self.max_precision == 0 {
            return Err(SqlError::configuration(
                "max_precision must be at least 1",
            ));
        }
        if self.default_varchar_precision == Some(0) {
            return Err(SqlError::configuration(
                "default_varchar_precision must be positive when set",
            ));
        }
        Ok(())
    }

    /// Clamp a (precision, scale) pair to the policy limits
    ///
    /// See [`PrecisionPolicy::fit_digits`].
    pub fn clamp(&self, precision: u32, scale: u32) -> (u32, u32) {
        let scale = scale.min(precision);
        self.fit_digits(precision - scale, scale)
    }

    /// Fit integer digits and scale into the policy, as (precision, scale)
    ///
    /// Integer digits are kept first, up to `max_precision`. Scale takes
    /// whatever room is left, capped at `max_scale`. A DECIMAL always keeps
    /// at least one digit.
    pub fn fit_digits(&self, integer_digits: u32, scale: u32) -> (u32, u32) {
        let integer_digits = integer_digits.min(self.max_precision);
        let scale = scale
            .min(self.max_precision - integer_digits)
            .min(self.max_scale);
        ((integer_digits + scale).max(1), scale)
    }

    /// The widest DECIMAL the arithmetic rules produce:
    /// `DECIMAL(max_precision, min(max_precision / 2, max_scale))`
    pub fn max_precision_scale_decimal(&self) -> SqlType {
        let scale = (self.max_precision / 2).min(self.max_scale);
        SqlType::decimal(self.max_precision, scale)
    }

    /// View a numeric type as a DECIMAL, keeping its nullability
    ///
    /// Integers keep their digit count with scale 0; REAL maps to
    /// DECIMAL(14, 7) and DOUBLE to DECIMAL(30, 15). Results are clamped to
    /// the policy. Non-numeric types yield `None`.
    pub fn decimal_of(&self, ty: &SqlType) -> Option<SqlType> {
        let (precision, scale) = match ty.family() {
            TypeFamily::Decimal => (
                ty.precision().unwrap_or(self.max_precision),
                ty.scale().unwrap_or(0),
            ),
            TypeFamily::ExactNumeric => (ty.precision().unwrap_or(self.max_precision), 0),
            TypeFamily::ApproximateNumeric => {
                if ty.precision().unwrap_or(DOUBLE_PRECISION) <= REAL_PRECISION {
                    (14, 7)
                } else {
                    (30, 15)
                }
            }
            _ => return None,
        };
        let (precision, scale) = self.clamp(precision, scale);
        Some(SqlType::decimal(precision, scale).with_nullable(ty.is_nullable()))
    }
}
