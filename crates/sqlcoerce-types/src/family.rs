//! Operand families
//!
//! Coarse classifications used by operand checkers to declare which
//! argument types an operator accepts, independent of precision and scale.

use crate::{PrecisionPolicy, SqlType, TypeFamily};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A family of types an operand may belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperandFamily {
    Any,
    /// Exact, decimal or approximate numerics
    Numeric,
    /// Integers and DECIMAL
    ExactNumeric,
    Integer,
    Decimal,
    ApproximateNumeric,
    Character,
    Binary,
    /// CHARACTER or BINARY
    String,
    Boolean,
    Date,
    Time,
    Timestamp,
    /// DATE, TIME or TIMESTAMP
    Datetime,
    Interval,
    Collection,
    Null,
}

impl OperandFamily {
    /// Check if a type belongs to this family
    pub fn contains(&self, ty: &SqlType) -> bool {
        let family = ty.family();
        match self {
            Self::Any => true,
            Self::Numeric => family.is_numeric(),
            Self::ExactNumeric => {
                matches!(family, TypeFamily::ExactNumeric | TypeFamily::Decimal)
            }
            Self::Integer => family == TypeFamily::ExactNumeric,
            Self::Decimal => family == TypeFamily::Decimal,
            Self::ApproximateNumeric => family == TypeFamily::ApproximateNumeric,
            Self::Character => family == TypeFamily::Character,
            Self::Binary => family == TypeFamily::Binary,
            Self::String => matches!(family, TypeFamily::Character | TypeFamily::Binary),
            Self::Boolean => family == TypeFamily::Boolean,
            Self::Date => family == TypeFamily::Date,
            Self::Time => family == TypeFamily::Time,
            Self::Timestamp => family == TypeFamily::Timestamp,
            Self::Datetime => family.is_datetime(),
            Self::Interval => family == TypeFamily::Interval,
            Self::Collection => family == TypeFamily::Collection,
            Self::Null => family == TypeFamily::Null,
        }
    }

    /// Check if this is one of the numeric families
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Numeric
                | Self::ExactNumeric
                | Self::Integer
                | Self::Decimal
                | Self::ApproximateNumeric
        )
    }

    /// The concrete type a value is cast to when only the family is known
    ///
    /// Families with no single representative (ANY, COLLECTION, NULL) yield `None`.
    pub fn default_concrete_type(&self, policy: &PrecisionPolicy) -> Option<SqlType> {
        let ty = match self {
            Self::Numeric | Self::Decimal => SqlType::decimal(policy.max_precision, 0),
            Self::ExactNumeric | Self::Integer => SqlType::bigint(),
            Self::ApproximateNumeric => SqlType::double(),
            Self::Character | Self::String => SqlType::varchar(policy.default_varchar_precision),
            Self::Binary => SqlType::varbinary(None),
            Self::Boolean => SqlType::boolean(),
            Self::Date => SqlType::date(),
            Self::Time => SqlType::time(0),
            Self::Timestamp | Self::Datetime => SqlType::timestamp(0),
            Self::Interval => SqlType::interval(),
            Self::Any | Self::Collection | Self::Null => return None,
        };
        Some(ty)
    }

    /// The broad family of a type, used for "operands share a family" tests
    pub fn of(ty: &SqlType) -> Self {
        match ty.family() {
            TypeFamily::ExactNumeric | TypeFamily::ApproximateNumeric | TypeFamily::Decimal => {
                Self::Numeric
            }
            TypeFamily::Character => Self::Character,
            TypeFamily::Binary => Self::Binary,
            TypeFamily::Boolean => Self::Boolean,
            TypeFamily::Date | TypeFamily::Time | TypeFamily::Timestamp => Self::Datetime,
            TypeFamily::Interval => Self::Interval,
            TypeFamily::Collection => Self::Collection,
            TypeFamily::Any => Self::Any,
            TypeFamily::Null => Self::Null,
        }
    }
}

impl fmt::Display for OperandFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Any => "ANY",
            Self::Numeric => "NUMERIC",
            Self::ExactNumeric => "EXACT_NUMERIC",
            Self::Integer => "INTEGER",
            Self::Decimal => "DECIMAL",
            Self::ApproximateNumeric => "APPROXIMATE_NUMERIC",
            Self::Character => "CHARACTER",
            Self::Binary => "BINARY",
            Self::String => "STRING",
            Self::Boolean => "BOOLEAN",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Datetime => "DATETIME",
            Self::Interval => "INTERVAL",
            Self::Collection => "COLLECTION",
            Self::Null => "NULL",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        assert!(OperandFamily::Numeric.contains(&SqlType::double()));
        assert!(OperandFamily::ExactNumeric.contains(&SqlType::decimal(5, 2)));
        assert!(!OperandFamily::Integer.contains(&SqlType::decimal(5, 2)));
        assert!(OperandFamily::String.contains(&SqlType::varbinary(None)));
        assert!(OperandFamily::Datetime.contains(&SqlType::time(0)));
        assert!(!OperandFamily::Numeric.contains(&SqlType::null()));
        assert!(OperandFamily::Any.contains(&SqlType::null()));
    }

    #[test]
    fn test_of() {
        assert_eq!(OperandFamily::of(&SqlType::smallint()), OperandFamily::Numeric);
        assert_eq!(OperandFamily::of(&SqlType::decimal(4, 1)), OperandFamily::Numeric);
        assert_eq!(OperandFamily::of(&SqlType::timestamp(3)), OperandFamily::Datetime);
        assert_eq!(OperandFamily::of(&SqlType::varchar(None)), OperandFamily::Character);
    }

    #[test]
    fn test_default_concrete_type() {
        let policy = PrecisionPolicy::default().with_default_varchar_precision(Some(255));
        assert_eq!(
            OperandFamily::Numeric.default_concrete_type(&policy),
            Some(SqlType::decimal(19, 0))
        );
        assert_eq!(
            OperandFamily::Character.default_concrete_type(&policy),
            Some(SqlType::varchar(Some(255)))
        );
        assert_eq!(OperandFamily::Collection.default_concrete_type(&policy), None);
    }
}
