//! SQL type descriptors
//!
//! This module defines the type model the coercion engine reasons about:
//! - `TypeFamily`, the closed set of type families
//! - `SqlType`, an immutable descriptor (family, precision, scale, nullability, element type)
//! - SQL-style display of descriptors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Precision of TINYINT in decimal digits
pub const TINYINT_PRECISION: u32 = 3;
/// Precision of SMALLINT in decimal digits
pub const SMALLINT_PRECISION: u32 = 5;
/// Precision of INTEGER in decimal digits
pub const INTEGER_PRECISION: u32 = 10;
/// Precision of BIGINT in decimal digits
pub const BIGINT_PRECISION: u32 = 19;
/// Precision of REAL in binary digits
pub const REAL_PRECISION: u32 = 24;
/// Precision of DOUBLE in binary digits
pub const DOUBLE_PRECISION: u32 = 53;

/// Type family of a descriptor
///
/// The widening order between families is owned by the lattice resolver,
/// not by this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeFamily {
    Boolean,
    /// TINYINT, SMALLINT, INTEGER, BIGINT
    ExactNumeric,
    /// REAL, DOUBLE
    ApproximateNumeric,
    Decimal,
    /// CHAR / VARCHAR
    Character,
    /// BINARY / VARBINARY
    Binary,
    Date,
    Time,
    Timestamp,
    Interval,
    /// ARRAY / MULTISET of an element type
    Collection,
    /// Accepts any other type
    Any,
    /// Type of an untyped NULL literal
    Null,
}

impl TypeFamily {
    /// Check if the family is one of the numeric families
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::ExactNumeric | Self::ApproximateNumeric | Self::Decimal
        )
    }

    /// Check if the family is DATE, TIME or TIMESTAMP
    pub fn is_datetime(&self) -> bool {
        matches!(self, Self::Date | Self::Time | Self::Timestamp)
    }
}

impl fmt::Display for TypeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "BOOLEAN",
            Self::ExactNumeric => "EXACT_NUMERIC",
            Self::ApproximateNumeric => "APPROXIMATE_NUMERIC",
            Self::Decimal => "DECIMAL",
            Self::Character => "CHARACTER",
            Self::Binary => "BINARY",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Interval => "INTERVAL",
            Self::Collection => "COLLECTION",
            Self::Any => "ANY",
            Self::Null => "NULL",
        };
        f.write_str(name)
    }
}

/// An immutable SQL type descriptor
///
/// Descriptors compare structurally. Constructors uphold two invariants:
/// `scale <= precision` whenever both are set, and `element` is present
/// exactly when the family is [`TypeFamily::Collection`].
///
/// Constructors produce NOT NULL types (except [`SqlType::null`]); use
/// [`SqlType::with_nullable`] to derive the nullable variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SqlType {
    family: TypeFamily,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    precision: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scale: Option<u32>,
    #[serde(default)]
    nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    element: Option<Box<SqlType>>,
}

impl SqlType {
    fn scalar(family: TypeFamily, precision: Option<u32>, scale: Option<u32>) -> Self {
        Self {
            family,
            precision,
            scale,
            nullable: false,
            element: None,
        }
    }

    // === Constructors ===

    pub fn boolean() -> Self {
        Self::scalar(TypeFamily::Boolean, None, None)
    }

    pub fn tinyint() -> Self {
        Self::exact(TINYINT_PRECISION)
    }

    pub fn smallint() -> Self {
        Self::exact(SMALLINT_PRECISION)
    }

    pub fn integer() -> Self {
        Self::exact(INTEGER_PRECISION)
    }

    pub fn bigint() -> Self {
        Self::exact(BIGINT_PRECISION)
    }

    /// Exact integer type with the given number of decimal digits
    pub fn exact(precision: u32) -> Self {
        Self::scalar(TypeFamily::ExactNumeric, Some(precision), Some(0))
    }

    pub fn real() -> Self {
        Self::scalar(TypeFamily::ApproximateNumeric, Some(REAL_PRECISION), None)
    }

    pub fn double() -> Self {
        Self::scalar(TypeFamily::ApproximateNumeric, Some(DOUBLE_PRECISION), None)
    }

    /// DECIMAL(precision, scale); a scale larger than the precision is
    /// reduced to the precision
    pub fn decimal(precision: u32, scale: u32) -> Self {
        Self::scalar(
            TypeFamily::Decimal,
            Some(precision),
            Some(scale.min(precision)),
        )
    }

    /// VARCHAR(length), or unbounded VARCHAR when `length` is `None`
    pub fn varchar(length: Option<u32>) -> Self {
        Self::scalar(TypeFamily::Character, length, None)
    }

    /// VARBINARY(length), or unbounded VARBINARY when `length` is `None`
    pub fn varbinary(length: Option<u32>) -> Self {
        Self::scalar(TypeFamily::Binary, length, None)
    }

    pub fn date() -> Self {
        Self::scalar(TypeFamily::Date, None, None)
    }

    /// TIME with the given fractional-second precision
    pub fn time(precision: u32) -> Self {
        Self::scalar(TypeFamily::Time, Some(precision), None)
    }

    /// TIMESTAMP with the given fractional-second precision
    pub fn timestamp(precision: u32) -> Self {
        Self::scalar(TypeFamily::Timestamp, Some(precision), None)
    }

    pub fn interval() -> Self {
        Self::scalar(TypeFamily::Interval, None, None)
    }

    /// Collection (ARRAY) of the given element type
    pub fn collection(element: SqlType) -> Self {
        Self {
            family: TypeFamily::Collection,
            precision: None,
            scale: None,
            nullable: false,
            element: Some(Box::new(element)),
        }
    }

    pub fn any() -> Self {
        Self::scalar(TypeFamily::Any, None, None)
    }

    /// Type of an untyped NULL literal; always nullable
    pub fn null() -> Self {
        Self::scalar(TypeFamily::Null, None, None).with_nullable(true)
    }

    // === Accessors ===

    pub fn family(&self) -> TypeFamily {
        self.family
    }

    pub fn precision(&self) -> Option<u32> {
        self.precision
    }

    pub fn scale(&self) -> Option<u32> {
        self.scale
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Element type of a collection
    pub fn element(&self) -> Option<&SqlType> {
        self.element.as_deref()
    }

    /// Return a copy of this type with the given nullability
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Structural equality that ignores top-level nullability
    pub fn equals_sans_nullability(&self, other: &SqlType) -> bool {
        self.family == other.family
            && self.precision == other.precision
            && self.scale == other.scale
            && self.element == other.element
    }

    // === Family predicates ===

    pub fn is_boolean(&self) -> bool {
        self.family == TypeFamily::Boolean
    }

    /// Check if this is an exact, approximate or decimal numeric type
    pub fn is_numeric(&self) -> bool {
        self.family.is_numeric()
    }

    /// Check if this is one of the integer types
    pub fn is_exact_integer(&self) -> bool {
        self.family == TypeFamily::ExactNumeric
    }

    pub fn is_approximate(&self) -> bool {
        self.family == TypeFamily::ApproximateNumeric
    }

    pub fn is_decimal(&self) -> bool {
        self.family == TypeFamily::Decimal
    }

    pub fn is_character(&self) -> bool {
        self.family == TypeFamily::Character
    }

    pub fn is_binary(&self) -> bool {
        self.family == TypeFamily::Binary
    }

    pub fn is_datetime(&self) -> bool {
        self.family.is_datetime()
    }

    pub fn is_interval(&self) -> bool {
        self.family == TypeFamily::Interval
    }

    pub fn is_collection(&self) -> bool {
        self.family == TypeFamily::Collection
    }

    pub fn is_any(&self) -> bool {
        self.family == TypeFamily::Any
    }

    pub fn is_null(&self) -> bool {
        self.family == TypeFamily::Null
    }

    /// Check if this is a plain scalar value type (not a collection, ANY or NULL)
    pub fn is_atomic(&self) -> bool {
        !matches!(
            self.family,
            TypeFamily::Collection | TypeFamily::Any | TypeFamily::Null
        )
    }

    /// True for CHARACTER, or a collection whose element recursively has character
    pub fn has_character(&self) -> bool {
        match &self.element {
            Some(element) => element.has_character(),
            None => self.is_character(),
        }
    }

    /// SQL type name including a trailing ` NOT NULL` for non-nullable types
    pub fn full_type_string(&self) -> String {
        let base = match &self.element {
            Some(element) => format!("{} ARRAY", element.full_type_string()),
            None => self.to_string(),
        };
        if self.nullable {
            base
        } else {
            format!("{base} NOT NULL")
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.family {
            TypeFamily::Boolean => write!(f, "BOOLEAN"),
            TypeFamily::ExactNumeric => {
                let name = match self.precision.unwrap_or(INTEGER_PRECISION) {
                    p if p <= TINYINT_PRECISION => "TINYINT",
                    p if p <= SMALLINT_PRECISION => "SMALLINT",
                    p if p <= INTEGER_PRECISION => "INTEGER",
                    _ => "BIGINT",
                };
                write!(f, "{name}")
            }
            TypeFamily::ApproximateNumeric => {
                if self.precision.unwrap_or(DOUBLE_PRECISION) <= REAL_PRECISION {
                    write!(f, "REAL")
                } else {
                    write!(f, "DOUBLE")
                }
            }
            TypeFamily::Decimal => write!(
                f,
                "DECIMAL({}, {})",
                self.precision.unwrap_or_default(),
                self.scale.unwrap_or_default()
            ),
            TypeFamily::Character => match self.precision {
                Some(len) => write!(f, "VARCHAR({len})"),
                None => write!(f, "VARCHAR"),
            },
            TypeFamily::Binary => match self.precision {
                Some(len) => write!(f, "VARBINARY({len})"),
                None => write!(f, "VARBINARY"),
            },
            TypeFamily::Date => write!(f, "DATE"),
            TypeFamily::Time => write!(f, "TIME({})", self.precision.unwrap_or_default()),
            TypeFamily::Timestamp => {
                write!(f, "TIMESTAMP({})", self.precision.unwrap_or_default())
            }
            TypeFamily::Interval => write!(f, "INTERVAL"),
            TypeFamily::Collection => match &self.element {
                Some(element) => write!(f, "{element} ARRAY"),
                None => write!(f, "ARRAY"),
            },
            TypeFamily::Any => write!(f, "ANY"),
            TypeFamily::Null => write!(f, "NULL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(SqlType::decimal(12, 2).to_string(), "DECIMAL(12, 2)");
        assert_eq!(SqlType::varchar(Some(5)).to_string(), "VARCHAR(5)");
        assert_eq!(SqlType::varchar(None).to_string(), "VARCHAR");
        assert_eq!(SqlType::collection(SqlType::integer()).to_string(), "INTEGER ARRAY");
        assert_eq!(SqlType::tinyint().to_string(), "TINYINT");
        assert_eq!(SqlType::bigint().to_string(), "BIGINT");
        assert_eq!(SqlType::real().to_string(), "REAL");
        assert_eq!(SqlType::timestamp(3).to_string(), "TIMESTAMP(3)");
    }

    #[test]
    fn test_full_type_string() {
        assert_eq!(SqlType::integer().full_type_string(), "INTEGER NOT NULL");
        assert_eq!(SqlType::integer().with_nullable(true).full_type_string(), "INTEGER");
        assert_eq!(
            SqlType::collection(SqlType::integer()).full_type_string(),
            "INTEGER NOT NULL ARRAY NOT NULL"
        );
    }

    #[test]
    fn test_decimal_scale_never_exceeds_precision() {
        let ty = SqlType::decimal(3, 7);
        assert_eq!(ty.precision(), Some(3));
        assert_eq!(ty.scale(), Some(3));
    }

    #[test]
    fn test_equals_sans_nullability() {
        let a = SqlType::varchar(Some(5));
        let b = SqlType::varchar(Some(5)).with_nullable(true);
        assert_ne!(a, b);
        assert!(a.equals_sans_nullability(&b));
        assert!(!a.equals_sans_nullability(&SqlType::varchar(Some(6))));
    }

    #[test]
    fn test_has_character() {
        assert!(SqlType::varchar(None).has_character());
        assert!(SqlType::collection(SqlType::collection(SqlType::varchar(None))).has_character());
        assert!(!SqlType::collection(SqlType::integer()).has_character());
        assert!(!SqlType::varbinary(None).has_character());
    }

    #[test]
    fn test_family_predicates() {
        assert!(SqlType::decimal(5, 2).is_numeric());
        assert!(SqlType::double().is_approximate());
        assert!(SqlType::date().is_datetime());
        assert!(!SqlType::interval().is_datetime());
        assert!(SqlType::null().is_nullable());
        assert!(!SqlType::null().is_atomic());
        assert!(SqlType::boolean().is_atomic());
    }
}
