//! Literal AST nodes

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlcoerce_types::SqlType;
use std::fmt;

/// A literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// Untyped NULL
    Null,
    Boolean(bool),
    /// Integer literal; INTEGER when it fits 32 bits, BIGINT otherwise
    Integer(i64),
    /// Exact decimal literal (`2.5`)
    Decimal(Decimal),
    /// Approximate literal (`1e3`)
    Double(f64),
    /// Character string literal
    String(String),
    /// Binary string literal (`X'0F'`)
    Binary(Vec<u8>),
    /// DATE literal text (`DATE '2024-01-31'`)
    Date(String),
    /// TIME literal text
    Time(String),
    /// TIMESTAMP literal text
    Timestamp(String),
    /// INTERVAL literal text
    Interval(String),
}

impl Literal {
    /// The type a validator derives for this literal
    ///
    /// Decimal literals get the smallest DECIMAL holding their digits
    /// (`2.5` is DECIMAL(2, 1)); strings get a VARCHAR of their length.
    pub fn sql_type(&self) -> SqlType {
        match self {
            Self::Null => SqlType::null(),
            Self::Boolean(_) => SqlType::boolean(),
            Self::Integer(value) => {
                if i32::try_from(*value).is_ok() {
                    SqlType::integer()
                } else {
                    SqlType::bigint()
                }
            }
            Self::Decimal(value) => {
                let scale = value.scale();
                let digits = decimal_digits(value.mantissa().unsigned_abs());
                SqlType::decimal(digits.max(scale).max(1), scale)
            }
            Self::Double(_) => SqlType::double(),
            Self::String(value) => {
                let len = u32::try_from(value.chars().count()).unwrap_or(u32::MAX);
                SqlType::varchar(Some(len))
            }
            Self::Binary(value) => {
                let len = u32::try_from(value.len()).unwrap_or(u32::MAX);
                SqlType::varbinary(Some(len))
            }
            Self::Date(_) => SqlType::date(),
            Self::Time(_) => SqlType::time(0),
            Self::Timestamp(_) => SqlType::timestamp(0),
            Self::Interval(_) => SqlType::interval(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

fn decimal_digits(mut mantissa: u128) -> u32 {
    let mut digits = 1;
    while mantissa >= 10 {
        mantissa /= 10;
        digits += 1;
    }
    digits
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Boolean(value) => write!(f, "{}", if *value { "TRUE" } else { "FALSE" }),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Decimal(value) => write!(f, "{value}"),
            Self::Double(value) => write!(f, "{value:e}"),
            Self::String(value) => write!(f, "'{}'", value.replace('\'', "''")),
            Self::Binary(value) => {
                write!(f, "X'")?;
                for byte in value {
                    write!(f, "{byte:02X}")?;
                }
                write!(f, "'")
            }
            Self::Date(text) => write!(f, "DATE '{text}'"),
            Self::Time(text) => write!(f, "TIME '{text}'"),
            Self::Timestamp(text) => write!(f, "TIMESTAMP '{text}'"),
            Self::Interval(text) => write!(f, "INTERVAL '{text}'"),
        }
    }
}
