//! SQL operators

use serde::{Deserialize, Serialize};
use std::fmt;

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithmeticOp {
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
}

impl ArithmeticOp {
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
        }
    }
}

/// Binary comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl ComparisonOp {
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
        }
    }
}

/// Quantifier of a quantified comparison (`= SOME (...)`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantifier {
    Some,
    Any,
    All,
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Some => write!(f, "SOME"),
            Self::Any => write!(f, "ANY"),
            Self::All => write!(f, "ALL"),
        }
    }
}

/// Operator of a call node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Binary arithmetic (`a + b`)
    Arithmetic(ArithmeticOp),
    /// Binary comparison (`a = b`)
    Comparison(ComparisonOp),
    /// `a BETWEEN b AND c`
    Between,
    /// `a IN (...)`
    In,
    /// `a NOT IN (...)`
    NotIn,
    /// `a = SOME (...)`, `a < ALL (...)`
    Quantified(ComparisonOp, Quantifier),
    Coalesce,
    NullIf,
    /// Row constructor (`ROW(a, b)` or a VALUES row)
    Row,
    /// Array constructor (`ARRAY[a, b]`)
    Array,
    /// Named function, built-in or user-defined
    Function(String),
}

impl Operator {
    pub fn function(name: impl Into<String>) -> Self {
        Self::Function(name.into())
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(self, Self::Arithmetic(_))
    }

    pub fn is_membership(&self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }

    /// `+` or `-`, which also combine datetimes with intervals
    pub fn is_additive(&self) -> bool {
        matches!(
            self,
            Self::Arithmetic(ArithmeticOp::Plus | ArithmeticOp::Minus)
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arithmetic(op) => write!(f, "{}", op.symbol()),
            Self::Comparison(op) => write!(f, "{}", op.symbol()),
            Self::Between => write!(f, "BETWEEN"),
            Self::In => write!(f, "IN"),
            Self::NotIn => write!(f, "NOT IN"),
            Self::Quantified(op, quantifier) => write!(f, "{} {}", op.symbol(), quantifier),
            Self::Coalesce => write!(f, "COALESCE"),
            Self::NullIf => write!(f, "NULLIF"),
            Self::Row => write!(f, "ROW"),
            Self::Array => write!(f, "ARRAY"),
            Self::Function(name) => write!(f, "{name}"),
        }
    }
}

/// Set operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetOpKind {
    Union,
    Intersect,
    Except,
}

impl fmt::Display for SetOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Union => write!(f, "UNION"),
            Self::Intersect => write!(f, "INTERSECT"),
            Self::Except => write!(f, "EXCEPT"),
        }
    }
}
