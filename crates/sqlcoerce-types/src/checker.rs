//! Operand family checkers
//!
//! Declarative description of which operand families an operator accepts.
//! Built-in function coercion walks this tree to find the destination family
//! of every argument.

use crate::{OperandFamily, SqlType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Combinator tree of accepted operand families
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperandFamilyChecker {
    /// One family per formal operand
    Families(Vec<OperandFamily>),
    /// Every child must accept the operands
    And(Vec<OperandFamilyChecker>),
    /// At least one child must accept the operands
    Or(Vec<OperandFamilyChecker>),
}

impl OperandFamilyChecker {
    pub fn families(families: impl IntoIterator<Item = OperandFamily>) -> Self {
        Self::Families(families.into_iter().collect())
    }

    pub fn and(children: impl IntoIterator<Item = OperandFamilyChecker>) -> Self {
        Self::And(children.into_iter().collect())
    }

    pub fn or(children: impl IntoIterator<Item = OperandFamilyChecker>) -> Self {
        Self::Or(children.into_iter().collect())
    }

    /// Check operand types against the tree without any coercion
    ///
    /// A `Families` leaf requires the same number of operands as families.
    pub fn accepts(&self, types: &[SqlType]) -> bool {
        match self {
            Self::Families(families) => {
                families.len() == types.len()
                    && families.iter().zip(types).all(|(f, t)| f.contains(t))
            }
            Self::And(children) => children.iter().all(|c| c.accepts(types)),
            Self::Or(children) => children.iter().any(|c| c.accepts(types)),
        }
    }
}

impl fmt::Display for OperandFamilyChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Families(families) => {
                let names: Vec<String> = families.iter().map(|f| f.to_string()).collect();
                write!(f, "[{}]", names.join(", "))
            }
            Self::And(children) => write_joined(f, children, "AND"),
            Self::Or(children) => write_joined(f, children, "OR"),
        }
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    children: &[OperandFamilyChecker],
    sep: &str,
) -> fmt::Result {
    write!(f, "(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            write!(f, " {sep} ")?;
        }
        write!(f, "{child}")?;
    }
    write!(f, ")")
}
