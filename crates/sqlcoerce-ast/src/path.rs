//! Operand paths
//!
//! An `OperandPath` addresses a node inside an expression tree as the
//! sequence of operand indices leading from a root node down to it.

use smallvec::SmallVec;
use std::fmt;

/// Sequence of operand indices from a root node
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OperandPath(SmallVec<[usize; 4]>);

impl OperandPath {
    /// The empty path, addressing the root itself
    pub fn root() -> Self {
        Self(SmallVec::new())
    }

    /// Path to a direct operand of the root
    pub fn operand(index: usize) -> Self {
        let mut path = Self::root();
        path.0.push(index);
        path
    }

    /// Extend the path by one operand index
    pub fn child(&self, index: usize) -> Self {
        let mut path = self.clone();
        path.0.push(index);
        path
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Split into the path of the parent and the operand index within it
    pub fn split_last(&self) -> Option<(&[usize], usize)> {
        self.0.split_last().map(|(last, parent)| (parent, *last))
    }
}

impl FromIterator<usize> for OperandPath {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[usize; N]> for OperandPath {
    fn from(indices: [usize; N]) -> Self {
        indices.into_iter().collect()
    }
}

impl fmt::Display for OperandPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{index}")?;
        }
        write!(f, "]")
    }
}
