//! SQL type system for the coercion engine
//!
//! This crate defines:
//! - Type descriptors and type families
//! - Operand families and operand-family checkers
//! - The numeric precision policy
//! - Implicit cast rules
//! - The type lattice resolver (tightest and wider common types)

pub mod cast_rules;
pub mod checker;
pub mod family;
pub mod lattice;
pub mod policy;
pub mod type_system;

pub use cast_rules::{can_cast_from, implicit_cast};
pub use checker::OperandFamilyChecker;
pub use family::OperandFamily;
pub use lattice::TypeLattice;
pub use policy::{DEFAULT_MAX_PRECISION, DEFAULT_MAX_SCALE, PrecisionPolicy};
pub use type_system::*;
