//! Implicit type coercion
//!
//! Given an expression tree whose nodes carry validator-derived types, this
//! crate decides where operands must be implicitly cast, computes the common
//! type at every coercion site and inserts the casts.
//!
//! - [`TypeCoercion`]: resolver functions plus one strategy per construct
//! - [`DefaultTypeCoercion`] / [`StrictTypeCoercion`]: the two lattices
//! - [`CoercionConfig`]: dialect and precision policy selection
//! - [`gateway`]: the only code that rewrites the tree

mod coercion;
mod config;
mod default;
mod error;
mod function;
pub mod gateway;
pub mod row_type;
pub mod strategy;

pub use coercion::TypeCoercion;
pub use config::{CoercionConfig, Dialect};
pub use default::{DefaultTypeCoercion, StrictTypeCoercion};
pub use error::{CoercionError, CoercionResult};
pub use function::FunctionSignature;
pub use gateway::{
    CoercionPlan, OperandEdit, apply_plan, apply_plan_with, coerce_operand_type, needs_conversion,
};
