//! Typed SQL Abstract Syntax Tree
//!
//! This crate defines the expression, query and DML nodes the coercion
//! engine operates on. Nodes carry the types a validator derived for them;
//! parsing and name resolution happen elsewhere.

mod expression;
mod literal;
mod operator;
mod path;
mod query;

pub use expression::*;
pub use literal::*;
pub use operator::*;
pub use path::*;
pub use query::*;
