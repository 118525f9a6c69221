//! Implicit type coercion for SQL expression validators
//!
//! This crate bundles the coercion engine:
//! - SQL type descriptors and the type lattice
//! - A typed expression tree with operand addressing
//! - Coercion strategies for every construct and the mutation gateway
//! - Error codes and diagnostics
//!
//! # Example
//!
//! ```
//! use sqlcoerce::{CoercionConfig, Expression, Operator, ComparisonOp, SqlType};
//!
//! let coercion = CoercionConfig::default().build();
//! let mut call = Expression::call(
//!     Operator::Comparison(ComparisonOp::Equal),
//!     vec![
//!         Expression::column("code", SqlType::varchar(Some(5))),
//!         Expression::integer(42),
//!     ],
//!     Some(SqlType::boolean()),
//! );
//!
//! assert!(coercion.binary_comparison_coercion(&mut call)?);
//! assert!(call.operand(1).unwrap().is_implicit_cast());
//! # Ok::<(), sqlcoerce::CoercionError>(())
//! ```

// Re-export all public APIs from internal crates
pub use sqlcoerce_ast as ast;
pub use sqlcoerce_diagnostics as diagnostics;
pub use sqlcoerce_types as types;
pub use sqlcoerce_validate as validate;

// Convenience re-exports
pub use sqlcoerce_ast::{
    ArithmeticOp, CaseBranch, CaseExpr, ComparisonOp, Expression, ExpressionKind, Literal,
    OperandPath, Operator, Quantifier,
};
pub use sqlcoerce_diagnostics::{Result, SqlError};
pub use sqlcoerce_types::{
    OperandFamily, OperandFamilyChecker, PrecisionPolicy, SqlType, TypeFamily, TypeLattice,
};
pub use sqlcoerce_validate::{
    CoercionConfig, CoercionError, CoercionPlan, CoercionResult, DefaultTypeCoercion, Dialect,
    FunctionSignature, StrictTypeCoercion, TypeCoercion, apply_plan, coerce_operand_type,
};
