//! Shared test helpers
//!
//! Expression builders, proptest strategies and assertion helpers used by
//! the end-to-end coercion tests.

#![allow(dead_code)]

use proptest::prelude::*;
use sqlcoerce::{Expression, ExpressionKind, Operator, SqlType};

/// Column reference, or an untyped NULL literal for the NULL type
pub fn operand_of(name: &str, ty: SqlType) -> Expression {
    if ty.is_null() {
        Expression::null()
    } else {
        Expression::column(name, ty)
    }
}

pub fn call(op: Operator, operands: Vec<Expression>) -> Expression {
    Expression::call(op, operands, None)
}

/// Number of implicit CAST nodes anywhere below `expr`, `expr` included
pub fn implicit_cast_count(expr: &Expression) -> usize {
    usize::from(expr.is_implicit_cast())
        + expr
            .operands()
            .into_iter()
            .map(implicit_cast_count)
            .sum::<usize>()
}

/// Assert that an operand is an implicit CAST to `expected` and return its input
#[track_caller]
pub fn assert_cast_to<'a>(expr: &'a Expression, expected: &SqlType) -> &'a Expression {
    match &expr.kind {
        ExpressionKind::Cast(inner, _) if expr.is_implicit_cast() => {
            let actual = expr.ty.as_ref().expect("CAST without a type");
            assert!(
                actual.equals_sans_nullability(expected),
                "expected CAST to {expected}, got CAST to {actual}"
            );
            inner
        }
        _ => panic!("Expected implicit CAST to {expected}, got: {:?}", expr.kind),
    }
}

/// Assert that an operand was left as it was
#[track_caller]
pub fn assert_not_cast(expr: &Expression) {
    assert!(
        !expr.is_implicit_cast(),
        "Expected no CAST, got CAST to {:?}",
        expr.ty
    );
}

/// Scalar types across every family, with arbitrary nullability
pub fn scalar_type() -> impl Strategy<Value = SqlType> {
    let base = prop_oneof![
        Just(SqlType::boolean()),
        Just(SqlType::smallint()),
        Just(SqlType::integer()),
        Just(SqlType::bigint()),
        Just(SqlType::real()),
        Just(SqlType::double()),
        (1u32..=19)
            .prop_flat_map(|p| (Just(p), 0..=p))
            .prop_map(|(p, s)| SqlType::decimal(p, s)),
        proptest::option::of(1u32..64).prop_map(SqlType::varchar),
        proptest::option::of(1u32..64).prop_map(SqlType::varbinary),
        Just(SqlType::date()),
        (0u32..=6).prop_map(SqlType::time),
        (0u32..=9).prop_map(SqlType::timestamp),
        Just(SqlType::interval()),
        Just(SqlType::null()),
    ];
    (base, any::<bool>()).prop_map(|(ty, nullable)| {
        if ty.is_null() {
            ty
        } else {
            ty.with_nullable(nullable)
        }
    })
}
