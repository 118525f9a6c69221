//! Strategies applied through the `TypeCoercion` trait

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::{fixture, rstest};
use sqlcoerce_ast::{
    ArithmeticOp, ComparisonOp, Expression, ExpressionKind, Insert, OperandPath, Operator, Select,
    SetOpKind, Update,
};
use sqlcoerce_types::{PrecisionPolicy, SqlType};
use sqlcoerce_validate::{
    CoercionConfig, CoercionError, CoercionResult, DefaultTypeCoercion, Dialect, TypeCoercion,
};
use std::sync::atomic::{AtomicUsize, Ordering};

#[fixture]
fn coercion() -> Box<dyn TypeCoercion> {
    CoercionConfig::default().build()
}

fn at<const N: usize>(root: &Expression, path: [usize; N]) -> &Expression {
    root.at_path(&OperandPath::from(path)).unwrap()
}

fn implicit_cast_type(expr: &Expression) -> Option<&SqlType> {
    match &expr.kind {
        ExpressionKind::Cast(..) if expr.is_implicit_cast() => expr.ty.as_ref(),
        _ => None,
    }
}

#[rstest]
fn test_comparison_rewrites_string_side(coercion: Box<dyn TypeCoercion>) {
    let mut call = Expression::call(
        Operator::Comparison(ComparisonOp::Less),
        vec![
            Expression::column("created", SqlType::timestamp(3)),
            Expression::string("2024-01-01 00:00:00"),
        ],
        Some(SqlType::boolean()),
    );

    assert!(coercion.binary_comparison_coercion(&mut call).unwrap());
    assert_eq!(
        implicit_cast_type(call.operand(1).unwrap()),
        Some(&SqlType::timestamp(3))
    );
    assert!(!coercion.binary_comparison_coercion(&mut call).unwrap());
}

#[rstest]
fn test_arithmetic_keeps_span_of_cast_operand(coercion: Box<dyn TypeCoercion>) {
    let span = sqlcoerce_diagnostics::Span::new(4, 7);
    let mut call = Expression::call(
        Operator::Arithmetic(ArithmeticOp::Minus),
        vec![
            Expression::string("10").with_span(span),
            Expression::column("n", SqlType::smallint()),
        ],
        Some(SqlType::smallint()),
    );

    assert!(coercion.binary_arithmetic_coercion(&mut call).unwrap());
    let operand = call.operand(0).unwrap();
    assert_eq!(implicit_cast_type(operand), Some(&SqlType::smallint()));
    assert_eq!(operand.span, span);
}

#[rstest]
fn test_union_branches_aligned(coercion: Box<dyn TypeCoercion>) {
    let mut query = Expression::set_op(
        SetOpKind::Union,
        false,
        Expression::select(Select::new(vec![Expression::alias(
            Expression::column("id", SqlType::integer()),
            "id",
        )])),
        Expression::select(Select::new(vec![Expression::column("score", SqlType::double())])),
    );

    assert!(coercion.row_type_coercion(&mut query, 0, &SqlType::double()).unwrap());

    let alias = at(&query, [0, 0]);
    assert_eq!(alias.ty, Some(SqlType::double()));
    assert!(alias.operand(0).unwrap().is_implicit_cast());
    assert!(!at(&query, [1, 0]).is_implicit_cast());
}

#[rstest]
fn test_row_type_column_out_of_range(coercion: Box<dyn TypeCoercion>) {
    let mut query = Expression::values(vec![Expression::row(vec![Expression::integer(1)])]);
    let err = coercion
        .row_type_coercion(&mut query, 3, &SqlType::bigint())
        .unwrap_err();
    assert!(matches!(err, CoercionError::InvariantViolation { .. }));
}

#[rstest]
fn test_insert_source(coercion: Box<dyn TypeCoercion>) {
    let mut insert = Expression::insert(Insert {
        table: "orders".to_string(),
        columns: vec!["id".to_string(), "placed".to_string()],
        source: Expression::values(vec![
            Expression::row(vec![Expression::integer(1), Expression::string("2024-01-01")]),
            Expression::row(vec![Expression::integer(2), Expression::null()]),
        ]),
    });
    let source = [SqlType::integer(), SqlType::varchar(Some(10))];
    let target = [SqlType::bigint(), SqlType::date()];

    assert!(coercion.query_source_coercion(&mut insert, &source, &target).unwrap());
    assert!(!at(&insert, [0, 0, 0]).is_implicit_cast());
    assert_eq!(
        implicit_cast_type(at(&insert, [0, 0, 1])),
        Some(&SqlType::date())
    );
    assert_eq!(
        implicit_cast_type(at(&insert, [0, 1, 1])),
        Some(&SqlType::date().with_nullable(true))
    );
}

#[rstest]
fn test_update_sources(coercion: Box<dyn TypeCoercion>) {
    let mut update = Expression::update(Update {
        table: "t".to_string(),
        columns: vec!["price".to_string()],
        sources: vec![Expression::string("9.99")],
        condition: None,
    });

    assert!(coercion
        .query_source_coercion(&mut update, &[SqlType::varchar(Some(4))], &[SqlType::double()])
        .unwrap());
    assert_eq!(
        implicit_cast_type(update.operand(0).unwrap()),
        Some(&SqlType::double())
    );
}

#[test]
fn test_strict_dialect_leaves_strings_alone() {
    let coercion = CoercionConfig::new(Dialect::Strict).build();
    let mut call = Expression::call(
        Operator::Comparison(ComparisonOp::Equal),
        vec![
            Expression::column("code", SqlType::varchar(Some(5))),
            Expression::integer(5),
        ],
        Some(SqlType::boolean()),
    );
    assert!(!coercion.binary_comparison_coercion(&mut call).unwrap());

    let mut insert = Expression::insert(Insert {
        table: "t".to_string(),
        columns: Vec::new(),
        source: Expression::values(vec![Expression::row(vec![Expression::string("5")])]),
    });
    assert!(!coercion
        .query_source_coercion(&mut insert, &[SqlType::varchar(Some(1))], &[SqlType::integer()])
        .unwrap());
}

/// Delegates to the default lattice but records and refuses every conversion
#[derive(Default)]
struct RefusingCoercion {
    inner: DefaultTypeCoercion,
    attempts: AtomicUsize,
}

impl TypeCoercion for RefusingCoercion {
    fn policy(&self) -> &PrecisionPolicy {
        self.inner.policy()
    }

    fn tightest_common_type(&self, t1: &SqlType, t2: &SqlType) -> Option<SqlType> {
        self.inner.tightest_common_type(t1, t2)
    }

    fn wider_type_for_two(&self, t1: &SqlType, t2: &SqlType, promote: bool) -> Option<SqlType> {
        self.inner.wider_type_for_two(t1, t2, promote)
    }

    fn wider_type_for_many(&self, types: &[SqlType], promote: bool) -> Option<SqlType> {
        self.inner.wider_type_for_many(types, promote)
    }

    fn wider_type_for_decimal(&self, t1: &SqlType, t2: &SqlType) -> Option<SqlType> {
        self.inner.wider_type_for_decimal(t1, t2)
    }

    fn common_type_for_comparison(&self, t1: &SqlType, t2: &SqlType) -> Option<SqlType> {
        self.inner.common_type_for_comparison(t1, t2)
    }

    fn coerce_operand_type(
        &self,
        _parent: &mut Expression,
        _index: usize,
        _target: &SqlType,
    ) -> CoercionResult<bool> {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        Ok(false)
    }
}

#[test]
fn test_strategies_convert_through_coerce_operand_type() {
    let coercion = RefusingCoercion::default();
    let mut call = Expression::call(
        Operator::Comparison(ComparisonOp::Equal),
        vec![
            Expression::column("code", SqlType::varchar(Some(5))),
            Expression::column("n", SqlType::integer()),
        ],
        Some(SqlType::boolean()),
    );
    let before = call.clone();

    assert!(!coercion.binary_comparison_coercion(&mut call).unwrap());
    assert_eq!(coercion.attempts.load(Ordering::Relaxed), 1);
    assert_eq!(call, before);
}

fn comparable_type() -> impl Strategy<Value = SqlType> {
    prop_oneof![
        Just(SqlType::boolean()),
        Just(SqlType::integer()),
        Just(SqlType::bigint()),
        Just(SqlType::double()),
        (1u32..=19).prop_map(|p| SqlType::decimal(p, p / 2)),
        proptest::option::of(1u32..32).prop_map(SqlType::varchar),
        Just(SqlType::date()),
        (0u32..=6).prop_map(SqlType::timestamp),
        Just(SqlType::null()),
    ]
}

fn typed(name: &str, ty: SqlType) -> Expression {
    if ty.is_null() {
        Expression::null()
    } else {
        Expression::column(name, ty)
    }
}

proptest! {
    #[test]
    fn comparison_coercion_settles_in_one_round(a in comparable_type(), b in comparable_type()) {
        let coercion = CoercionConfig::default().build();
        let mut call = Expression::call(
            Operator::Comparison(ComparisonOp::Equal),
            vec![typed("a", a), typed("b", b)],
            Some(SqlType::boolean()),
        );

        coercion.binary_comparison_coercion(&mut call).unwrap();
        prop_assert!(coercion.plan_binary_comparison(&call).unwrap().is_empty());
    }
}
