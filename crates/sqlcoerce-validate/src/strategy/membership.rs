//! IN and quantified comparisons

use super::{binary_operands, expect_call, fold_comparison, under};
use crate::gateway::CoercionPlan;
use crate::row_type::{column_sites, column_type};
use crate::{CoercionError, CoercionResult, TypeCoercion};
use log::trace;
use sqlcoerce_ast::{Expression, ExpressionKind, OperandPath, Operator};
use sqlcoerce_types::SqlType;

/// Plan casts for `lhs [NOT] IN (...)`
///
/// The common type is folded over the left operand and every right element.
/// A sub-query on the right contributes its output column. A row-valued left
/// operand is unified column by column against rows on the right.
pub fn plan_in_operation<C>(coercion: &C, node: &Expression) -> CoercionResult<CoercionPlan>
where
    C: TypeCoercion + ?Sized,
{
    let call = expect_call(node)?;
    if !call.op.is_membership() {
        return Err(CoercionError::UnexpectedOperator {
            expected: "IN or NOT IN",
            found: call.op.to_string(),
        });
    }
    let (lhs, rhs) = binary_operands(call)?;

    let width = match lhs.op() {
        Some(Operator::Row) => Some(lhs.operand_count()),
        _ => None,
    };

    let mut plan = CoercionPlan::new();
    match width {
        None => plan_in_column(coercion, node, lhs, rhs, None, &mut plan)?,
        Some(width) => {
            for column in 0..width {
                let lhs_column = lhs.operand(column).ok_or_else(|| {
                    CoercionError::invariant(format!("row operand {column} missing"))
                })?;
                plan_in_column(coercion, node, lhs_column, rhs, Some(column), &mut plan)?;
            }
        }
    }
    Ok(plan)
}

/// Unify one column of an IN: the scalar left operand, or column `column` of a row
fn plan_in_column<C>(
    coercion: &C,
    node: &Expression,
    lhs: &Expression,
    rhs: &Expression,
    column: Option<usize>,
    plan: &mut CoercionPlan,
) -> CoercionResult<()>
where
    C: TypeCoercion + ?Sized,
{
    let lhs_path = match column {
        Some(column) => OperandPath::from([0, column]),
        None => OperandPath::operand(0),
    };

    let rhs_sites: Vec<OperandPath> = if rhs.is_query() {
        column_sites(rhs, column.unwrap_or(0))?
            .iter()
            .map(|site| under(1, site))
            .collect()
    } else {
        let ExpressionKind::ValueList(items) = &rhs.kind else {
            return Err(CoercionError::invariant(
                "right operand of IN is neither a value list nor a query",
            ));
        };
        let mut sites = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let path = OperandPath::from([1, i]);
            match column {
                None => sites.push(path),
                Some(column) if item.op() == Some(&Operator::Row) && column < item.operand_count() => {
                    sites.push(path.child(column));
                }
                Some(column) => {
                    return Err(CoercionError::invariant(format!(
                        "IN element {i} has no column {column}"
                    )));
                }
            }
        }
        sites
    };

    let rhs_types: Vec<Option<SqlType>> = if rhs.is_query() {
        vec![column_type(rhs, column.unwrap_or(0))]
    } else {
        rhs_sites
            .iter()
            .map(|site| node.at_path(site).and_then(|e| e.ty.clone()))
            .collect()
    };

    let types = std::iter::once(lhs.ty.as_ref()).chain(rhs_types.iter().map(Option::as_ref));
    let Some(common) = fold_comparison(coercion, types) else {
        trace!("IN: no common type");
        return Ok(());
    };

    plan.push_if_needed(node, lhs_path, &common);
    for site in rhs_sites {
        plan.push_if_needed(node, site, &common);
    }
    Ok(())
}

/// Plan casts for `lhs op SOME|ANY|ALL (rhs)`
///
/// The right operand is unwrapped one level: the elements of an ARRAY
/// constructor, column 0 of a sub-query, or the element type of an
/// array-typed operand, which is then cast to an array of the common type.
pub fn plan_quantify_operation<C>(coercion: &C, node: &Expression) -> CoercionResult<CoercionPlan>
where
    C: TypeCoercion + ?Sized,
{
    let call = expect_call(node)?;
    if !matches!(call.op, Operator::Quantified(..)) {
        return Err(CoercionError::UnexpectedOperator {
            expected: "quantified comparison",
            found: call.op.to_string(),
        });
    }
    let (lhs, rhs) = binary_operands(call)?;
    let mut plan = CoercionPlan::new();
    let Some(lhs_type) = &lhs.ty else {
        return Ok(plan);
    };

    if rhs.is_query() {
        let Some(element) = column_type(rhs, 0) else {
            return Ok(plan);
        };
        let Some(common) = coercion.common_type_for_comparison(lhs_type, &element) else {
            return Ok(plan);
        };
        plan.push_if_needed(node, OperandPath::operand(0), &common);
        for site in column_sites(rhs, 0)? {
            plan.push_if_needed(node, under(1, &site), &common);
        }
        return Ok(plan);
    }

    if rhs.op() == Some(&Operator::Array) {
        let element = match rhs.ty.as_ref().and_then(SqlType::element) {
            Some(element) => Some(element.clone()),
            None => {
                let types: Vec<SqlType> =
                    rhs.operands().iter().filter_map(|e| e.ty.clone()).collect();
                coercion.wider_type_for_many(&types, false)
            }
        };
        let Some(common) =
            element.and_then(|element| coercion.common_type_for_comparison(lhs_type, &element))
        else {
            return Ok(plan);
        };
        plan.push_if_needed(node, OperandPath::operand(0), &common);
        for i in 0..rhs.operand_count() {
            plan.push_if_needed(node, OperandPath::from([1, i]), &common);
        }
        return Ok(plan);
    }

    let Some(element) = rhs.ty.as_ref().and_then(SqlType::element) else {
        return Ok(plan);
    };
    let Some(common) = coercion.common_type_for_comparison(lhs_type, element) else {
        return Ok(plan);
    };
    plan.push_if_needed(node, OperandPath::operand(0), &common);
    let element_target = common.with_nullable(element.is_nullable());
    plan.push_if_needed(node, OperandPath::operand(1), &SqlType::collection(element_target));
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DefaultTypeCoercion;
    use pretty_assertions::assert_eq;
    use sqlcoerce_ast::{ComparisonOp, Literal, Quantifier, Select};

    fn in_list(lhs: Expression, items: Vec<Expression>) -> Expression {
        Expression::call(
            Operator::In,
            vec![lhs, Expression::value_list(items)],
            Some(SqlType::boolean()),
        )
    }

    fn some_equal(lhs: Expression, rhs: Expression) -> Expression {
        Expression::call(
            Operator::Quantified(ComparisonOp::Equal, Quantifier::Some),
            vec![lhs, rhs],
            Some(SqlType::boolean()),
        )
    }

    #[test]
    fn test_in_value_list() {
        let coercion = DefaultTypeCoercion::default();
        let call = in_list(
            Expression::column("x", SqlType::integer()),
            vec![
                Expression::integer(1),
                Expression::literal(Literal::Decimal("2.5".parse().unwrap())),
                Expression::null(),
            ],
        );

        let plan = plan_in_operation(&coercion, &call).unwrap();
        let paths: Vec<String> = plan.edits().iter().map(|e| e.path.to_string()).collect();
        assert_eq!(paths, vec!["[0]", "[1.0]", "[1.1]", "[1.2]"]);
        assert!(plan.edits().iter().all(|e| e.target.equals_sans_nullability(&SqlType::decimal(11, 1))));
    }

    #[test]
    fn test_in_sub_query() {
        let coercion = DefaultTypeCoercion::default();
        let sub_query =
            Expression::select(Select::new(vec![Expression::column("b", SqlType::bigint())]));
        let call = Expression::call(
            Operator::NotIn,
            vec![Expression::column("a", SqlType::decimal(5, 2)), sub_query],
            Some(SqlType::boolean()),
        );

        let plan = plan_in_operation(&coercion, &call).unwrap();
        assert_eq!(plan.to_string(), "[0] -> DECIMAL(19, 0), [1.0] -> DECIMAL(19, 0)");
    }

    #[test]
    fn test_in_row_valued() {
        let coercion = DefaultTypeCoercion::default();
        let call = in_list(
            Expression::row(vec![
                Expression::column("a", SqlType::integer()),
                Expression::column("d", SqlType::date()),
            ]),
            vec![Expression::row(vec![
                Expression::integer(1),
                Expression::string("2024-01-01"),
            ])],
        );

        let plan = plan_in_operation(&coercion, &call).unwrap();
        assert_eq!(plan.to_string(), "[1.0.1] -> DATE");
    }

    #[test]
    fn test_in_rejects_other_operators() {
        let coercion = DefaultTypeCoercion::default();
        let call = Expression::call(Operator::Coalesce, vec![Expression::integer(1)], None);
        assert!(matches!(
            plan_in_operation(&coercion, &call),
            Err(CoercionError::UnexpectedOperator { .. })
        ));
        assert!(matches!(
            plan_in_operation(&coercion, &Expression::integer(1)),
            Err(CoercionError::NotACall { .. })
        ));
    }

    #[test]
    fn test_quantify_array_constructor() {
        let coercion = DefaultTypeCoercion::default();
        let array = Expression::call(
            Operator::Array,
            vec![Expression::string("1"), Expression::string("22")],
            Some(SqlType::collection(SqlType::varchar(Some(2)))),
        );
        let call = some_equal(Expression::column("a", SqlType::integer()), array);

        let plan = plan_quantify_operation(&coercion, &call).unwrap();
        assert_eq!(plan.to_string(), "[0] -> VARCHAR");
    }

    #[test]
    fn test_quantify_array_operand() {
        let coercion = DefaultTypeCoercion::default();
        let call = some_equal(
            Expression::column("a", SqlType::double()),
            Expression::column("arr", SqlType::collection(SqlType::integer())),
        );

        let plan = plan_quantify_operation(&coercion, &call).unwrap();
        assert_eq!(plan.to_string(), "[1] -> DOUBLE ARRAY");
    }

    #[test]
    fn test_quantify_array_operand_ignores_nullability() {
        let coercion = DefaultTypeCoercion::default();
        let call = some_equal(
            Expression::column("x", SqlType::integer().with_nullable(true)),
            Expression::column("arr", SqlType::collection(SqlType::integer())),
        );

        assert!(plan_quantify_operation(&coercion, &call).unwrap().is_empty());
    }
}
