//! CASE, COALESCE and NULLIF

use super::node_kind;
use crate::gateway::CoercionPlan;
use crate::{CoercionError, CoercionResult, TypeCoercion};
use log::trace;
use sqlcoerce_ast::{Expression, ExpressionKind, OperandPath, Operator};
use sqlcoerce_types::SqlType;

/// Plan casts unifying the results of a CASE or the arguments of COALESCE
///
/// The common type is the wider type of every THEN and ELSE result (CASE) or
/// every argument (COALESCE), with string promotion. NULLIF compares its
/// operands without retyping them and always yields an empty plan.
pub fn plan_case_or_equivalent<C>(coercion: &C, node: &Expression) -> CoercionResult<CoercionPlan>
where
    C: TypeCoercion + ?Sized,
{
    let indices = match &node.kind {
        ExpressionKind::Case(case) => case.result_indices(),
        ExpressionKind::Call(call) => match call.op {
            Operator::Coalesce => (0..call.operands.len()).collect(),
            Operator::NullIf => return Ok(CoercionPlan::new()),
            _ => {
                return Err(CoercionError::UnexpectedOperator {
                    expected: "CASE, COALESCE or NULLIF",
                    found: call.op.to_string(),
                });
            }
        },
        _ => {
            return Err(CoercionError::UnexpectedOperator {
                expected: "CASE, COALESCE or NULLIF",
                found: node_kind(node).to_string(),
            });
        }
    };

    let types: Vec<SqlType> = indices
        .iter()
        .filter_map(|&i| node.operand(i).and_then(|operand| operand.ty.clone()))
        .collect();

    let mut plan = CoercionPlan::new();
    let Some(common) = coercion.wider_type_for_many(&types, true) else {
        trace!("CASE: no common type");
        return Ok(plan);
    };
    for index in indices {
        plan.push_if_needed(node, OperandPath::operand(index), &common);
    }
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DefaultTypeCoercion;
    use pretty_assertions::assert_eq;
    use sqlcoerce_ast::{CaseBranch, CaseExpr};

    fn branch(when: &str, then: Expression) -> CaseBranch {
        CaseBranch {
            when: Expression::column(when, SqlType::boolean()),
            then,
        }
    }

    #[test]
    fn test_case_results_unified() {
        let coercion = DefaultTypeCoercion::default();
        let case = Expression::case(
            CaseExpr {
                value: None,
                branches: vec![
                    branch("a", Expression::column("i", SqlType::integer())),
                    branch("b", Expression::column("d", SqlType::decimal(10, 2))),
                ],
                else_result: Some(Expression::integer(0)),
            },
            None,
        );

        let plan = plan_case_or_equivalent(&coercion, &case).unwrap();
        assert_eq!(
            plan.to_string(),
            "[1] -> DECIMAL(12, 2), [3] -> DECIMAL(12, 2), [4] -> DECIMAL(12, 2)"
        );
    }

    #[test]
    fn test_case_with_value_skips_when_operands() {
        let coercion = DefaultTypeCoercion::default();
        let case = Expression::case(
            CaseExpr {
                value: Some(Expression::column("k", SqlType::varchar(None))),
                branches: vec![CaseBranch {
                    when: Expression::string("x"),
                    then: Expression::integer(1),
                }],
                else_result: Some(Expression::string("none")),
            },
            None,
        );

        let plan = plan_case_or_equivalent(&coercion, &case).unwrap();
        assert_eq!(plan.to_string(), "[2] -> VARCHAR");
    }

    #[test]
    fn test_coalesce() {
        let coercion = DefaultTypeCoercion::default();
        let call = Expression::call(
            Operator::Coalesce,
            vec![
                Expression::column("a", SqlType::smallint().with_nullable(true)),
                Expression::column("b", SqlType::double()),
            ],
            None,
        );
        let plan = plan_case_or_equivalent(&coercion, &call).unwrap();
        assert_eq!(plan.to_string(), "[0] -> DOUBLE");
    }

    #[test]
    fn test_nullif_never_coerced() {
        let coercion = DefaultTypeCoercion::default();
        let call = Expression::call(
            Operator::NullIf,
            vec![Expression::integer(1), Expression::string("1")],
            None,
        );
        assert!(plan_case_or_equivalent(&coercion, &call).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_other_nodes() {
        let coercion = DefaultTypeCoercion::default();
        assert!(plan_case_or_equivalent(&coercion, &Expression::integer(1)).is_err());
        let call = Expression::call(Operator::Row, vec![Expression::integer(1)], None);
        assert!(plan_case_or_equivalent(&coercion, &call).is_err());
    }
}
