//! Binary arithmetic, binary comparison and BETWEEN

use super::{binary_operands, expect_call, fold_comparison};
use crate::gateway::CoercionPlan;
use crate::{CoercionError, CoercionResult, TypeCoercion};
use log::trace;
use sqlcoerce_ast::{Expression, OperandPath, Operator};
use sqlcoerce_types::OperandFamily;

/// Plan the cast of the non-numeric side of `a op b` to the numeric side's type
///
/// Fires only when exactly one operand is numeric and the other can be
/// implicitly cast to it. A DECIMAL side yields the policy's widest DECIMAL.
/// `+` and `-` with an INTERVAL operand are datetime arithmetic and are left
/// alone.
pub fn plan_binary_arithmetic<C>(coercion: &C, node: &Expression) -> CoercionResult<CoercionPlan>
where
    C: TypeCoercion + ?Sized,
{
    let call = expect_call(node)?;
    if !call.op.is_arithmetic() {
        return Err(CoercionError::UnexpectedOperator {
            expected: "arithmetic operator",
            found: call.op.to_string(),
        });
    }
    let (left, right) = binary_operands(call)?;
    let mut plan = CoercionPlan::new();
    let (Some(lt), Some(rt)) = (&left.ty, &right.ty) else {
        return Ok(plan);
    };
    if call.op.is_additive() && (lt.is_interval() || rt.is_interval()) {
        return Ok(plan);
    }

    let (index, numeric, other) = match (lt.is_numeric(), rt.is_numeric()) {
        (true, false) => (1, lt, rt),
        (false, true) => (0, rt, lt),
        _ => return Ok(plan),
    };
    let target = if numeric.is_decimal() {
        coercion.policy().max_precision_scale_decimal()
    } else {
        numeric.clone()
    };
    if !coercion.can_cast_from(&target, other) {
        trace!("arithmetic: {other} does not cast to {target}");
        return Ok(plan);
    }

    plan.push_if_needed(node, OperandPath::operand(index), &target);
    Ok(plan)
}

/// Plan casts for a binary comparison or BETWEEN
///
/// Nothing happens when every operand already belongs to the same broad
/// family. Otherwise each operand is cast to the comparison common type.
pub fn plan_binary_comparison<C>(coercion: &C, node: &Expression) -> CoercionResult<CoercionPlan>
where
    C: TypeCoercion + ?Sized,
{
    let call = expect_call(node)?;
    let operands: Vec<&Expression> = match call.op {
        Operator::Comparison(_) => {
            let (left, right) = binary_operands(call)?;
            vec![left, right]
        }
        Operator::Between => {
            if call.operands.len() != 3 {
                return Err(CoercionError::invariant(format!(
                    "BETWEEN expects 3 operands, found {}",
                    call.operands.len()
                )));
            }
            call.operands.iter().collect()
        }
        _ => {
            return Err(CoercionError::UnexpectedOperator {
                expected: "comparison operator or BETWEEN",
                found: call.op.to_string(),
            });
        }
    };

    let mut plan = CoercionPlan::new();
    let Some(types) = operands
        .iter()
        .map(|operand| operand.ty.as_ref())
        .collect::<Option<Vec<_>>>()
    else {
        return Ok(plan);
    };

    let family = OperandFamily::of(types[0]);
    if types.iter().all(|ty| OperandFamily::of(ty) == family) {
        return Ok(plan);
    }

    let Some(common) = fold_comparison(coercion, types.iter().copied().map(Some)) else {
        trace!("comparison: no common type for {}", call.op);
        return Ok(plan);
    };
    for index in 0..operands.len() {
        plan.push_if_needed(node, OperandPath::operand(index), &common);
    }
    Ok(plan)
}
