//! Built-in and user-defined function calls

use super::expect_call;
use crate::gateway::CoercionPlan;
use crate::{CoercionResult, FunctionSignature, TypeCoercion};
use log::trace;
use sqlcoerce_ast::{Expression, ExpressionKind, OperandPath};
use sqlcoerce_types::{OperandFamily, OperandFamilyChecker, SqlType};

/// Plan casts satisfying a built-in operator's operand checker
///
/// Every operand is mapped to a destination type under the checker. `And`
/// children are satisfied in turn, each seeing the types the previous ones
/// chose, and the first failure aborts. `Or` takes the first child that can be
/// satisfied. If no alternative works the plan is empty, so a call is either
/// fully coerced or left untouched.
pub fn plan_builtin_function<C>(
    coercion: &C,
    node: &Expression,
    checker: &OperandFamilyChecker,
) -> CoercionResult<CoercionPlan>
where
    C: TypeCoercion + ?Sized,
{
    let call = expect_call(node)?;
    let types: Vec<Option<SqlType>> = call.operands.iter().map(|o| o.ty.clone()).collect();

    let mut plan = CoercionPlan::new();
    let known: Option<Vec<SqlType>> = types.iter().cloned().collect();
    if known.is_some_and(|known| checker.accepts(&known)) {
        return Ok(plan);
    }
    let Some(targets) = satisfy(coercion, checker, types) else {
        trace!("{}: operands do not satisfy {}", call.op, checker);
        return Ok(plan);
    };
    for (index, target) in targets.iter().enumerate() {
        if let Some(target) = target {
            plan.push_if_needed(node, OperandPath::operand(index), target);
        }
    }
    Ok(plan)
}

/// Destination types of `types` under `checker`, or `None` if unsatisfiable
fn satisfy<C>(
    coercion: &C,
    checker: &OperandFamilyChecker,
    types: Vec<Option<SqlType>>,
) -> Option<Vec<Option<SqlType>>>
where
    C: TypeCoercion + ?Sized,
{
    match checker {
        OperandFamilyChecker::Families(families) => {
            if families.len() != types.len() {
                return None;
            }
            families
                .iter()
                .zip(types)
                .map(|(&family, ty)| match ty {
                    None => Some(None),
                    Some(ty) => destination(coercion, &ty, family).map(Some),
                })
                .collect()
        }
        OperandFamilyChecker::And(children) => children
            .iter()
            .try_fold(types, |types, child| satisfy(coercion, child, types)),
        OperandFamilyChecker::Or(children) => children
            .iter()
            .find_map(|child| satisfy(coercion, child, types.clone())),
    }
}

fn destination<C>(coercion: &C, ty: &SqlType, family: OperandFamily) -> Option<SqlType>
where
    C: TypeCoercion + ?Sized,
{
    if family.contains(ty) {
        return Some(ty.clone());
    }
    // Never cast away from a numeric operand into another numeric family
    if family.is_numeric() && ty.is_numeric() {
        return Some(ty.clone());
    }
    coercion.implicit_cast(ty, family)
}

/// Plan casts of user-defined function arguments to their declared types
///
/// Named arguments resolve their parameter by name and are cast below the
/// name; positional ones by ordinal. Arguments with no parameter, or whose
/// type does not implicitly cast to it, are left alone.
pub fn plan_user_defined_function<C>(
    coercion: &C,
    node: &Expression,
    signature: &FunctionSignature,
) -> CoercionResult<CoercionPlan>
where
    C: TypeCoercion + ?Sized,
{
    let call = expect_call(node)?;
    let mut plan = CoercionPlan::new();

    for (index, argument) in call.operands.iter().enumerate() {
        let (path, value, declared) = match &argument.kind {
            ExpressionKind::NamedArgument(name, value) => (
                OperandPath::from([index, 0]),
                value.as_ref(),
                signature.parameter_by_name(name),
            ),
            _ => (
                OperandPath::operand(index),
                argument,
                signature.parameter_at(index),
            ),
        };
        let (Some(declared), Some(actual)) = (declared, &value.ty) else {
            trace!("{}: argument {} has no resolvable parameter", signature.name, index);
            continue;
        };
        if coercion.can_cast_from(declared, actual) {
            plan.push_if_needed(node, path, declared);
        }
    }
    Ok(plan)
}
