//! Site coercion strategies
//!
//! One planner per syntactic construct. Planners only read the tree; the
//! [`TypeCoercion`](crate::TypeCoercion) trait applies their plans.

pub mod binary;
pub mod conditional;
pub mod function;
pub mod membership;
pub mod set_op;

use crate::{CoercionError, CoercionResult, TypeCoercion};
use sqlcoerce_ast::{Call, Expression, ExpressionKind, OperandPath};
use sqlcoerce_types::SqlType;

/// The call behind `node`, or [`CoercionError::NotACall`]
fn expect_call(node: &Expression) -> CoercionResult<&Call> {
    node.as_call().ok_or_else(|| CoercionError::NotACall {
        found: node_kind(node).to_string(),
    })
}

/// The two operands of a binary call
fn binary_operands(call: &Call) -> CoercionResult<(&Expression, &Expression)> {
    match call.operands.as_slice() {
        [left, right] => Ok((left, right)),
        operands => Err(CoercionError::invariant(format!(
            "{} expects 2 operands, found {}",
            call.op,
            operands.len()
        ))),
    }
}

fn node_kind(node: &Expression) -> &'static str {
    match node.kind {
        ExpressionKind::Literal(_) => "literal",
        ExpressionKind::Identifier(_) => "identifier",
        ExpressionKind::DynamicParam(_) => "dynamic parameter",
        ExpressionKind::Alias(..) => "alias",
        ExpressionKind::Call(_) => "call",
        ExpressionKind::Case(_) => "CASE",
        ExpressionKind::Cast(..) => "CAST",
        ExpressionKind::ValueList(_) => "value list",
        ExpressionKind::NamedArgument(..) => "named argument",
        ExpressionKind::Select(_) => "SELECT",
        ExpressionKind::Values(_) => "VALUES",
        ExpressionKind::With(_) => "WITH",
        ExpressionKind::SetOp(_) => "set operation",
        ExpressionKind::Insert(_) => "INSERT",
        ExpressionKind::Update(_) => "UPDATE",
    }
}

/// `site` re-rooted under operand `index`
fn under(index: usize, site: &OperandPath) -> OperandPath {
    std::iter::once(index)
        .chain(site.indices().iter().copied())
        .collect()
}

/// Common comparison type of every known type in `types`
///
/// Falls back to the tightest common type at each step; unknown types are
/// skipped. `None` if there is no known type or no common type.
fn fold_comparison<'a, C>(
    coercion: &C,
    types: impl IntoIterator<Item = Option<&'a SqlType>>,
) -> Option<SqlType>
where
    C: TypeCoercion + ?Sized,
{
    let mut acc: Option<SqlType> = None;
    for ty in types.into_iter().flatten() {
        acc = Some(match acc {
            None => ty.clone(),
            Some(prev) => coercion
                .common_type_for_comparison(&prev, ty)
                .or_else(|| coercion.tightest_common_type(&prev, ty))?,
        });
    }
    acc
}
