//! Row alignment for set operations and INSERT/UPDATE sources

use super::under;
use crate::gateway::CoercionPlan;
use crate::row_type::column_sites;
use crate::{CoercionError, CoercionResult, TypeCoercion};
use sqlcoerce_ast::{Expression, ExpressionKind, OperandPath};
use sqlcoerce_types::SqlType;

/// Cast output column `column` of every branch of `query` to `target`
pub fn plan_row_type<C>(
    _coercion: &C,
    query: &Expression,
    column: usize,
    target: &SqlType,
) -> CoercionResult<CoercionPlan>
where
    C: TypeCoercion + ?Sized,
{
    let mut plan = CoercionPlan::new();
    for site in column_sites(query, column)? {
        plan.push_if_needed(query, site, target);
    }
    Ok(plan)
}

/// Cast the source columns of an INSERT, an UPDATE or a bare source query
///
/// Columns whose source type equals the target sans nullability are left
/// alone. If any other column cannot be implicitly cast, the plan is empty.
pub fn plan_query_source<C>(
    coercion: &C,
    query: &Expression,
    source_row: &[SqlType],
    target_row: &[SqlType],
) -> CoercionResult<CoercionPlan>
where
    C: TypeCoercion + ?Sized,
{
    if source_row.len() != target_row.len() {
        return Err(CoercionError::invariant(format!(
            "source row has {} columns, target row has {}",
            source_row.len(),
            target_row.len()
        )));
    }

    let mut columns = Vec::new();
    for (column, (source, target)) in source_row.iter().zip(target_row).enumerate() {
        if source.equals_sans_nullability(target) {
            continue;
        }
        if !coercion.can_cast_from(target, source) {
            return Ok(CoercionPlan::new());
        }
        columns.push((column, target));
    }

    let mut plan = CoercionPlan::new();
    for (column, target) in columns {
        for site in source_sites(query, column)? {
            plan.push_if_needed(query, site, target);
        }
    }
    Ok(plan)
}

fn source_sites(query: &Expression, column: usize) -> CoercionResult<Vec<OperandPath>> {
    match &query.kind {
        ExpressionKind::Insert(insert) => Ok(column_sites(&insert.source, column)?
            .iter()
            .map(|site| under(0, site))
            .collect()),
        ExpressionKind::Update(update) => {
            if column >= update.sources.len() {
                return Err(CoercionError::invariant(format!(
                    "column {column} out of range for UPDATE of {} columns",
                    update.sources.len()
                )));
            }
            Ok(vec![OperandPath::operand(column)])
        }
        _ => column_sites(query, column),
    }
}
