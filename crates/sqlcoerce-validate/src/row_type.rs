//! Output columns of queries
//!
//! Queries carry no scalar type of their own. Their row type is read off the
//! first branch: the select list, the first VALUES row, the left side of a
//! set operation or the body of a WITH.

use crate::{CoercionError, CoercionResult};
use sqlcoerce_ast::{Expression, ExpressionKind, Operator, OperandPath};
use sqlcoerce_types::SqlType;

/// Column types of a query's output row; `None` for columns of unknown type
pub fn row_type(query: &Expression) -> Option<Vec<Option<SqlType>>> {
    match &query.kind {
        ExpressionKind::Select(select) => {
            Some(select.items.iter().map(|item| item.ty.clone()).collect())
        }
        ExpressionKind::Values(rows) => rows.first().map(|row| match row.op() {
            Some(Operator::Row) => row.operands().iter().map(|c| c.ty.clone()).collect(),
            _ => vec![row.ty.clone()],
        }),
        ExpressionKind::SetOp(set_op) => row_type(&set_op.left),
        ExpressionKind::With(with) => row_type(&with.body),
        _ => None,
    }
}

/// Type of output column `column` of a query
pub fn column_type(query: &Expression, column: usize) -> Option<SqlType> {
    row_type(query)?.into_iter().nth(column).flatten()
}

/// Paths of the expressions producing output column `column`, in every branch
///
/// A selected expression under an alias is addressed below the alias so a
/// cast keeps the column name. Select lists containing a star are skipped,
/// since their columns cannot be mapped to items.
pub fn column_sites(query: &Expression, column: usize) -> CoercionResult<Vec<OperandPath>> {
    let mut sites = Vec::new();
    collect_sites(query, column, &OperandPath::root(), &mut sites)?;
    Ok(sites)
}

fn collect_sites(
    query: &Expression,
    column: usize,
    prefix: &OperandPath,
    sites: &mut Vec<OperandPath>,
) -> CoercionResult<()> {
    match &query.kind {
        ExpressionKind::Select(select) => {
            if select.items.iter().any(Expression::is_star) {
                return Ok(());
            }
            let Some(item) = select.items.get(column) else {
                return Err(CoercionError::invariant(format!(
                    "column {column} out of range for select list of {} items",
                    select.items.len()
                )));
            };
            let path = prefix.child(column);
            match item.kind {
                ExpressionKind::Alias(..) => sites.push(path.child(0)),
                _ => sites.push(path),
            }
        }
        ExpressionKind::Values(rows) => {
            for (r, row) in rows.iter().enumerate() {
                let width = match row.op() {
                    Some(Operator::Row) => row.operand_count(),
                    _ => 1,
                };
                if column >= width {
                    return Err(CoercionError::invariant(format!(
                        "column {column} out of range for VALUES row {r} of width {width}"
                    )));
                }
                match row.op() {
                    Some(Operator::Row) => sites.push(prefix.child(r).child(column)),
                    _ => sites.push(prefix.child(r)),
                }
            }
        }
        ExpressionKind::SetOp(set_op) => {
            collect_sites(&set_op.left, column, &prefix.child(0), sites)?;
            collect_sites(&set_op.right, column, &prefix.child(1), sites)?;
        }
        ExpressionKind::With(with) => {
            collect_sites(&with.body, column, &prefix.child(with.items.len()), sites)?;
        }
        _ => {
            return Err(CoercionError::invariant(format!(
                "expected a query at {prefix}"
            )));
        }
    }
    Ok(())
}
