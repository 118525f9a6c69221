//! Mutation gateway
//!
//! The only code that rewrites an expression tree. Strategies describe the
//! casts they want as a [`CoercionPlan`]; the gateway applies each edit by
//! wrapping the addressed operand in an implicit CAST.

use crate::{CoercionError, CoercionResult};
use log::debug;
use sqlcoerce_ast::{Expression, ExpressionKind, OperandPath};
use sqlcoerce_types::SqlType;
use std::fmt;

/// Convert the operand at `path` to `target`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperandEdit {
    pub path: OperandPath,
    pub target: SqlType,
}

/// Ordered edits a strategy decided on
///
/// Paths are relative to the node the strategy was invoked on. No edit's
/// path passes through another edit's operand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoercionPlan {
    edits: Vec<OperandEdit>,
}

impl CoercionPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: OperandPath, target: SqlType) {
        self.edits.push(OperandEdit { path, target });
    }

    /// Add an edit only if the operand at `path` actually needs converting
    pub fn push_if_needed(&mut self, root: &Expression, path: OperandPath, target: &SqlType) {
        if root
            .at_path(&path)
            .is_some_and(|operand| needs_conversion(operand, target))
        {
            self.push(path, target.clone());
        }
    }

    pub fn edits(&self) -> &[OperandEdit] {
        &self.edits
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

impl IntoIterator for CoercionPlan {
    type Item = OperandEdit;
    type IntoIter = std::vec::IntoIter<OperandEdit>;

    fn into_iter(self) -> Self::IntoIter {
        self.edits.into_iter()
    }
}

impl fmt::Display for CoercionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, edit) in self.edits.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} -> {}", edit.path, edit.target)?;
        }
        Ok(())
    }
}

/// Check if `operand` must be wrapped in a CAST to reach `target`
///
/// Operands of unknown type, dynamic parameters, ANY on either side,
/// string-to-string, integer-to-wider-integer and types equal to the target
/// sans nullability are left as they are.
pub fn needs_conversion(operand: &Expression, target: &SqlType) -> bool {
    let Some(from) = &operand.ty else {
        return false;
    };
    if operand.is_dynamic_param() || from.is_any() || target.is_any() {
        return false;
    }
    if from.is_character() && target.is_character() {
        return false;
    }
    if from.is_exact_integer() && target.is_exact_integer() && from.precision() <= target.precision()
    {
        return false;
    }
    !from.equals_sans_nullability(target)
}

/// Wrap operand `index` of `parent` in an implicit CAST to `target`
///
/// Returns `false` when no conversion is needed, so a second call with the
/// same target never wraps twice. The CAST type keeps the operand's
/// nullability. Alias and named-argument parents take the new type.
pub fn coerce_operand_type(
    parent: &mut Expression,
    index: usize,
    target: &SqlType,
) -> CoercionResult<bool> {
    let count = parent.operand_count();
    let Some(operand) = parent.operand_mut(index) else {
        return Err(CoercionError::invariant(format!(
            "operand {index} out of range for node with {count} operands"
        )));
    };
    if !needs_conversion(operand, target) {
        return Ok(false);
    }

    let nullable = operand.ty.as_ref().is_some_and(SqlType::is_nullable);
    let cast_type = target.clone().with_nullable(nullable);
    debug!(
        "implicit cast of operand {} from {} to {}",
        index,
        operand.ty.as_ref().map_or("?".to_string(), |t| t.to_string()),
        cast_type
    );
    operand.wrap_in_implicit_cast(cast_type.clone());

    if matches!(
        parent.kind,
        ExpressionKind::Alias(..) | ExpressionKind::NamedArgument(..)
    ) {
        parent.ty = Some(cast_type);
    }
    Ok(true)
}

/// Apply every edit of `plan` below `root`
///
/// Returns `true` if at least one operand was converted.
pub fn apply_plan(root: &mut Expression, plan: &CoercionPlan) -> CoercionResult<bool> {
    apply_plan_with(root, plan, coerce_operand_type)
}

/// Like [`apply_plan`], converting each operand through `coerce`
pub fn apply_plan_with<F>(
    root: &mut Expression,
    plan: &CoercionPlan,
    mut coerce: F,
) -> CoercionResult<bool>
where
    F: FnMut(&mut Expression, usize, &SqlType) -> CoercionResult<bool>,
{
    let mut coerced = false;
    for edit in plan.edits() {
        let Some((parent_path, index)) = edit.path.split_last() else {
            return Err(CoercionError::invariant("edit addresses the coerced node itself"));
        };
        let Some(parent) = root.at_indices_mut(parent_path) else {
            return Err(CoercionError::invariant(format!(
                "no node at operand path {}",
                edit.path
            )));
        };
        coerced |= coerce(parent, index, &edit.target)?;
    }
    Ok(coerced)
}
