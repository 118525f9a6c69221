//! Expression AST nodes
//!
//! Every node carries the type the validator derived for it (if any) and the
//! span of the text it came from. Composite nodes expose their children as an
//! ordered list of operand positions so that coercion can address any of them
//! uniformly by index.

use crate::{
    Insert, Literal, OperandPath, Operator, Select, SetOpKind, SetOperation, Update, With, WithItem,
};
use sqlcoerce_diagnostics::Span;
use sqlcoerce_types::SqlType;

/// A typed expression node
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    /// Type derived by the validator; `None` for queries, stars and nodes
    /// not yet validated
    pub ty: Option<SqlType>,
    pub span: Span,
}

/// All expression kinds
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Literal(Literal),
    /// Column reference, possibly `*` or `t.*`
    Identifier(Identifier),
    /// `?` placeholder, by ordinal
    DynamicParam(usize),
    /// `expr AS name`
    Alias(Box<Expression>, String),
    /// Operator applied to ordered operands
    Call(Call),
    Case(Box<CaseExpr>),
    /// CAST to the node's type
    Cast(Box<Expression>, CastKind),
    /// Parenthesized list, the right side of `IN (...)`
    ValueList(Vec<Expression>),
    /// `name => value` argument of a function call
    NamedArgument(String, Box<Expression>),
    Select(Box<Select>),
    /// VALUES rows; each row is a [`Operator::Row`] call
    Values(Vec<Expression>),
    With(Box<With>),
    SetOp(Box<SetOperation>),
    Insert(Box<Insert>),
    Update(Box<Update>),
}

/// Whether a CAST was written by the user or inserted by coercion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastKind {
    Explicit,
    Implicit,
}

/// A (possibly qualified) column reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub names: Vec<String>,
    /// `*` or `t.*`
    pub star: bool,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            names: vec![name.into()],
            star: false,
        }
    }

    pub fn star() -> Self {
        Self {
            names: Vec::new(),
            star: true,
        }
    }
}

/// An operator call
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub op: Operator,
    pub operands: Vec<Expression>,
}

/// `CASE [value] WHEN .. THEN .. [ELSE ..] END`
///
/// Operand order: the optional value, each WHEN followed by its THEN, then
/// the optional ELSE.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseExpr {
    pub value: Option<Expression>,
    pub branches: Vec<CaseBranch>,
    pub else_result: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseBranch {
    pub when: Expression,
    pub then: Expression,
}

impl CaseExpr {
    /// Operand indices of every THEN result and the ELSE result
    pub fn result_indices(&self) -> Vec<usize> {
        let offset = usize::from(self.value.is_some());
        let mut indices: Vec<usize> = (0..self.branches.len())
            .map(|i| offset + 2 * i + 1)
            .collect();
        if self.else_result.is_some() {
            indices.push(offset + 2 * self.branches.len());
        }
        indices
    }
}

impl Expression {
    pub fn new(kind: ExpressionKind, ty: Option<SqlType>) -> Self {
        Self {
            kind,
            ty,
            span: Span::synthetic(),
        }
    }

    // === Builders ===

    /// Literal typed from its value
    pub fn literal(literal: Literal) -> Self {
        let ty = literal.sql_type();
        Self::new(ExpressionKind::Literal(literal), Some(ty))
    }

    pub fn null() -> Self {
        Self::literal(Literal::Null)
    }

    pub fn integer(value: i64) -> Self {
        Self::literal(Literal::Integer(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::literal(Literal::String(value.into()))
    }

    /// Column reference of a known type
    pub fn column(name: impl Into<String>, ty: SqlType) -> Self {
        Self::new(ExpressionKind::Identifier(Identifier::new(name)), Some(ty))
    }

    pub fn star() -> Self {
        Self::new(ExpressionKind::Identifier(Identifier::star()), None)
    }

    /// Dynamic parameter; its type is unknown until inferred
    pub fn param(ordinal: usize) -> Self {
        Self::new(ExpressionKind::DynamicParam(ordinal), None)
    }

    /// `expr AS alias`, typed like `expr`
    pub fn alias(expr: Expression, alias: impl Into<String>) -> Self {
        let ty = expr.ty.clone();
        Self::new(ExpressionKind::Alias(Box::new(expr), alias.into()), ty)
    }

    pub fn call(op: Operator, operands: Vec<Expression>, ty: Option<SqlType>) -> Self {
        Self::new(ExpressionKind::Call(Call { op, operands }), ty)
    }

    pub fn row(operands: Vec<Expression>) -> Self {
        Self::call(Operator::Row, operands, None)
    }

    pub fn case(case: CaseExpr, ty: Option<SqlType>) -> Self {
        Self::new(ExpressionKind::Case(Box::new(case)), ty)
    }

    /// Explicit CAST written in the query
    pub fn cast(expr: Expression, target: SqlType) -> Self {
        Self::new(
            ExpressionKind::Cast(Box::new(expr), CastKind::Explicit),
            Some(target),
        )
    }

    pub fn value_list(items: Vec<Expression>) -> Self {
        Self::new(ExpressionKind::ValueList(items), None)
    }

    /// `name => value`, typed like `value`
    pub fn named_argument(name: impl Into<String>, value: Expression) -> Self {
        let ty = value.ty.clone();
        Self::new(
            ExpressionKind::NamedArgument(name.into(), Box::new(value)),
            ty,
        )
    }

    pub fn select(select: Select) -> Self {
        Self::new(ExpressionKind::Select(Box::new(select)), None)
    }

    pub fn values(rows: Vec<Expression>) -> Self {
        Self::new(ExpressionKind::Values(rows), None)
    }

    pub fn with(items: Vec<WithItem>, body: Expression) -> Self {
        Self::new(ExpressionKind::With(Box::new(With { items, body })), None)
    }

    pub fn set_op(kind: SetOpKind, all: bool, left: Expression, right: Expression) -> Self {
        Self::new(
            ExpressionKind::SetOp(Box::new(SetOperation {
                kind,
                all,
                left,
                right,
            })),
            None,
        )
    }

    pub fn insert(insert: Insert) -> Self {
        Self::new(ExpressionKind::Insert(Box::new(insert)), None)
    }

    pub fn update(update: Update) -> Self {
        Self::new(ExpressionKind::Update(Box::new(update)), None)
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    // === Inspection ===

    pub fn as_call(&self) -> Option<&Call> {
        match &self.kind {
            ExpressionKind::Call(call) => Some(call),
            _ => None,
        }
    }

    /// Operator of a call node
    pub fn op(&self) -> Option<&Operator> {
        self.as_call().map(|call| &call.op)
    }

    pub fn is_null_literal(&self) -> bool {
        matches!(&self.kind, ExpressionKind::Literal(Literal::Null))
    }

    pub fn is_dynamic_param(&self) -> bool {
        matches!(self.kind, ExpressionKind::DynamicParam(_))
    }

    pub fn is_star(&self) -> bool {
        matches!(&self.kind, ExpressionKind::Identifier(id) if id.star)
    }

    /// Check if this node produces rows (SELECT, VALUES, WITH, set operation)
    pub fn is_query(&self) -> bool {
        matches!(
            self.kind,
            ExpressionKind::Select(_)
                | ExpressionKind::Values(_)
                | ExpressionKind::With(_)
                | ExpressionKind::SetOp(_)
        )
    }

    /// Check if this is a CAST inserted by coercion
    pub fn is_implicit_cast(&self) -> bool {
        matches!(self.kind, ExpressionKind::Cast(_, CastKind::Implicit))
    }

    // === Operand positions ===

    /// Ordered child positions of this node
    pub fn operands(&self) -> Vec<&Expression> {
        match &self.kind {
            ExpressionKind::Literal(_)
            | ExpressionKind::Identifier(_)
            | ExpressionKind::DynamicParam(_) => Vec::new(),
            ExpressionKind::Alias(expr, _)
            | ExpressionKind::Cast(expr, _)
            | ExpressionKind::NamedArgument(_, expr) => vec![expr.as_ref()],
            ExpressionKind::Call(call) => call.operands.iter().collect(),
            ExpressionKind::Case(case) => {
                let mut operands = Vec::with_capacity(2 * case.branches.len() + 2);
                operands.extend(case.value.as_ref());
                for branch in &case.branches {
                    operands.push(&branch.when);
                    operands.push(&branch.then);
                }
                operands.extend(case.else_result.as_ref());
                operands
            }
            ExpressionKind::ValueList(items) | ExpressionKind::Values(items) => {
                items.iter().collect()
            }
            ExpressionKind::Select(select) => {
                let mut operands: Vec<&Expression> = select.items.iter().collect();
                operands.extend(select.from.as_deref());
                operands.extend(select.where_clause.as_deref());
                operands
            }
            ExpressionKind::With(with) => {
                let mut operands: Vec<&Expression> =
                    with.items.iter().map(|item| &item.query).collect();
                operands.push(&with.body);
                operands
            }
            ExpressionKind::SetOp(set_op) => vec![&set_op.left, &set_op.right],
            ExpressionKind::Insert(insert) => vec![&insert.source],
            ExpressionKind::Update(update) => {
                let mut operands: Vec<&Expression> = update.sources.iter().collect();
                operands.extend(update.condition.as_deref());
                operands
            }
        }
    }

    /// Mutable child positions, in the same order as [`operands`](Self::operands)
    pub fn operands_mut(&mut self) -> Vec<&mut Expression> {
        match &mut self.kind {
            ExpressionKind::Literal(_)
            | ExpressionKind::Identifier(_)
            | ExpressionKind::DynamicParam(_) => Vec::new(),
            ExpressionKind::Alias(expr, _)
            | ExpressionKind::Cast(expr, _)
            | ExpressionKind::NamedArgument(_, expr) => vec![expr.as_mut()],
            ExpressionKind::Call(call) => call.operands.iter_mut().collect(),
            ExpressionKind::Case(case) => {
                let CaseExpr {
                    value,
                    branches,
                    else_result,
                } = &mut **case;
                let mut operands = Vec::with_capacity(2 * branches.len() + 2);
                operands.extend(value.as_mut());
                for branch in branches.iter_mut() {
                    operands.push(&mut branch.when);
                    operands.push(&mut branch.then);
                }
                operands.extend(else_result.as_mut());
                operands
            }
            ExpressionKind::ValueList(items) | ExpressionKind::Values(items) => {
                items.iter_mut().collect()
            }
            ExpressionKind::Select(select) => {
                let Select {
                    items,
                    from,
                    where_clause,
                } = &mut **select;
                let mut operands: Vec<&mut Expression> = items.iter_mut().collect();
                operands.extend(from.as_deref_mut());
                operands.extend(where_clause.as_deref_mut());
                operands
            }
            ExpressionKind::With(with) => {
                let With { items, body } = &mut **with;
                let mut operands: Vec<&mut Expression> =
                    items.iter_mut().map(|item| &mut item.query).collect();
                operands.push(body);
                operands
            }
            ExpressionKind::SetOp(set_op) => {
                let SetOperation { left, right, .. } = &mut **set_op;
                vec![left, right]
            }
            ExpressionKind::Insert(insert) => vec![&mut insert.source],
            ExpressionKind::Update(update) => {
                let Update {
                    sources, condition, ..
                } = &mut **update;
                let mut operands: Vec<&mut Expression> = sources.iter_mut().collect();
                operands.extend(condition.as_deref_mut());
                operands
            }
        }
    }

    pub fn operand(&self, index: usize) -> Option<&Expression> {
        self.operands().get(index).copied()
    }

    pub fn operand_mut(&mut self, index: usize) -> Option<&mut Expression> {
        self.operands_mut().into_iter().nth(index)
    }

    pub fn operand_count(&self) -> usize {
        self.operands().len()
    }

    /// Node addressed by `path` relative to this node
    pub fn at_path(&self, path: &OperandPath) -> Option<&Expression> {
        path.indices()
            .iter()
            .try_fold(self, |node, &index| node.operand(index))
    }

    /// Mutable node addressed by `indices` relative to this node
    pub fn at_indices_mut(&mut self, indices: &[usize]) -> Option<&mut Expression> {
        let mut node = self;
        for &index in indices {
            node = node.operand_mut(index)?;
        }
        Some(node)
    }

    /// Replace this node with an implicit CAST of itself to `target`
    ///
    /// The CAST keeps the span of the wrapped node.
    pub fn wrap_in_implicit_cast(&mut self, target: SqlType) {
        let span = self.span;
        let inner = std::mem::replace(self, Expression::null());
        *self = Expression {
            kind: ExpressionKind::Cast(Box::new(inner), CastKind::Implicit),
            ty: Some(target),
            span,
        };
    }
}
