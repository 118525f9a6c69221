//! Query and DML AST nodes

use crate::{Expression, SetOpKind};

/// A SELECT query
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    /// Select list; items are plain expressions, aliases or stars
    pub items: Vec<Expression>,
    /// FROM clause
    pub from: Option<Box<Expression>>,
    /// WHERE clause
    pub where_clause: Option<Box<Expression>>,
}

impl Select {
    pub fn new(items: Vec<Expression>) -> Self {
        Self {
            items,
            from: None,
            where_clause: None,
        }
    }

    pub fn with_where(mut self, condition: Expression) -> Self {
        self.where_clause = Some(Box::new(condition));
        self
    }
}

/// A named query in a WITH clause
#[derive(Debug, Clone, PartialEq)]
pub struct WithItem {
    pub name: String,
    pub query: Expression,
}

/// `WITH name AS (query), ... body`
#[derive(Debug, Clone, PartialEq)]
pub struct With {
    pub items: Vec<WithItem>,
    pub body: Expression,
}

/// UNION / INTERSECT / EXCEPT of two queries
#[derive(Debug, Clone, PartialEq)]
pub struct SetOperation {
    pub kind: SetOpKind,
    /// `UNION ALL` rather than `UNION`
    pub all: bool,
    pub left: Expression,
    pub right: Expression,
}

/// `INSERT INTO table (columns) source`
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: String,
    /// Explicit target column list; empty means all columns
    pub columns: Vec<String>,
    /// Source query (VALUES, SELECT, set operation, ...)
    pub source: Expression,
}

/// `UPDATE table SET col = expr, ... WHERE condition`
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: String,
    /// Assigned columns, parallel to `sources`
    pub columns: Vec<String>,
    /// Source expression list, one per assigned column
    pub sources: Vec<Expression>,
    pub condition: Option<Box<Expression>>,
}
