use crate::schema::Table;
use crate::value::Value;

use super::Expr;

/// `UPDATE table SET ... WHERE filter`.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: Table,
    pub assignments: Vec<(String, Value)>,
    pub filter: Option<Expr>,
}

pub fn update(table: &Table) -> Update {
    Update {
        table: table.clone(),
        assignments: Vec::new(),
        filter: None,
    }
}

impl Update {
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.assignments.push((column.into(), value.into()));
        self
    }

    pub fn filter(mut self, expr: Expr) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(expr),
            None => expr,
        });
        self
    }
}
