use crate::schema::Table;

use super::Expr;

/// `DELETE FROM table WHERE filter`.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: Table,
    pub filter: Option<Expr>,
}

pub fn delete(table: &Table) -> Delete {
    Delete {
        table: table.clone(),
        filter: None,
    }
}

impl Delete {
    pub fn filter(mut self, expr: Expr) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(expr),
            None => expr,
        });
        self
    }
}
