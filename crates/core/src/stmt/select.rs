use crate::schema::Table;

use super::Expr;

/// `SELECT columns FROM table [WHERE filter]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: Table,
    pub columns: Vec<String>,
    pub filter: Option<Expr>,
    pub limit: Option<i32>,
}

/// Selects every column of `table`.
pub fn select(table: &Table) -> Select {
    Select {
        table: table.clone(),
        columns: table.column_names().map(String::from).collect(),
        filter: None,
        limit: None,
    }
}

impl Select {
    /// Restricts the projection to the given columns.
    pub fn columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a condition; repeated calls are combined with AND.
    pub fn filter(mut self, expr: Expr) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(expr),
            None => expr,
        });
        self
    }

    pub fn limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }
}
