use crate::error::CompileError;
use crate::schema::Table;
use crate::stmt::Expr;
use crate::value::Value;

use super::quote_ident;

/// Accumulates PartiQL text and its positional parameters.
pub(super) struct SqlWriter<'a> {
    table: &'a Table,
    pub(super) sql: String,
    pub(super) params: Vec<Value>,
}

impl<'a> SqlWriter<'a> {
    pub(super) fn new(table: &'a Table) -> Self {
        Self {
            table,
            sql: String::new(),
            params: Vec::new(),
        }
    }

    pub(super) fn push(&mut self, text: &str) {
        self.sql.push_str(text);
    }

    /// Writes a column name, rejecting columns the table does not declare.
    pub(super) fn column(&mut self, name: &str) -> Result<(), CompileError> {
        if self.table.get_column(name).is_none() {
            return Err(CompileError::UnknownColumn {
                table: self.table.name().to_string(),
                column: name.to_string(),
            });
        }
        self.sql.push_str(&quote_ident(name));
        Ok(())
    }

    pub(super) fn param(&mut self, value: &Value) -> Result<(), CompileError> {
        super::check_storable(value)?;
        self.sql.push('?');
        self.params.push(value.clone());
        Ok(())
    }

    pub(super) fn expr(&mut self, expr: &Expr) -> Result<(), CompileError> {
        self.expr_nested(expr, false)
    }

    fn expr_nested(&mut self, expr: &Expr, nested: bool) -> Result<(), CompileError> {
        match expr {
            Expr::Column(name) => self.column(name)?,
            Expr::Value(value) => self.param(value)?,
            Expr::BinaryOp { lhs, op, rhs } => {
                self.expr_nested(lhs, true)?;
                self.push(" ");
                self.push(op.as_str());
                self.push(" ");
                self.expr_nested(rhs, true)?;
            }
            Expr::And(operands) => self.junction(operands, "AND", nested)?,
            Expr::Or(operands) => self.junction(operands, "OR", nested)?,
            Expr::Not(inner) => {
                self.push("NOT (");
                self.expr_nested(inner, false)?;
                self.push(")");
            }
            Expr::InList { expr, list } => {
                if list.is_empty() {
                    return Err(self.empty_list("IN"));
                }
                self.expr_nested(expr, true)?;
                self.push(" IN [");
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.expr_nested(item, true)?;
                }
                self.push("]");
            }
            Expr::BeginsWith { expr, prefix } => {
                self.push("begins_with(");
                self.expr_nested(expr, true)?;
                self.push(", ");
                self.expr_nested(prefix, true)?;
                self.push(")");
            }
        }
        Ok(())
    }

    /// Joins operands with `AND` or `OR`, parenthesising when nested.
    fn junction(
        &mut self,
        operands: &[Expr],
        operator: &'static str,
        nested: bool,
    ) -> Result<(), CompileError> {
        match operands {
            [] => return Err(self.empty_list(operator)),
            [only] => return self.expr_nested(only, nested),
            _ => {}
        }
        if nested {
            self.push("(");
        }
        for (i, operand) in operands.iter().enumerate() {
            if i > 0 {
                self.push(" ");
                self.push(operator);
                self.push(" ");
            }
            self.expr_nested(operand, true)?;
        }
        if nested {
            self.push(")");
        }
        Ok(())
    }

    fn empty_list(&self, operator: &'static str) -> CompileError {
        CompileError::EmptyList {
            operator,
            table: self.table.name().to_string(),
        }
    }
}
