use crate::error::CompileError;
use crate::stmt::{Delete, Insert, Select, Update};
use crate::value::Record;

use super::expr::SqlWriter;
use super::{check_storable, quote_ident, Compiled, ExecuteStatement};

pub(super) fn compile_insert(insert: &Insert) -> Result<Compiled, CompileError> {
    let table = &insert.table;

    if insert.values.is_empty() {
        return Err(CompileError::EmptyStatement {
            table: table.name().to_string(),
        });
    }

    let mut item = Record::new();
    for (name, value) in &insert.values {
        if table.get_column(name).is_none() {
            return Err(CompileError::UnknownColumn {
                table: table.name().to_string(),
                column: name.clone(),
            });
        }
        check_storable(value)?;
        // Null attributes are left out of the item.
        if !value.is_null() {
            item.insert(name.clone(), value.clone());
        }
    }

    for key in table.primary_key_columns() {
        let value = item.get(&key.name).ok_or_else(|| CompileError::MissingKey {
            table: table.name().to_string(),
            column: key.name.clone(),
        })?;

        let expected = key.ty.key_attribute_type();
        let actual = value.attribute_type();
        if expected.as_str() != actual.as_str() {
            return Err(CompileError::KeyTypeMismatch {
                column: key.name.clone(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
    }

    Ok(Compiled::PutItem {
        table_name: table.name().to_string(),
        item,
    })
}

pub(super) fn compile_select(select: &Select) -> Result<Compiled, CompileError> {
    let table = &select.table;
    let mut writer = SqlWriter::new(table);

    writer.push("SELECT ");
    if select.columns.is_empty() {
        writer.push("*");
    } else {
        for (i, name) in select.columns.iter().enumerate() {
            if i > 0 {
                writer.push(", ");
            }
            writer.column(name)?;
        }
    }
    writer.push(" FROM ");
    writer.push(&quote_ident(table.name()));

    if let Some(filter) = &select.filter {
        writer.push(" WHERE ");
        writer.expr(filter)?;
    }

    let columns = (!select.columns.is_empty()).then(|| select.columns.clone());

    Ok(Compiled::ExecuteStatement(ExecuteStatement {
        statement: writer.sql,
        parameters: writer.params,
        limit: select.limit,
        columns,
        returns_rows: true,
    }))
}

pub(super) fn compile_update(update: &Update) -> Result<Compiled, CompileError> {
    let table = &update.table;

    if update.assignments.is_empty() {
        return Err(CompileError::EmptyStatement {
            table: table.name().to_string(),
        });
    }

    let filter = update
        .filter
        .as_ref()
        .ok_or_else(|| CompileError::MissingFilter {
            statement: "UPDATE",
            table: table.name().to_string(),
        })?;

    let mut writer = SqlWriter::new(table);
    writer.push("UPDATE ");
    writer.push(&quote_ident(table.name()));

    for (name, value) in &update.assignments {
        if table.get_column(name).is_some_and(|c| c.primary_key) {
            return Err(CompileError::KeyAssignment {
                table: table.name().to_string(),
                column: name.clone(),
            });
        }

        // PartiQL removes an attribute instead of storing NULL into it.
        if value.is_null() {
            writer.push(" REMOVE ");
            writer.column(name)?;
        } else {
            writer.push(" SET ");
            writer.column(name)?;
            writer.push(" = ");
            writer.param(value)?;
        }
    }

    writer.push(" WHERE ");
    writer.expr(filter)?;

    Ok(Compiled::ExecuteStatement(ExecuteStatement {
        statement: writer.sql,
        parameters: writer.params,
        limit: None,
        columns: None,
        returns_rows: false,
    }))
}

pub(super) fn compile_delete(delete: &Delete) -> Result<Compiled, CompileError> {
    let table = &delete.table;

    let filter = delete
        .filter
        .as_ref()
        .ok_or_else(|| CompileError::MissingFilter {
            statement: "DELETE",
            table: table.name().to_string(),
        })?;

    let mut writer = SqlWriter::new(table);
    writer.push("DELETE FROM ");
    writer.push(&quote_ident(table.name()));
    writer.push(" WHERE ");
    writer.expr(filter)?;

    Ok(Compiled::ExecuteStatement(ExecuteStatement {
        statement: writer.sql,
        parameters: writer.params,
        limit: None,
        columns: None,
        returns_rows: false,
    }))
}
