//! Lowers statements into DynamoDB requests.
//!
//! DDL becomes CreateTable/DeleteTable, INSERT becomes a PutItem and every
//! other DML statement becomes a PartiQL `ExecuteStatement` with positional
//! parameters. Nothing here performs I/O.

mod ddl;
mod dml;
mod expr;
mod request;

pub use request::{
    AttributeDefinition, Compiled, CreateTableRequest, ExecuteStatement, KeySchemaElement,
    KeyType, ProvisionedThroughput,
};

use crate::error::CompileError;
use crate::stmt::Statement;
use crate::value::Value;

/// Compiles a statement.
pub fn compile(stmt: &Statement) -> Result<Compiled, CompileError> {
    match stmt {
        Statement::CreateTable(create) => ddl::compile_create_table(&create.table),
        Statement::DropTable(drop) => Ok(Compiled::DeleteTable {
            table_name: drop.table_name.clone(),
        }),
        Statement::Insert(insert) => dml::compile_insert(insert),
        Statement::Select(select) => dml::compile_select(select),
        Statement::Update(update) => dml::compile_update(update),
        Statement::Delete(delete) => dml::compile_delete(delete),
        Statement::Raw(raw) => {
            for param in &raw.params {
                check_storable(param)?;
            }
            Ok(Compiled::ExecuteStatement(ExecuteStatement {
                statement: raw.sql.clone(),
                parameters: raw.params.clone(),
                limit: None,
                columns: None,
                returns_rows: true,
            }))
        }
    }
}

/// Rejects values DynamoDB cannot store, such as `NaN`.
fn check_storable(value: &Value) -> Result<(), CompileError> {
    if value.is_storable() {
        Ok(())
    } else {
        Err(CompileError::NonFiniteNumber(value.to_string()))
    }
}

/// Quotes a PartiQL identifier.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::{DropTable, RawStatement};

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("id"), r#""id""#);
        assert_eq!(quote_ident(r#"we"ird"#), r#""we""ird""#);
    }

    #[test]
    fn test_drop_table() {
        let compiled = compile(&DropTable::new("TEST_TABLE").into()).unwrap();
        assert_eq!(
            compiled,
            Compiled::DeleteTable {
                table_name: "TEST_TABLE".to_string()
            }
        );
        assert!(!compiled.returns_rows());
    }

    #[test]
    fn test_raw_passthrough() {
        let raw = RawStatement::new(r#"SELECT * FROM "t" WHERE "id" = ?"#).bind("1");
        match compile(&raw.into()).unwrap() {
            Compiled::ExecuteStatement(exec) => {
                assert_eq!(exec.statement, r#"SELECT * FROM "t" WHERE "id" = ?"#);
                assert_eq!(exec.parameters, vec!["1".into()]);
                assert!(exec.returns_rows);
                assert!(exec.columns.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_raw_rejects_non_finite_parameter() {
        let raw = RawStatement::new(r#"SELECT * FROM "t" WHERE "n" = ?"#).bind(f64::NAN);
        assert_eq!(
            compile(&raw.into()).unwrap_err(),
            CompileError::NonFiniteNumber("NaN".to_string())
        );
    }
}
