//! Table deployment operations (Imperative Shell).

use sqla::core::compiler::CreateTableRequest;
use sqla::core::reflect::TableDescription;
use sqla::core::stmt::CreateTable;
use sqla::core::{compile, Compiled, Table};
use sqla::Engine;

use super::error::{DynamodbError, Result};
use super::planning::{DeployPlan, DestroyPlan};

/// Describes `table_name`, mapping a missing table to `None`.
pub async fn get_table_state(
    engine: &Engine,
    table_name: &str,
) -> Result<Option<TableDescription>> {
    match engine.inspector().describe_table(table_name).await {
        Ok(desc) => Ok(Some(desc)),
        Err(sqla::Error::TableNotFound(_)) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Compiles the CreateTable request the deploy plan compares against.
pub fn desired_request(table: &Table) -> Result<CreateTableRequest> {
    match compile(&CreateTable::new(table).into())? {
        Compiled::CreateTable(request) => Ok(request),
        _ => Err(DynamodbError::UnexpectedRequest(table.name().to_string())),
    }
}

/// Execute a deploy plan.
pub async fn execute_deploy_plan(engine: &Engine, table: &Table, plan: &DeployPlan) -> Result<()> {
    match plan {
        DeployPlan::CreateTable { request } => {
            engine.create(table).await?;
            engine.wait_until_exists(&request.table_name).await?;
        }
        DeployPlan::KeyMismatch { table_name, .. } => {
            return Err(DynamodbError::KeyMismatch {
                table_name: table_name.clone(),
            });
        }
        DeployPlan::NoChanges { .. } => {}
    }
    Ok(())
}

/// Execute a destroy plan.
pub async fn execute_destroy_plan(engine: &Engine, plan: &DestroyPlan) -> Result<()> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            engine.drop(table_name).await?;
            engine.wait_until_not_exists(table_name).await?;
        }
        DestroyPlan::AlreadyGone { .. } => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamodb::config::{test_table, TEST_TABLE};

    #[test]
    fn test_desired_request_for_fixture() {
        let request = desired_request(&test_table(TEST_TABLE).unwrap()).unwrap();
        assert_eq!(request.table_name, TEST_TABLE);
        assert_eq!(request.key_schema.len(), 1);
        assert_eq!(request.key_schema[0].attribute_name, "id");
        assert_eq!(request.provisioned_throughput.read_capacity_units, 1);
        assert_eq!(request.provisioned_throughput.write_capacity_units, 1);
    }

    #[test]
    fn test_desired_request_without_key_fails() {
        let table = Table::new(
            "keyless",
            [sqla::core::Column::new("name", sqla::core::ColumnType::String)],
        )
        .unwrap();
        assert!(matches!(
            desired_request(&table),
            Err(DynamodbError::Compile(_))
        ));
    }
}
