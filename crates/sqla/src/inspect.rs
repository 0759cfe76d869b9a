//! Live table reflection.

use aws_sdk_dynamodb::Client;
use sqla_core::reflect::{
    self, ColumnInfo, ForeignKeyInfo, IndexInfo, PrimaryKeyConstraint, TableDescription,
};
use sqla_core::schema::Table;
use tracing::debug;

use crate::conversions::from_sdk_table_description;
use crate::error::{map_describe_table_error, map_list_tables_error, Error, Result};

/// Reads table metadata from DynamoDB.
#[derive(Debug, Clone)]
pub struct Inspector {
    client: Client,
}

impl Inspector {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Every table name, following ListTables pagination.
    pub async fn get_table_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut start: Option<String> = None;

        loop {
            let response = self
                .client
                .list_tables()
                .set_exclusive_start_table_name(start.take())
                .send()
                .await
                .map_err(map_list_tables_error)?;

            names.extend(response.table_names().iter().cloned());

            match response.last_evaluated_table_name() {
                Some(last) => start = Some(last.to_string()),
                None => break,
            }
        }

        debug!(count = names.len(), "ListTables");
        Ok(names)
    }

    pub async fn has_table(&self, table_name: &str) -> Result<bool> {
        match self.describe_table(table_name).await {
            Ok(_) => Ok(true),
            Err(Error::TableNotFound(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }

    pub async fn describe_table(&self, table_name: &str) -> Result<TableDescription> {
        let response = self
            .client
            .describe_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(|e| map_describe_table_error(e, table_name))?;

        let table = response
            .table()
            .ok_or_else(|| Error::TableNotFound(table_name.to_string()))?;

        Ok(from_sdk_table_description(table)?)
    }

    pub async fn get_columns(&self, table_name: &str) -> Result<Vec<ColumnInfo>> {
        Ok(reflect::columns(&self.describe_table(table_name).await?))
    }

    pub async fn get_pk_constraint(&self, table_name: &str) -> Result<PrimaryKeyConstraint> {
        Ok(reflect::primary_key(
            &self.describe_table(table_name).await?,
        ))
    }

    pub async fn get_foreign_keys(&self, table_name: &str) -> Result<Vec<ForeignKeyInfo>> {
        Ok(reflect::foreign_keys(
            &self.describe_table(table_name).await?,
        ))
    }

    pub async fn get_indexes(&self, table_name: &str) -> Result<Vec<IndexInfo>> {
        Ok(reflect::indexes(&self.describe_table(table_name).await?))
    }

    /// Autoloads a [`Table`] from the live key schema.
    pub async fn reflect_table(&self, table_name: &str) -> Result<Table> {
        Ok(reflect::to_table(&self.describe_table(table_name).await?)?)
    }
}
