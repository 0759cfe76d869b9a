//! DB-API style cursor.

use aws_sdk_dynamodb::Client;
use sqla_core::compiler::{compile, Compiled, CreateTableRequest, ExecuteStatement};
use sqla_core::result::{process_records, Description, Row};
use sqla_core::stmt::Statement;
use sqla_core::value::Record;
use tracing::{debug, info};

use crate::conversions::{dump, load, to_attribute_value, to_create_table_input};
use crate::error::{
    map_create_table_error, map_delete_table_error, map_execute_statement_error,
    map_put_item_error, Error, Result,
};

/// Runs statements and hands out their rows.
///
/// A cursor owns the result set of the last statement it executed. Rows are
/// consumed in order by [`fetchone`](Cursor::fetchone),
/// [`fetchmany`](Cursor::fetchmany) and [`fetchall`](Cursor::fetchall).
#[derive(Debug)]
pub struct Cursor {
    client: Client,
    rows: Vec<Row>,
    position: usize,
    description: Vec<Description>,
    rowcount: i64,
    closed: bool,
}

impl Cursor {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            rows: Vec::new(),
            position: 0,
            description: Vec::new(),
            rowcount: -1,
            closed: false,
        }
    }

    /// Compiles and runs a statement, replacing the current result set.
    pub async fn execute(&mut self, stmt: impl Into<Statement>) -> Result<&mut Self> {
        if self.closed {
            return Err(Error::CursorClosed);
        }
        let stmt = stmt.into();
        info!(kind = stmt.kind(), "Cursor.execute");
        let compiled = compile(&stmt)?;
        self.execute_compiled(compiled).await
    }

    /// Runs an already compiled request.
    pub async fn execute_compiled(&mut self, compiled: Compiled) -> Result<&mut Self> {
        if self.closed {
            return Err(Error::CursorClosed);
        }
        self.reset();

        match compiled {
            Compiled::CreateTable(request) => self.create_table(&request).await?,
            Compiled::DeleteTable { table_name } => self.delete_table(&table_name).await?,
            Compiled::PutItem { table_name, item } => {
                self.put_item(&table_name, &item).await?;
                self.rowcount = 1;
            }
            Compiled::ExecuteStatement(exec) => {
                let records = self.execute_statement(&exec).await?;
                if exec.returns_rows {
                    let (rows, description) = process_records(records, exec.columns.as_deref());
                    self.rowcount = rows.len() as i64;
                    self.rows = rows;
                    self.description = description;
                }
            }
        }

        Ok(self)
    }

    async fn create_table(&self, request: &CreateTableRequest) -> Result<()> {
        debug!(table = %request.table_name, "CreateTable");
        let input = to_create_table_input(request)?;

        self.client
            .create_table()
            .table_name(&request.table_name)
            .set_key_schema(Some(input.key_schema))
            .set_attribute_definitions(Some(input.attribute_definitions))
            .provisioned_throughput(input.provisioned_throughput)
            .send()
            .await
            .map_err(|e| map_create_table_error(e, &request.table_name))?;
        Ok(())
    }

    async fn delete_table(&self, table_name: &str) -> Result<()> {
        debug!(table = %table_name, "DeleteTable");
        self.client
            .delete_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(|e| map_delete_table_error(e, table_name))?;
        Ok(())
    }

    async fn put_item(&self, table_name: &str, item: &Record) -> Result<()> {
        debug!(table = %table_name, attributes = item.len(), "PutItem");
        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(dump(item)))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, table_name))?;
        Ok(())
    }

    /// Follows `NextToken` until the results or the limit run out.
    async fn execute_statement(&self, exec: &ExecuteStatement) -> Result<Vec<Record>> {
        debug!(
            statement = %exec.statement,
            parameters = ?exec.parameters,
            limit = ?exec.limit,
            "ExecuteStatement"
        );

        let parameters: Option<Vec<_>> = (!exec.parameters.is_empty())
            .then(|| exec.parameters.iter().map(to_attribute_value).collect());
        let limit = exec.limit.map(|l| l.max(0) as usize);
        if limit == Some(0) {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let remaining = limit.map(|l| l.saturating_sub(records.len()));
            let response = self
                .client
                .execute_statement()
                .statement(&exec.statement)
                .set_parameters(parameters.clone())
                .set_limit(remaining.map(|r| r as i32))
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| map_execute_statement_error(e, &exec.statement))?;

            for item in response.items() {
                records.push(load(item)?);
            }

            if let Some(limit) = limit {
                if records.len() >= limit {
                    records.truncate(limit);
                    break;
                }
            }

            match response.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        debug!(items = records.len(), "ExecuteStatement returned");
        Ok(records)
    }

    fn reset(&mut self) {
        self.rows.clear();
        self.position = 0;
        self.description.clear();
        self.rowcount = -1;
    }

    /// Next row, `None` once the result set is exhausted.
    pub fn fetchone(&mut self) -> Option<Row> {
        let row = self.rows.get(self.position).cloned()?;
        self.position += 1;
        Some(row)
    }

    /// Up to `size` of the remaining rows.
    pub fn fetchmany(&mut self, size: usize) -> Vec<Row> {
        let start = self.position.min(self.rows.len());
        let end = start.saturating_add(size).min(self.rows.len());
        self.position = end;
        self.rows[start..end].to_vec()
    }

    /// Every remaining row.
    pub fn fetchall(&mut self) -> Vec<Row> {
        let start = self.position.min(self.rows.len());
        self.position = self.rows.len();
        self.rows[start..].to_vec()
    }

    pub fn description(&self) -> &[Description] {
        &self.description
    }

    /// Rows returned by a query, 1 after an insert, -1 otherwise.
    pub fn rowcount(&self) -> i64 {
        self.rowcount
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn close(&mut self) {
        info!("Cursor.close");
        self.reset();
        self.closed = true;
    }
}
