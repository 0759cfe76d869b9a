//! Engine: the entry point that owns the DynamoDB client.

use std::time::Duration;

use aws_sdk_dynamodb::Client;
use sqla_core::schema::{MetaData, Table};
use sqla_core::stmt::{CreateTable, DropTable, Statement};
use tracing::{debug, info};

use crate::client::create_client;
use crate::config::ConnectOptions;
use crate::connection::Connection;
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::inspect::Inspector;

/// Polling schedule used by the `wait_until_*` helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            max_attempts: 60,
            delay: Duration::from_secs(2),
        }
    }
}

impl WaitOptions {
    fn waited_secs(&self) -> u64 {
        self.delay.as_secs() * u64::from(self.max_attempts)
    }
}

#[derive(Debug, Clone)]
pub struct Engine {
    client: Client,
    wait: WaitOptions,
}

impl Engine {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            wait: WaitOptions::default(),
        }
    }

    /// Connects with explicit options.
    pub async fn with_options(options: &ConnectOptions) -> Self {
        info!(endpoint = %options.target_display(), "Creating engine");
        Self::new(create_client(options).await)
    }

    /// Connects using `AWS_ENDPOINT_URL` and `AWS_REGION`.
    pub async fn from_env() -> Self {
        Self::with_options(&ConnectOptions::from_env()).await
    }

    /// Connects using a `dynamodb://` URL.
    pub async fn from_url(url: &str) -> Result<Self> {
        let options = ConnectOptions::from_url(url)?;
        Ok(Self::with_options(&options).await)
    }

    pub fn with_wait_options(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn connect(&self) -> Connection {
        Connection::new(self.client.clone())
    }

    pub fn inspector(&self) -> Inspector {
        Inspector::new(self.client.clone())
    }

    /// Runs a single statement on its own connection.
    pub async fn execute(&self, stmt: impl Into<Statement>) -> Result<Cursor> {
        self.connect().execute(stmt).await
    }

    /// Issues CreateTable for `table`.
    pub async fn create(&self, table: &Table) -> Result<()> {
        self.execute(CreateTable::new(table)).await?;
        Ok(())
    }

    /// Issues DeleteTable for `table_name`.
    pub async fn drop(&self, table_name: &str) -> Result<()> {
        self.execute(DropTable::new(table_name)).await?;
        Ok(())
    }

    /// Creates the tables of `metadata` that do not exist yet and waits for
    /// them to become active. Returns the names it created.
    pub async fn create_all(&self, metadata: &MetaData) -> Result<Vec<String>> {
        let inspector = self.inspector();
        let mut created = Vec::new();

        for table in metadata.tables() {
            if inspector.has_table(table.name()).await? {
                debug!(table = table.name(), "create_all: already exists");
                continue;
            }
            self.create(table).await?;
            self.wait_until_exists(table.name()).await?;
            created.push(table.name().to_string());
        }

        Ok(created)
    }

    /// Drops the tables of `metadata` that exist, in reverse order, and waits
    /// for them to disappear. Returns the names it dropped.
    pub async fn drop_all(&self, metadata: &MetaData) -> Result<Vec<String>> {
        let inspector = self.inspector();
        let mut dropped = Vec::new();

        for table in metadata.tables().iter().rev() {
            if !inspector.has_table(table.name()).await? {
                debug!(table = table.name(), "drop_all: already gone");
                continue;
            }
            self.drop(table.name()).await?;
            self.wait_until_not_exists(table.name()).await?;
            dropped.push(table.name().to_string());
        }

        Ok(dropped)
    }

    /// Polls until the table is ACTIVE.
    pub async fn wait_until_exists(&self, table_name: &str) -> Result<()> {
        let inspector = self.inspector();

        for _ in 0..self.wait.max_attempts {
            match inspector.describe_table(table_name).await {
                Ok(desc) if desc.table_status.as_ref().is_some_and(|s| s.is_active()) => {
                    return Ok(());
                }
                Ok(_) | Err(Error::TableNotFound(_)) => {}
                Err(err) => return Err(err),
            }
            tokio::time::sleep(self.wait.delay).await;
        }

        Err(Error::Timeout {
            table: table_name.to_string(),
            condition: "become active",
            waited_secs: self.wait.waited_secs(),
        })
    }

    /// Polls until DescribeTable reports the table as missing.
    pub async fn wait_until_not_exists(&self, table_name: &str) -> Result<()> {
        let inspector = self.inspector();

        for _ in 0..self.wait.max_attempts {
            if !inspector.has_table(table_name).await? {
                return Ok(());
            }
            tokio::time::sleep(self.wait.delay).await;
        }

        Err(Error::Timeout {
            table: table_name.to_string(),
            condition: "be deleted",
            waited_secs: self.wait.waited_secs(),
        })
    }
}
