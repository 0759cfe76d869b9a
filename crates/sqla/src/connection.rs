//! DB-API style connection.

use aws_sdk_dynamodb::Client;
use sqla_core::stmt::Statement;
use tracing::{info, warn};

use crate::cursor::Cursor;
use crate::error::{Error, Result};

/// A handle on a DynamoDB client that opens cursors.
///
/// DynamoDB has no transactions here, so `commit` and `rollback` only check
/// that the connection is still open.
#[derive(Debug)]
pub struct Connection {
    client: Client,
    closed: bool,
}

impl Connection {
    pub(crate) fn new(client: Client) -> Self {
        info!("Connection opened");
        Self {
            client,
            closed: false,
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::ConnectionClosed);
        }
        Ok(())
    }

    pub fn cursor(&self) -> Result<Cursor> {
        self.ensure_open()?;
        info!("Connection.cursor");
        Ok(Cursor::new(self.client.clone()))
    }

    /// Runs a statement on a fresh cursor and returns it with its results.
    pub async fn execute(&self, stmt: impl Into<Statement>) -> Result<Cursor> {
        let mut cursor = self.cursor()?;
        cursor.execute(stmt).await?;
        Ok(cursor)
    }

    pub fn commit(&self) -> Result<()> {
        self.ensure_open()?;
        warn!("Connection.commit ignored: DynamoDB writes are applied immediately");
        Ok(())
    }

    pub fn rollback(&self) -> Result<()> {
        self.ensure_open()?;
        warn!("Connection.rollback ignored: DynamoDB writes are applied immediately");
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn close(&mut self) {
        if !self.closed {
            info!("Connection.close");
            self.closed = true;
        }
    }
}
