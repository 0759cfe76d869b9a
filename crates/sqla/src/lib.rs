//! sqla - run relational statements against DynamoDB.
//!
//! Build tables and statements with [`sqla_core`], then execute them through
//! an [`Engine`]:
//!
//! ```no_run
//! use sqla::{Engine, Result};
//! use sqla::core::{col, insert, select, Column, ColumnType, Table};
//!
//! # async fn run() -> Result<()> {
//! let users = Table::new(
//!     "users",
//!     [
//!         Column::new("id", ColumnType::String).primary_key(),
//!         Column::new("name", ColumnType::String),
//!     ],
//! )?;
//!
//! let engine = Engine::from_url("dynamodb://?endpoint_url=http://localhost:4566").await?;
//! engine.create(&users).await?;
//! engine.wait_until_exists("users").await?;
//!
//! let connection = engine.connect();
//! connection.execute(insert(&users).value("id", "1").value("name", "John")).await?;
//!
//! let mut cursor = connection
//!     .execute(select(&users).filter(col("id").eq("1")))
//!     .await?;
//! let row = cursor.fetchone();
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod connection;
pub mod conversions;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod inspect;
pub mod output;

pub use sqla_core as core;

pub use config::ConnectOptions;
pub use connection::Connection;
pub use cursor::Cursor;
pub use engine::{Engine, WaitOptions};
pub use error::{Error, Result};
pub use inspect::Inspector;
