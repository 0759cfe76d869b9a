//! CLI command definitions.

pub mod query;
pub mod table;

use clap::{Parser, Subcommand, ValueEnum};

/// Run SQL-style statements against DynamoDB.
#[derive(Debug, Parser)]
#[command(name = "sqla")]
#[command(version, about = "Run SQL-style statements against DynamoDB", long_about = None)]
pub struct Cli {
    /// Engine URL, e.g. `dynamodb://?endpoint_url=http://localhost:4566&region_name=us-east-1`.
    /// Falls back to AWS_ENDPOINT_URL and AWS_REGION when unset.
    #[arg(long, env = "SQLA_URL")]
    pub url: Option<String>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List table names.
    Tables,
    /// Show the key schema, columns and indexes of a table.
    Describe {
        /// Table name.
        table: String,
    },
    /// Run a PartiQL statement.
    Query(query::QueryCommand),
    /// Create a table from key column definitions.
    CreateTable(table::CreateTableCommand),
    /// Delete a table.
    DropTable {
        /// Table name.
        table: String,
        /// Return once DeleteTable is accepted instead of waiting for the table to disappear.
        #[arg(long)]
        no_wait: bool,
    },
}
