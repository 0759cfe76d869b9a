//! The test fixture schema (Functional Core - pure data).

use sqla::core::{Column, ColumnType, SchemaError, Table};

/// Name of the table the integration suite expects to exist.
pub const TEST_TABLE: &str = "TEST_TABLE";

/// Returns the fixture table: a single `id` string partition key.
/// This is a pure function - no I/O.
pub fn test_table(table_name: &str) -> Result<Table, SchemaError> {
    Table::new(
        table_name,
        [Column::new("id", ColumnType::String).primary_key()],
    )
}
