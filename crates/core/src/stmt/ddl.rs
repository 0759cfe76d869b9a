use crate::schema::Table;

/// `CREATE TABLE` for a table definition.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    pub table: Table,
}

impl CreateTable {
    pub fn new(table: &Table) -> Self {
        Self {
            table: table.clone(),
        }
    }
}

/// `DROP TABLE` by name.
#[derive(Debug, Clone, PartialEq)]
pub struct DropTable {
    pub table_name: String,
}

impl DropTable {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
        }
    }
}
