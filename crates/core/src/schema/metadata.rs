use crate::error::SchemaError;

use super::Table;

/// An ordered collection of tables, unique by name.
#[derive(Debug, Clone, Default)]
pub struct MetaData {
    tables: Vec<Table>,
}

impl MetaData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, table: Table) -> Result<&Table, SchemaError> {
        if self.get(table.name()).is_some() {
            return Err(SchemaError::DuplicateTable(table.name().to_string()));
        }
        self.tables.push(table);
        Ok(&self.tables[self.tables.len() - 1])
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name() == name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Table> {
        let index = self.tables.iter().position(|t| t.name() == name)?;
        Some(self.tables.remove(index))
    }

    /// Tables in insertion order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
