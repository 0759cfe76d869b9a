use crate::error::SchemaError;

use super::ColumnType;

/// A column definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
    pub primary_key: bool,
    pub nullable: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
            primary_key: false,
            nullable: true,
        }
    }

    /// Marks the column as part of the primary key. Key columns are never nullable.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable && !self.primary_key;
        self
    }
}

/// A table definition: a name plus ordered columns.
///
/// Primary key order is the declaration order of the key columns: the first
/// one becomes the partition (HASH) key, the second the sort (RANGE) key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
}

impl Table {
    pub fn new(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = Column>,
    ) -> Result<Self, SchemaError> {
        let mut table = Self {
            name: name.into(),
            columns: Vec::new(),
        };
        for column in columns {
            table.add_column(column)?;
        }
        Ok(table)
    }

    pub fn add_column(&mut self, column: Column) -> Result<(), SchemaError> {
        if self.get_column(&column.name).is_some() {
            return Err(SchemaError::DuplicateColumn {
                table: self.name.clone(),
                column: column.name,
            });
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.primary_key)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_key_order_follows_declaration() {
        let table = Table::new(
            "t",
            [
                Column::new("ts", ColumnType::String).primary_key(),
                Column::new("name", ColumnType::String),
                Column::new("id", ColumnType::String).primary_key(),
            ],
        )
        .unwrap();

        let keys: Vec<_> = table
            .primary_key_columns()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(keys, vec!["ts", "id"]);
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let err = Table::new(
            "t",
            [
                Column::new("id", ColumnType::String),
                Column::new("id", ColumnType::Integer),
            ],
        )
        .unwrap_err();

        assert_eq!(
            err,
            SchemaError::DuplicateColumn {
                table: "t".to_string(),
                column: "id".to_string(),
            }
        );
    }

    #[test]
    fn test_key_columns_are_not_nullable() {
        let column = Column::new("id", ColumnType::String)
            .primary_key()
            .nullable(true);
        assert!(!column.nullable);
    }
}
