use crate::schema::Table;
use crate::value::Value;

/// `INSERT INTO table (...) VALUES (...)`, executed as a PutItem.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: Table,
    pub values: Vec<(String, Value)>,
}

pub fn insert(table: &Table) -> Insert {
    Insert {
        table: table.clone(),
        values: Vec::new(),
    }
}

impl Insert {
    /// Sets a column value; setting the same column twice keeps the last value.
    pub fn value(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        let column = column.into();
        let value = value.into();
        match self.values.iter_mut().find(|(name, _)| *name == column) {
            Some(slot) => slot.1 = value,
            None => self.values.push((column, value)),
        }
        self
    }
}
