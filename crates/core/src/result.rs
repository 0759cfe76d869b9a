//! Shapes decoded items into rows and a cursor description.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::value::{AttributeType, Record, Value};

/// One result row. Column names are shared by every row of a result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    names: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    pub fn new(names: Arc<[String]>, values: Vec<Value>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self { names, values }
    }

    /// Value by column name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let index = self.names.iter().position(|n| n == name)?;
        self.values.get(index)
    }

    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The row as a name → value map.
    pub fn as_map(&self) -> BTreeMap<String, Value> {
        self.names
            .iter()
            .cloned()
            .zip(self.values.iter().cloned())
            .collect()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.names.iter().zip(&self.values) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Column metadata reported by a cursor, shaped like a DB-API description
/// entry. Sizes, precision and scale are never known for DynamoDB.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description {
    pub name: String,
    pub type_code: AttributeType,
    pub display_size: Option<u32>,
    pub internal_size: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub null_ok: bool,
}

impl Description {
    fn new(name: String, type_code: AttributeType, null_ok: bool) -> Self {
        Self {
            name,
            type_code,
            display_size: None,
            internal_size: None,
            precision: None,
            scale: None,
            null_ok,
        }
    }
}

/// Turns records into rows plus their description.
///
/// With a `projection` the columns follow it; otherwise they are the sorted
/// union of every record's attribute names. An empty input yields no rows and
/// no description.
pub fn process_records(
    records: Vec<Record>,
    projection: Option<&[String]>,
) -> (Vec<Row>, Vec<Description>) {
    if records.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let names: Vec<String> = match projection {
        Some(columns) if !columns.is_empty() => columns.to_vec(),
        _ => records
            .iter()
            .flat_map(|record| record.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
    };

    let description = names
        .iter()
        .map(|name| {
            let mut type_code = AttributeType::Null;
            let mut null_ok = false;
            for record in &records {
                match record.get(name) {
                    Some(value) if !value.is_null() => type_code = value.attribute_type(),
                    _ => null_ok = true,
                }
            }
            Description::new(name.clone(), type_code, null_ok)
        })
        .collect();

    let names: Arc<[String]> = names.into();
    let rows = records
        .into_iter()
        .map(|mut record| {
            let values = names
                .iter()
                .map(|name| record.remove(name).unwrap_or(Value::Null))
                .collect();
            Row::new(Arc::clone(&names), values)
        })
        .collect();

    (rows, description)
}
