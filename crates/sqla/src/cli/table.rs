//! `sqla create-table`.

use std::str::FromStr;

use clap::Parser;
use sqla_core::error::SchemaError;
use sqla_core::schema::{Column, ColumnType, ScalarAttributeType, Table};

/// A key column given as `name[:S|N|B]`. The type defaults to `S`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyColumn {
    pub name: String,
    pub attribute_type: ScalarAttributeType,
}

impl FromStr for KeyColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, attribute_type) = match s.split_once(':') {
            Some((name, ty)) => {
                let ty = ScalarAttributeType::parse(ty)
                    .ok_or_else(|| format!("unknown key type '{ty}', expected S, N or B"))?;
                (name, ty)
            }
            None => (s, ScalarAttributeType::S),
        };

        if name.is_empty() {
            return Err("key column name cannot be empty".to_string());
        }

        Ok(Self {
            name: name.to_string(),
            attribute_type,
        })
    }
}

impl KeyColumn {
    fn to_column(&self) -> Column {
        let ty = match self.attribute_type {
            ScalarAttributeType::S => ColumnType::String,
            ScalarAttributeType::N => ColumnType::Numeric,
            ScalarAttributeType::B => ColumnType::LargeBinary,
        };
        Column::new(self.name.clone(), ty).primary_key()
    }
}

#[derive(Debug, Parser)]
pub struct CreateTableCommand {
    /// Table name.
    pub name: String,

    /// Partition key, `name[:S|N|B]`.
    #[arg(long)]
    pub hash: KeyColumn,

    /// Sort key, `name[:S|N|B]`.
    #[arg(long)]
    pub range: Option<KeyColumn>,

    /// Print the CreateTable request instead of sending it.
    #[arg(long)]
    pub dry_run: bool,

    /// Return once CreateTable is accepted instead of waiting for ACTIVE.
    #[arg(long)]
    pub no_wait: bool,
}

impl CreateTableCommand {
    pub fn to_table(&self) -> Result<Table, SchemaError> {
        let columns = std::iter::once(&self.hash)
            .chain(self.range.as_ref())
            .map(KeyColumn::to_column);
        Table::new(self.name.clone(), columns)
    }
}
