mod metadata;
mod table;
mod types;

pub use metadata::MetaData;
pub use table::{Column, Table};
pub use types::{ColumnType, ScalarAttributeType, KEY_ATTRIBUTE_TYPES};
