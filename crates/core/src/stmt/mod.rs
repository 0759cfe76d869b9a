//! Statement model.
//!
//! Statements are plain data built with small builder functions; the
//! [`compiler`](crate::compiler) lowers them into DynamoDB requests.

mod ddl;
mod delete;
mod expr;
mod insert;
mod raw;
mod select;
mod update;

pub use ddl::{CreateTable, DropTable};
pub use delete::{delete, Delete};
pub use expr::{col, lit, BinaryOp, Expr};
pub use insert::{insert, Insert};
pub use raw::RawStatement;
pub use select::{select, Select};
pub use update::{update, Update};

/// Any statement sqla can execute.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Insert(Insert),
    Select(Select),
    Update(Update),
    Delete(Delete),
    CreateTable(CreateTable),
    DropTable(DropTable),
    Raw(RawStatement),
}

impl Statement {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Insert(_) => "INSERT",
            Statement::Select(_) => "SELECT",
            Statement::Update(_) => "UPDATE",
            Statement::Delete(_) => "DELETE",
            Statement::CreateTable(_) => "CREATE TABLE",
            Statement::DropTable(_) => "DROP TABLE",
            Statement::Raw(_) => "RAW",
        }
    }
}

macro_rules! impl_from_statement {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Statement {
                fn from(stmt: $variant) -> Self {
                    Statement::$variant(stmt)
                }
            }
        )*
    };
}

impl_from_statement!(Insert, Select, Update, Delete, CreateTable, DropTable);

impl From<RawStatement> for Statement {
    fn from(stmt: RawStatement) -> Self {
        Statement::Raw(stmt)
    }
}
