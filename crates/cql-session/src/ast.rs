//! Parsed form of the schema statements the session executes.

use crate::metadata::OptionLiteral;
use cql_model::{CqlIdentifier, CqlType, Ordering, TableName};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateKeyspace(CreateKeyspace),
    DropKeyspace {
        name: CqlIdentifier,
        if_exists: bool,
    },
    CreateTable(CreateTable),
    DropTable {
        name: TableName,
        if_exists: bool,
    },
    Use(CqlIdentifier),
}

impl Statement {
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::CreateKeyspace(_) => "CREATE KEYSPACE",
            Statement::DropKeyspace { .. } => "DROP KEYSPACE",
            Statement::CreateTable(_) => "CREATE TABLE",
            Statement::DropTable { .. } => "DROP TABLE",
            Statement::Use(_) => "USE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateKeyspace {
    pub name: CqlIdentifier,
    pub if_not_exists: bool,
    pub properties: Vec<(String, OptionLiteral)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    pub name: TableName,
    pub if_not_exists: bool,
    pub columns: Vec<ColumnDefinition>,
    /// One entry per `PRIMARY KEY` declaration, inline or as a clause.
    pub primary_keys: Vec<PrimaryKey>,
    pub clustering_order: Option<Vec<(CqlIdentifier, Ordering)>>,
    pub compact_storage: bool,
    pub properties: Vec<(String, OptionLiteral)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: CqlIdentifier,
    pub data_type: CqlType,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryKey {
    pub partition_key: Vec<CqlIdentifier>,
    pub clustering_columns: Vec<CqlIdentifier>,
}
