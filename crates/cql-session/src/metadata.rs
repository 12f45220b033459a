//! Schema metadata exposed by the session after statements are applied.

use cql_model::{CqlIdentifier, CqlType, Ordering};
use std::collections::BTreeMap;

/// A literal value as read back from the schema.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionLiteral {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Map(BTreeMap<String, OptionLiteral>),
}

impl OptionLiteral {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionLiteral::Text(text) => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMetadata {
    pub name: CqlIdentifier,
    pub data_type: CqlType,
    pub is_static: bool,
    /// Set for clustering columns only.
    pub ordering: Option<Ordering>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableMetadata {
    pub keyspace: CqlIdentifier,
    pub name: CqlIdentifier,
    pub columns: Vec<ColumnMetadata>,
    pub partition_key: Vec<CqlIdentifier>,
    pub clustering_columns: Vec<CqlIdentifier>,
    pub compact_storage: bool,
    pub options: BTreeMap<String, OptionLiteral>,
}

impl TableMetadata {
    pub fn column(&self, name: &CqlIdentifier) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| &c.name == name)
    }

    pub fn partition_key(&self) -> Vec<&ColumnMetadata> {
        self.key_columns(&self.partition_key)
    }

    pub fn clustering_columns(&self) -> Vec<&ColumnMetadata> {
        self.key_columns(&self.clustering_columns)
    }

    pub fn option(&self, name: &str) -> Option<&OptionLiteral> {
        self.options.get(name)
    }

    fn key_columns(&self, names: &[CqlIdentifier]) -> Vec<&ColumnMetadata> {
        names.iter().filter_map(|name| self.column(name)).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyspaceMetadata {
    pub name: CqlIdentifier,
    pub replication: BTreeMap<String, OptionLiteral>,
    pub durable_writes: bool,
    pub tables: BTreeMap<CqlIdentifier, TableMetadata>,
}

impl KeyspaceMetadata {
    /// Looks a table up by its CQL name, so `Person` finds `person`.
    pub fn table(&self, name: &str) -> Option<&TableMetadata> {
        let ident = CqlIdentifier::from_cql(name).ok()?;
        self.tables.get(&ident)
    }
}
