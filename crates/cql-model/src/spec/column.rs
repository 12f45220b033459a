use crate::core::{data_type::CqlType, identifier::CqlIdentifier};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort direction of a clustering column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ordering {
    #[default]
    Ascending,
    Descending,
}

impl Ordering {
    pub fn cql(&self) -> &'static str {
        match self {
            Ordering::Ascending => "ASC",
            Ordering::Descending => "DESC",
        }
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cql())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnRole {
    PartitionKey,
    ClusteringKey,
    Regular,
    /// Shared by all clustering rows of a partition.
    Static,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpecification {
    pub name: CqlIdentifier,
    pub data_type: CqlType,
    pub role: ColumnRole,
    /// Set for clustering columns only.
    pub ordering: Option<Ordering>,
}

impl ColumnSpecification {
    pub fn is_partition_key(&self) -> bool {
        self.role == ColumnRole::PartitionKey
    }

    pub fn is_clustering_key(&self) -> bool {
        self.role == ColumnRole::ClusteringKey
    }

    pub fn is_static(&self) -> bool {
        self.role == ColumnRole::Static
    }

    pub fn ordering(&self) -> Ordering {
        self.ordering.unwrap_or_default()
    }
}
