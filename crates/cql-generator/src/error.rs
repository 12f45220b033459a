use cql_model::{CqlIdentifier, TableName};
use thiserror::Error;

/// Errors raised while turning a specification into CQL.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The table specification is structurally incomplete.
    #[error("Invalid definition of table {table}: {reason}")]
    InvalidTableDefinition { table: TableName, reason: String },

    /// The keyspace specification cannot be rendered.
    #[error("Invalid definition of keyspace {keyspace}: {reason}")]
    InvalidKeyspaceDefinition {
        keyspace: CqlIdentifier,
        reason: String,
    },

    /// A stored option value no longer passes its rewrite rule.
    #[error("Option error: {0}")]
    Option(#[from] cql_model::SpecError),

    /// The generator configuration could not be read.
    #[error("Invalid generator configuration: {0}")]
    Config(#[from] serde_json::Error),
}
