use thiserror::Error;

/// Errors returned by a session when a statement cannot be executed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// The statement is not valid CQL.
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// The statement is well-formed but the engine refuses it.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The keyspace or table being created already exists.
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// The keyspace or table being used or dropped does not exist.
    #[error("{0} does not exist")]
    NotFound(String),
}
