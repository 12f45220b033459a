#![allow(dead_code)]

use cql_generator::{CqlStatement, to_cql};
use cql_session::{MemorySession, Session, SessionError};
use tracing::info;

pub mod utils;

/// Keyspace every integration test starts in.
pub const TEST_KEYSPACE: &str = "cqlgenerator_it";

/// Creates a fresh session with [`TEST_KEYSPACE`] created and in use.
pub async fn fresh_session() -> MemorySession {
    MemorySession::with_keyspace(TEST_KEYSPACE)
        .await
        .expect("bootstrap test keyspace")
}

/// Renders `spec` with the default generator and runs it against `session`.
pub async fn generate_and_execute<S>(
    session: &MemorySession,
    spec: &S,
) -> Result<String, SessionError>
where
    S: CqlStatement,
{
    let cql = to_cql(spec).expect("generate cql");
    info!("Executing generated statement: {}", cql);
    session.execute(&cql).await?;
    Ok(cql)
}
