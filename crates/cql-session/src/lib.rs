//! An in-memory CQL session that executes schema statements.
//!
//! Statements are parsed with a pest grammar and applied to a schema catalog
//! that enforces the rules a cluster applies to DDL. Generated statements can
//! then be checked by reading the schema back.

pub mod ast;
pub mod error;
pub mod metadata;
pub mod parser;
pub mod session;

pub use crate::{
    error::SessionError,
    metadata::{ColumnMetadata, KeyspaceMetadata, OptionLiteral, TableMetadata},
    session::{MemorySession, Session},
};
