//! Defines the core rendering trait and context for converting specifications to CQL.

use crate::{config::GeneratorConfig, dialect::Dialect, error::GeneratorError};

pub mod create_table;
pub mod drop_table;
pub mod keyspace;
pub mod options;

/// A trait for any specification that can be rendered into a CQL string.
pub trait Render {
    fn render(&self, renderer: &mut Renderer) -> Result<(), GeneratorError>;
}

/// A context that holds the state during the rendering process.
///
/// It accumulates the CQL string and provides access to the dialect and the
/// output settings.
pub struct Renderer<'a> {
    pub cql: String,
    pub dialect: &'a dyn Dialect,
    pub config: &'a GeneratorConfig,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect, config: &'a GeneratorConfig) -> Self {
        Self {
            cql: String::new(),
            dialect,
            config,
        }
    }

    /// Consumes the renderer and returns the final statement.
    pub fn finish(mut self) -> String {
        if self.config.trailing_semicolon {
            self.cql.push(';');
        }
        self.cql
    }

    /// Writes a parenthesised, comma separated list; one item per line when
    /// pretty printing.
    pub fn push_list(&mut self, items: &[String]) {
        if self.config.pretty {
            self.cql.push_str("(\n\t");
            self.cql.push_str(&items.join(",\n\t"));
            self.cql.push_str("\n)");
        } else {
            self.cql.push('(');
            self.cql.push_str(&items.join(", "));
            self.cql.push(')');
        }
    }
}
