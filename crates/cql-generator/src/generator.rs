//! Turns specifications into CQL statements.

use crate::{
    config::GeneratorConfig,
    dialect::{Cassandra, Dialect},
    error::GeneratorError,
    renderer::{Render, Renderer},
};
use tracing::debug;

/// A specification the generator can render.
///
/// `validate` runs to completion before any text is produced, so a failing
/// specification never yields partial CQL.
pub trait CqlStatement: Render {
    fn validate(&self) -> Result<(), GeneratorError> {
        Ok(())
    }

    /// Statement keyword, used for logging.
    fn kind(&self) -> &'static str;
}

/// Stateless CQL generator. Holds only immutable settings, so one instance
/// can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct CqlGenerator<D: Dialect = Cassandra> {
    dialect: D,
    config: GeneratorConfig,
}

impl CqlGenerator<Cassandra> {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            dialect: Cassandra,
            config,
        }
    }
}

impl<D: Dialect> CqlGenerator<D> {
    pub fn with_dialect(dialect: D, config: GeneratorConfig) -> Self {
        Self { dialect, config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn to_cql<S: CqlStatement>(&self, spec: &S) -> Result<String, GeneratorError> {
        spec.validate()?;

        let mut renderer = Renderer::new(&self.dialect, &self.config);
        spec.render(&mut renderer)?;
        let cql = renderer.finish();

        debug!("Generated {} ({}): {}", spec.kind(), self.dialect.name(), cql);
        Ok(cql)
    }
}

/// Renders `spec` with the Cassandra dialect and default settings.
pub fn to_cql<S: CqlStatement>(spec: &S) -> Result<String, GeneratorError> {
    CqlGenerator::new(GeneratorConfig::default()).to_cql(spec)
}
