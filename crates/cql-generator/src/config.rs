use crate::error::GeneratorError;
use serde::Deserialize;

/// Output settings of the generator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Terminate every statement with `;`.
    pub trailing_semicolon: bool,
    /// Put each column definition on its own tab-indented line.
    pub pretty: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            trailing_semicolon: true,
            pretty: false,
        }
    }
}

impl GeneratorConfig {
    pub fn from_json(json: &str) -> Result<Self, GeneratorError> {
        Ok(serde_json::from_str(json)?)
    }
}
