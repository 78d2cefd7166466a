//! Generation settings loaded from YAML
//!
//! Every field is optional in the file; anything left out keeps its default.

use crate::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Placeholder returned by the generated `get_bearer_token` stub
pub const DEFAULT_TOKEN_PLACEHOLDER: &str = "YOUR_BEARER_TOKEN";

/// Upper bound on optional parameters enumerated per operation
pub const DEFAULT_MAX_OPTIONAL_PARAMS: usize = 16;

/// Settings threaded through a translation session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Overrides the base URL derived from the document
    pub base_url: Option<String>,

    /// Literal the generated token stub returns
    pub token_placeholder: String,

    /// Operations with more optional parameters than this are skipped
    pub max_optional_params: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token_placeholder: DEFAULT_TOKEN_PLACEHOLDER.to_string(),
            max_optional_params: DEFAULT_MAX_OPTIONAL_PARAMS,
        }
    }
}

impl GenerationConfig {
    /// Load settings from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content).map_err(|e| match e {
            GeneratorError::Config(msg) => {
                GeneratorError::Config(format!("{} (in {:?})", msg, path))
            }
            other => other,
        })
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file deserializes to null, not to a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content)
            .map_err(|e| GeneratorError::Config(format!("Failed to parse config YAML: {}", e)))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_token_placeholder(mut self, token: impl Into<String>) -> Self {
        self.token_placeholder = token.into();
        self
    }

    pub fn with_max_optional_params(mut self, max: usize) -> Self {
        self.max_optional_params = max;
        self
    }
}
