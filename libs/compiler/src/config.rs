//! Compiler configuration
//!
//! Limits applied before any packing happens. Loaded from TOML with defaults
//! for every missing key; there are no environment overrides and no global
//! instance, a `Compiler` owns its copy.

use crate::error::ConfigError;
use codec::MAX_TOKEN_TABLE_LEN;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Largest token table a batch may build; at most 256 (one-byte index)
    pub max_tokens: usize,

    /// Largest number of operations per batch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_operations: Option<usize>,

    /// Largest number of amount instructions per operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_instructions_per_operation: Option<usize>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            max_tokens: MAX_TOKEN_TABLE_LEN,
            max_operations: None,
            max_instructions_per_operation: None,
        }
    }
}

impl CompilerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!("Loaded compiler config from {:?}", path);
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tokens == 0 || self.max_tokens > MAX_TOKEN_TABLE_LEN {
            return Err(ConfigError::Invalid {
                field: "max_tokens",
                reason: format!("must be within 1..={}, got {}", MAX_TOKEN_TABLE_LEN, self.max_tokens),
            });
        }
        if self.max_operations == Some(0) {
            return Err(ConfigError::Invalid {
                field: "max_operations",
                reason: "must be positive when set".to_string(),
            });
        }
        if self.max_instructions_per_operation == Some(0) {
            return Err(ConfigError::Invalid {
                field: "max_instructions_per_operation",
                reason: "must be positive when set".to_string(),
            });
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}
