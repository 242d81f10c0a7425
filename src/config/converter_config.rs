use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{config::AliasStrategy, converter::ConversionError};

pub const DEFAULT_MAX_DEPTH: usize = 32;
pub const DEFAULT_ALIAS_SUFFIX_LENGTH: usize = 8;
pub const DEFAULT_ALIAS_RETRY_LIMIT: usize = 16;

/// Longest suffix a UUID v4 in simple form can supply.
pub const MAX_ALIAS_SUFFIX_LENGTH: usize = 32;

/// Settings for one conversion pass.
///
/// - `alias_strategy` picks the alias generator.
/// - `alias_suffix_length` is the length of random suffixes.
/// - `alias_retry_limit` bounds how many collisions a random generator tolerates for one seed.
/// - `max_depth` bounds how many `nested-one` levels one conversion pass descends into.
///   `nested-many` children are converted by their own pass when the relation query is generated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Strategy for alias suffixes
    pub alias_strategy: AliasStrategy,
    /// Random suffix length, clamped to `1..=32`
    pub alias_suffix_length: usize,
    /// Collisions tolerated per alias before giving up
    pub alias_retry_limit: usize,
    /// Deepest to-one nesting accepted per pass
    pub max_depth: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            alias_strategy: Default::default(),
            alias_suffix_length: DEFAULT_ALIAS_SUFFIX_LENGTH,
            alias_retry_limit: DEFAULT_ALIAS_RETRY_LIMIT,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ConverterConfig {
    /// Create default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience: default configuration with random alias suffixes.
    pub fn random() -> Self {
        Self {
            alias_strategy: AliasStrategy::Random,
            ..Self::default()
        }
    }

    /// Convenience: default configuration with counter alias suffixes.
    pub fn sequential() -> Self {
        Self {
            alias_strategy: AliasStrategy::Sequential,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_alias_suffix_length(mut self, length: usize) -> Self {
        self.alias_suffix_length = length;
        self
    }

    pub fn with_alias_retry_limit(mut self, limit: usize) -> Self {
        self.alias_retry_limit = limit;
        self
    }

    pub fn suffix_length(&self) -> usize {
        self.alias_suffix_length.clamp(1, MAX_ALIAS_SUFFIX_LENGTH)
    }

    /// Build from a JSON object. Missing keys keep their defaults.
    pub fn from_json(value: &Value) -> Result<Self, ConversionError> {
        serde_json::from_value(value.clone())
            .map_err(|err| ConversionError::Config(format!("invalid converter config: {}", err)))
    }

    /// Read a JSON configuration file.
    pub fn load_from_file(file_path: impl AsRef<Path>) -> Result<Self, ConversionError> {
        let file_path = file_path.as_ref();

        let file_content = fs::read_to_string(file_path)
            .map_err(|err| ConversionError::Config(format!("could not read {}: {}", file_path.display(), err)))?;

        let json_value = serde_json::from_str::<Value>(&file_content)
            .map_err(|err| ConversionError::Config(format!("{} does not contain valid JSON: {}", file_path.display(), err)))?;

        Self::from_json(&json_value)
    }
}
