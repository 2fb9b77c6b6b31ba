//! Configuration system for MatchForge.
//!
//! Load scorer profiles from TOML or YAML to choose a scorer, its
//! parameters, preprocessing and default cutoff without code changes.
//!
//! # Examples
//!
//! ```
//! use matchforge_config::{MatchConfig, PreprocessMode};
//!
//! let config = MatchConfig::from_toml_str(r#"
//!     [profiles.names]
//!     scorer = "levenshtein"
//!     preprocess = "default"
//!     score_cutoff = 2
//!
//!     [profiles.names.params]
//!     weights = [1, 1, 2]
//!
//!     [parallel]
//!     chunk_size = 128
//! "#).unwrap();
//!
//! let names = config.profile("names").unwrap();
//! assert_eq!(names.scorer, "levenshtein");
//! assert_eq!(names.preprocess, PreprocessMode::Default);
//! assert_eq!(names.score_cutoff, Some(2.0));
//! assert_eq!(config.parallel.chunk_size, 128);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use matchforge_config::MatchConfig;
//!
//! let config = MatchConfig::load("matchforge.toml").unwrap_or_default();
//! assert!(config.profiles.is_empty());
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use matchforge_core::{ParamSet, ParamValue};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MatchConfig {
    /// Named scorer profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileConfig>,

    /// Parallel batch scoring.
    #[serde(default)]
    pub parallel: ParallelConfig,
}

impl MatchConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, choosing the format by extension
    /// (`.yaml`/`.yml`, TOML otherwise).
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, doesn't parse, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses and validates configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Adds or replaces a profile.
    pub fn with_profile(mut self, name: impl Into<String>, profile: ProfileConfig) -> Self {
        self.profiles.insert(name.into(), profile);
        self
    }

    /// Sets the parallel chunk size.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.parallel.chunk_size = chunk_size;
        self
    }

    /// Looks up a profile by name.
    pub fn profile(&self, name: &str) -> Option<&ProfileConfig> {
        self.profiles.get(name)
    }

    /// Checks everything that can be checked without a scorer registry.
    ///
    /// Whether the scorer exists and accepts the parameters is only known
    /// once the profile is prepared against a registry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, profile) in &self.profiles {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid("profile name is empty".to_string()));
            }
            profile
                .validate()
                .map_err(|msg| ConfigError::Invalid(format!("profile '{}': {}", name, msg)))?;
        }
        if self.parallel.chunk_size == 0 {
            return Err(ConfigError::Invalid(
                "parallel.chunk_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// One named scorer setup.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProfileConfig {
    /// Registered scorer name.
    pub scorer: String,

    /// Parameters handed to the scorer's kwargs constructor.
    #[serde(default)]
    pub params: ParamSet,

    /// Preprocessing applied to host values.
    #[serde(default)]
    pub preprocess: PreprocessMode,

    /// Default cutoff, converted into the scorer's result domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_cutoff: Option<f64>,

    /// Default score hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_hint: Option<f64>,
}

impl ProfileConfig {
    /// Creates a profile for `scorer` with default settings.
    pub fn new(scorer: impl Into<String>) -> Self {
        Self {
            scorer: scorer.into(),
            ..Self::default()
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key, value);
        self
    }

    pub fn with_preprocess(mut self, mode: PreprocessMode) -> Self {
        self.preprocess = mode;
        self
    }

    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.score_cutoff = Some(cutoff);
        self
    }

    pub fn with_hint(mut self, hint: f64) -> Self {
        self.score_hint = Some(hint);
        self
    }

    fn validate(&self) -> Result<(), String> {
        if self.scorer.trim().is_empty() {
            return Err("scorer name is empty".to_string());
        }
        for (key, value) in [("score_cutoff", self.score_cutoff), ("score_hint", self.score_hint)] {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(format!("{} must be finite, got {}", key, v));
                }
            }
        }
        Ok(())
    }
}

/// Preprocessing applied before scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreprocessMode {
    /// Use the raw value.
    #[default]
    None,

    /// Lowercase, replace non-alphanumerics with spaces, trim.
    Default,
}

/// Parallel batch scoring configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ParallelConfig {
    /// Haystacks per worker chunk.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Smallest batch scored in parallel; smaller batches run sequentially.
    #[serde(default = "default_min_batch")]
    pub min_batch: usize,
}

fn default_chunk_size() -> usize {
    256
}

fn default_min_batch() -> usize {
    1024
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            min_batch: default_min_batch(),
        }
    }
}
