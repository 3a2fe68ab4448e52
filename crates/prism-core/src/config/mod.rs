//! Configuration management for Prism.
//!
//! Configuration is loaded from a platform-appropriate directory with
//! sensible defaults. All config structs implement `Default`.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Prism.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Corpus location settings
    pub corpus: CorpusConfig,

    /// Embedding sidecar service settings
    pub embedder: EmbedderConfig,

    /// Semantic matcher settings
    pub matcher: MatcherConfig,

    /// Result selection settings
    pub selection: SelectionConfig,

    /// Rating feedback settings
    pub feedback: FeedbackConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories, falling back to
    /// ~/.prism/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "prism", "prism")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".prism").join("config.toml")
            })
    }

    /// Get the resolved corpus dataset directory (with ~ expansion).
    pub fn dataset_dir(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.corpus.dataset_dir);
        PathBuf::from(expanded.into_owned())
    }

    /// Get the resolved rating log path (with ~ expansion).
    pub fn ratings_file(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.feedback.ratings_file);
        PathBuf::from(expanded.into_owned())
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
