//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.corpus.dataset_dir.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "corpus.dataset_dir must not be empty".into(),
            ));
        }
        if self.embedder.endpoint.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "embedder.endpoint must not be empty".into(),
            ));
        }
        if self.embedder.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "embedder.timeout_ms must be > 0".into(),
            ));
        }
        if self.matcher.parallel == 0 {
            return Err(ConfigError::ValidationError(
                "matcher.parallel must be > 0".into(),
            ));
        }
        if self.selection.top_k == 0 {
            return Err(ConfigError::ValidationError(
                "selection.top_k must be > 0".into(),
            ));
        }
        if self.selection.max_per_label == 0 {
            return Err(ConfigError::ValidationError(
                "selection.max_per_label must be > 0".into(),
            ));
        }
        Ok(())
    }
}
