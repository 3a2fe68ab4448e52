//! Sub-configuration structs with defaults matching the shipped corpus layout.

use serde::{Deserialize, Serialize};

/// Corpus location settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Root directory of the image corpus (tiny-imagenet layout)
    pub dataset_dir: String,

    /// Offline indexer's metadata file, relative to `dataset_dir`
    pub metadata_file: String,

    /// Precomputed embedding matrix (raw little-endian f32), relative to
    /// `dataset_dir`
    pub embeddings_file: String,

    /// Embedding manifest (dimension + filename order), relative to
    /// `dataset_dir`
    pub manifest_file: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            dataset_dir: "~/.prism/tiny-imagenet-200".to_string(),
            metadata_file: "annoy_data/metadata.json".to_string(),
            embeddings_file: "annoy_data/embeddings.bin".to_string(),
            manifest_file: "annoy_data/embeddings.json".to_string(),
        }
    }
}

/// Embedding sidecar service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedderConfig {
    /// Sentence-embedding service endpoint
    pub endpoint: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5001".to_string(),
            timeout_ms: 10_000,
        }
    }
}

/// Semantic matcher settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Maximum concurrent label-embedding calls per query
    pub parallel: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self { parallel: 4 }
    }
}

/// Result selection settings: the two display-surface sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Result count for the primary display
    pub top_k: usize,

    /// Diversity cap per label, also the size of the wider secondary view
    pub max_per_label: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            top_k: 6,
            max_per_label: 15,
        }
    }
}

/// Rating feedback settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Persisted rating log (JSON array on disk)
    pub ratings_file: String,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            ratings_file: "~/.prism/ratings.json".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl LoggingConfig {
    /// Whether the configured level already asks for debug output.
    pub fn verbose(&self) -> bool {
        matches!(self.level.as_str(), "debug" | "trace")
    }

    /// Whether logs should be emitted as JSON.
    pub fn json(&self) -> bool {
        self.format == "json"
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
