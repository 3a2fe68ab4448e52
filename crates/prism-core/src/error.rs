//! Error types for the Prism recommendation engine.
//!
//! The engine taxonomy separates user-fixable input problems from dependency
//! failures and from genuine "no results" outcomes, so that callers can map
//! each to a distinct response instead of collapsing everything into one 500.

use thiserror::Error;

/// Top-level error type for Prism operations.
#[derive(Error, Debug)]
pub enum PrismError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Recommendation engine errors
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised by the matching, scoring, and feedback core.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Missing or malformed caller input (empty keyword, rating out of range)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The embedding or classification service is unreachable or returned
    /// a malformed response
    #[error("Embedding service unavailable: {message}")]
    EmbeddingUnavailable {
        message: String,
        status_code: Option<u16>,
    },

    /// The query resolved to nothing (empty catalog, no candidates survived)
    #[error("No match: {0}")]
    NoMatch(String),

    /// Vectors from different embedding models were compared. A contract
    /// violation, never silently coerced.
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Rating log or corpus file I/O failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// A corpus or feedback file held malformed JSON
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    /// HTTP-equivalent status for boundary layers (HTTP handlers, CLI exit
    /// mapping). Keeps "no results" (404) distinguishable from a dependency
    /// failure (502).
    pub fn http_status(&self) -> u16 {
        match self {
            EngineError::InvalidInput(_) => 400,
            EngineError::NoMatch(_) => 404,
            EngineError::EmbeddingUnavailable { .. } => 502,
            EngineError::DimensionMismatch { .. } => 500,
            EngineError::Storage(_) => 500,
            EngineError::Json(_) => 500,
        }
    }
}

/// Convenience type alias for Prism results.
pub type Result<T> = std::result::Result<T, PrismError>;

/// Convenience type alias for engine-core results.
pub type EngineResult<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(EngineError::InvalidInput("x".into()).http_status(), 400);
        assert_eq!(EngineError::NoMatch("x".into()).http_status(), 404);
        assert_eq!(
            EngineError::EmbeddingUnavailable {
                message: "down".into(),
                status_code: None,
            }
            .http_status(),
            502
        );
        assert_eq!(
            EngineError::DimensionMismatch {
                expected: 384,
                actual: 1280,
            }
            .http_status(),
            500
        );
    }

    #[test]
    fn test_no_match_distinct_from_unavailable() {
        let no_match = EngineError::NoMatch("empty catalog".into());
        let unavailable = EngineError::EmbeddingUnavailable {
            message: "connection refused".into(),
            status_code: None,
        };
        assert_ne!(no_match.http_status(), unavailable.http_status());
    }
}
