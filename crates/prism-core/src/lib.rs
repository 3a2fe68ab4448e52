//! Prism Core - Image recommendation engine library.
//!
//! Prism recommends images from a fixed corpus that are similar to a query —
//! a free-text keyword or an uploaded image's top classification label — and
//! refines future recommendations from accumulated user ratings.
//!
//! # Architecture
//!
//! ```text
//! keyword ─→ SemanticMatcher ─┐
//!                             ├─→ LabelCatalog ─→ ScoringEngine ─→ select
//! image ──→ classification ───┘         ▲               ▲
//!                                EmbeddingStore   PreferenceModel
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use prism_core::{Config, RecommendationEngine, Session};
//!
//! #[tokio::main]
//! async fn main() -> prism_core::Result<()> {
//!     let config = Config::load()?;
//!     let engine = RecommendationEngine::from_config(&config)?;
//!     let session = Session::new();
//!
//!     let response = engine.search(&session, "tench").await?;
//!     println!("{} results for '{}'", response.results.len(), response.matched_label);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod catalog;
pub mod classify;
pub mod config;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod math;
pub mod ranking;
pub mod types;

// Re-exports for convenient access
pub use catalog::{CorpusLoader, LabelCatalog};
pub use classify::ImageClassifier;
pub use config::Config;
pub use embedding::{EmbeddingStore, RemoteEmbedder, TextEmbedder};
pub use engine::{RecommendationEngine, Session};
pub use error::{ConfigError, EngineError, EngineResult, PrismError, Result};
pub use feedback::RatingLog;
pub use ranking::{LabelMatch, PreferenceModel, ScoringEngine, SemanticMatcher};
pub use types::{
    Classification, ImageRecord, Prediction, RatingRecord, ScoredCandidate, SearchResponse,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
