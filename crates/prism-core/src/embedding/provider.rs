//! The embedding gateway trait.
//!
//! A thin seam over the external text-embedding function. No retry policy
//! and no caching live at this layer — callers decide both.

use async_trait::async_trait;

use crate::error::EngineError;

/// Interface to an external text → vector embedding function.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (the engine holds an `Arc<dyn TextEmbedder>` for dynamic dispatch).
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    /// Provider name for logging (e.g., "remote").
    fn name(&self) -> &str;

    /// Check whether the embedding service is reachable.
    async fn is_available(&self) -> bool;

    /// Embed a piece of text.
    ///
    /// Transport or service failure surfaces as
    /// [`EngineError::EmbeddingUnavailable`]; never a fabricated vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EngineError>;
}
