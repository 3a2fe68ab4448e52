//! The image-classification boundary.
//!
//! Classification inference is an external collaborator: the core only
//! consumes the top class name and the image embedding from its output.

use std::path::Path;

use async_trait::async_trait;

use crate::error::EngineError;
use crate::types::Classification;

/// Interface to an external image classifier.
///
/// Object-safe via `async_trait` so the engine can accept any
/// implementation behind `&dyn ImageClassifier`.
#[async_trait]
pub trait ImageClassifier: Send + Sync {
    /// Classifier name for logging.
    fn name(&self) -> &str;

    /// Classify an image file into ranked class predictions plus an
    /// embedding vector.
    ///
    /// Transport or inference failure surfaces as
    /// [`EngineError::EmbeddingUnavailable`].
    async fn classify(&self, image: &Path) -> Result<Classification, EngineError>;
}
