//! The online user-preference model.
//!
//! Holds the accumulated, rating-weighted sum of image embeddings plus the
//! rating counter that drives the adaptive similarity threshold. The vector
//! is deliberately left unnormalized — its magnitude grows with more and
//! higher ratings, and it is the threshold that adapts, not the vector.

use crate::error::EngineError;

/// Threshold floor before any rating has been recorded.
const THRESHOLD_BASE: f32 = 0.1;
/// Threshold growth per recorded rating.
const THRESHOLD_STEP: f32 = 0.05;
/// Cap keeping the threshold reachable no matter how many ratings accrue.
const THRESHOLD_CAP: f32 = 0.6;

/// Per-session preference state. One instance per session, never shared
/// across concurrent sessions.
#[derive(Debug, Default)]
pub struct PreferenceModel {
    vector: Option<Vec<f32>>,
    num_ratings: u32,
}

impl PreferenceModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one rating event into the preference vector.
    ///
    /// `weight = rating / 10`; the scaled embedding is added elementwise
    /// (or becomes the vector when none exists yet), then the rating counter
    /// increments.
    pub fn update(&mut self, embedding: &[f32], rating: u8) -> Result<(), EngineError> {
        if !(1..=10).contains(&rating) {
            return Err(EngineError::InvalidInput(format!(
                "rating must be between 1 and 10, got {rating}"
            )));
        }

        let weight = f32::from(rating) / 10.0;
        match self.vector.as_mut() {
            Some(vector) => {
                if vector.len() != embedding.len() {
                    return Err(EngineError::DimensionMismatch {
                        expected: vector.len(),
                        actual: embedding.len(),
                    });
                }
                for (acc, &x) in vector.iter_mut().zip(embedding.iter()) {
                    *acc += x * weight;
                }
            }
            None => {
                self.vector = Some(embedding.iter().map(|&x| x * weight).collect());
            }
        }

        self.num_ratings += 1;
        tracing::debug!(
            "Preference updated: {} ratings, threshold now {:.2}",
            self.num_ratings,
            self.similarity_threshold()
        );
        Ok(())
    }

    /// Clear the preference vector and the rating counter.
    pub fn reset(&mut self) {
        self.vector = None;
        self.num_ratings = 0;
    }

    /// The adaptive similarity threshold:
    /// `min(0.1 + 0.05 * num_ratings, 0.6)`. Starts permissive and tightens
    /// as signal accumulates.
    pub fn similarity_threshold(&self) -> f32 {
        (THRESHOLD_BASE + THRESHOLD_STEP * self.num_ratings as f32).min(THRESHOLD_CAP)
    }

    /// The current preference vector, absent until the first rating.
    pub fn vector(&self) -> Option<&[f32]> {
        self.vector.as_deref()
    }

    /// Number of ratings folded in so far.
    pub fn num_ratings(&self) -> u32 {
        self.num_ratings
    }
}
