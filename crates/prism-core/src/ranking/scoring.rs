//! Hybrid candidate scoring.
//!
//! Combines a content-similarity sub-score (preference vector and/or current
//! query image), a lexical keyword-overlap score, and a substring boost into
//! one ranked score per candidate. The additive boost means the final score
//! is not bounded to [0,1]; thresholds compared against it are floors, not
//! probabilities.

use std::collections::HashSet;

use crate::error::EngineError;
use crate::math::cosine_similarity;

/// Weight of the preference-vector similarity in the hybrid content score.
const PREFERENCE_WEIGHT: f32 = 0.7;
/// Weight of the current-image similarity in the hybrid content score.
const CURRENT_IMAGE_WEIGHT: f32 = 0.3;
/// Weight of the content sub-score in the final score.
const CONTENT_WEIGHT: f32 = 0.8;
/// Weight of the keyword-overlap score in the final score.
const KEYWORD_WEIGHT: f32 = 0.2;
/// Flat boost when the uploaded label appears inside the candidate label.
const CONTEXTUAL_BOOST: f32 = 0.1;

/// Stateless scoring of one candidate against the session signals.
pub struct ScoringEngine;

impl ScoringEngine {
    /// Score a candidate embedding.
    ///
    /// Content sub-score (evaluated once per call):
    /// - both preference and current image present: `0.7·cos(candidate,
    ///   preference) + 0.3·cos(candidate, current)`
    /// - only one present: plain cosine against it
    /// - neither present: `0` (first-use degenerate case; keyword score and
    ///   boost still contribute)
    ///
    /// Final: `0.8·content + 0.2·keyword + boost`.
    pub fn score(
        candidate: &[f32],
        uploaded_label: &str,
        candidate_label: &str,
        preference: Option<&[f32]>,
        current_image: Option<&[f32]>,
    ) -> Result<f32, EngineError> {
        let content = match (preference, current_image) {
            (Some(pref), Some(current)) => {
                PREFERENCE_WEIGHT * cosine_similarity(candidate, pref)?
                    + CURRENT_IMAGE_WEIGHT * cosine_similarity(candidate, current)?
            }
            (Some(pref), None) => cosine_similarity(candidate, pref)?,
            (None, Some(current)) => cosine_similarity(candidate, current)?,
            (None, None) => 0.0,
        };

        let keyword = Self::keyword_score(uploaded_label, candidate_label);
        let boost = if !uploaded_label.is_empty() && candidate_label.contains(uploaded_label) {
            CONTEXTUAL_BOOST
        } else {
            0.0
        };

        Ok(CONTENT_WEIGHT * content + KEYWORD_WEIGHT * keyword + boost)
    }

    /// 1.0 when the labels share at least one token (split on whitespace and
    /// commas), else 0.0. Empty labels never match.
    fn keyword_score(label_a: &str, label_b: &str) -> f32 {
        if label_a.is_empty() || label_b.is_empty() {
            return 0.0;
        }
        let tokens_a: HashSet<&str> = tokenize(label_a).collect();
        let shared = tokenize(label_b).any(|token| tokens_a.contains(token));
        if shared {
            1.0
        } else {
            0.0
        }
    }
}

fn tokenize(label: &str) -> impl Iterator<Item = &str> {
    label
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
}
