//! Core data types for the Prism recommendation engine.
//!
//! These types cross the engine's boundaries: corpus records coming in,
//! scored candidates and search responses going out, and the wire shapes of
//! the classification and rating-feedback collaborators.

use serde::{Deserialize, Serialize};

/// A single indexed corpus image. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Bare filename (e.g., "n01443537_0.JPEG"), unique across the corpus
    pub filename: String,

    /// Corpus-relative path (e.g., "train/n01443537/images/n01443537_0.JPEG")
    pub path: String,

    /// Human-readable label, lowercased and trimmed at load time
    pub label: String,

    /// WordNet synset id the image belongs to
    #[serde(default)]
    pub wnid: String,
}

/// A candidate image with its ranked score. Produced per ranking pass,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub filename: String,
    pub path: String,
    pub label: String,
    pub score: f32,
}

/// One ranked class prediction from the external classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(rename = "className")]
    pub class_name: String,
    pub probability: f32,
}

/// Output of the classification boundary for one image: ranked class
/// predictions plus the image's embedding vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub predictions: Vec<Prediction>,
    pub embedding: Vec<f32>,
}

impl Classification {
    /// Top class name: the first prediction, cut at the first comma,
    /// trimmed and lowercased (e.g., "tench, Tinca tinca" → "tench").
    pub fn top_class(&self) -> Option<String> {
        self.predictions
            .first()
            .map(|p| {
                p.class_name
                    .split(',')
                    .next()
                    .unwrap_or("")
                    .trim()
                    .to_lowercase()
            })
            .filter(|name| !name.is_empty())
    }
}

/// A rating-feedback wire record, persisted verbatim by the rating log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingRecord {
    /// Filename of the rated image, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Whether the user marked the result relevant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevant: Option<bool>,

    /// Rating value in 1..=10
    pub user_rating: u8,

    /// Client timestamp, milliseconds since the Unix epoch
    pub timestamp: u64,
}

/// Response of the query-by-text boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Servable image paths, ranked
    pub results: Vec<String>,

    /// The catalog label the keyword resolved to
    #[serde(rename = "match")]
    pub matched_label: String,

    /// Query/label similarity, rounded to 3 decimal places
    pub similarity: f32,
}

impl SearchResponse {
    pub fn new(results: Vec<String>, matched_label: String, similarity: f32) -> Self {
        Self {
            results,
            matched_label,
            similarity: (similarity * 1000.0).round() / 1000.0,
        }
    }
}
