//! The ranking and preference-learning core: query → label resolution,
//! hybrid candidate scoring, online preference updates, and diversity-capped
//! result selection.

pub mod matcher;
pub mod preference;
pub mod scoring;
pub mod selection;

pub use matcher::{LabelMatch, SemanticMatcher};
pub use preference::PreferenceModel;
pub use scoring::ScoringEngine;
pub use selection::select;
