//! Persisted rating feedback log.
//!
//! Ratings arrive in batches and are appended to a JSON array on disk
//! (read, extend, rewrite). The ranking core never reads this file — it is
//! the durable record behind the ephemeral [`PreferenceModel`] updates.
//!
//! [`PreferenceModel`]: crate::ranking::PreferenceModel

use std::path::PathBuf;

use crate::error::EngineError;
use crate::types::RatingRecord;

/// Append-only rating store backed by a single JSON file.
pub struct RatingLog {
    path: PathBuf,
}

impl RatingLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append a batch of rating records.
    ///
    /// An empty batch or an out-of-range rating is `InvalidInput`; disk
    /// failures surface as `Storage`. Returns the total number of records
    /// now stored.
    pub fn append(&self, records: &[RatingRecord]) -> Result<usize, EngineError> {
        if records.is_empty() {
            return Err(EngineError::InvalidInput("Invalid ratings data".into()));
        }
        for record in records {
            if !(1..=10).contains(&record.user_rating) {
                return Err(EngineError::InvalidInput(format!(
                    "rating {} out of range 1..=10",
                    record.user_rating
                )));
            }
        }

        let mut stored: Vec<RatingRecord> = if self.path.is_file() {
            serde_json::from_str(&std::fs::read_to_string(&self.path)?)?
        } else {
            Vec::new()
        };
        stored.extend_from_slice(records);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // Swap in via a sibling temp file; the log is never truncated in
        // place, so an interrupted write leaves the previous records intact.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(&stored)?)?;
        std::fs::rename(&tmp, &self.path)?;

        tracing::debug!("Appended {} ratings ({} total)", records.len(), stored.len());
        Ok(stored.len())
    }

    /// The backing file path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}
