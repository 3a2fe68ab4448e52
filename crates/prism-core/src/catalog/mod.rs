//! The label catalog: corpus records plus a label → filenames inverted index.
//!
//! Built once at startup from the corpus files and read-only thereafter.
//! Labels are case-normalized the same way at build and lookup time so the
//! two can never disagree.

pub mod loader;

pub use loader::CorpusLoader;

use std::collections::HashMap;

use crate::types::ImageRecord;

/// Normalize a label for indexing and lookup: trim and lowercase.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// One label's slot in the inverted index.
#[derive(Debug)]
struct LabelEntry {
    label: String,
    filenames: Vec<String>,
}

/// Immutable-after-build catalog of corpus images.
///
/// Owned by the engine and passed by reference to query handlers; never
/// mutated after `build`.
pub struct LabelCatalog {
    /// Records by filename
    records: HashMap<String, ImageRecord>,
    /// Inverted index entries in first-seen label order
    entries: Vec<LabelEntry>,
    /// Normalized label → entry index
    by_label: HashMap<String, usize>,
}

impl LabelCatalog {
    /// Create an empty catalog.
    pub fn empty() -> Self {
        Self {
            records: HashMap::new(),
            entries: Vec::new(),
            by_label: HashMap::new(),
        }
    }

    /// Build the catalog from corpus records.
    ///
    /// Deterministic: the same record sequence always yields the same index.
    /// Filenames within a label keep their discovery order; labels keep
    /// first-seen order. Duplicate filenames are dropped (first one wins).
    pub fn build(records: Vec<ImageRecord>) -> Self {
        let mut catalog = Self::empty();

        for mut record in records {
            if catalog.records.contains_key(&record.filename) {
                tracing::debug!("Duplicate corpus filename ignored: {}", record.filename);
                continue;
            }
            record.label = normalize_label(&record.label);

            let entry_idx = match catalog.by_label.get(&record.label) {
                Some(&idx) => idx,
                None => {
                    catalog.entries.push(LabelEntry {
                        label: record.label.clone(),
                        filenames: Vec::new(),
                    });
                    let idx = catalog.entries.len() - 1;
                    catalog.by_label.insert(record.label.clone(), idx);
                    idx
                }
            };
            catalog.entries[entry_idx].filenames.push(record.filename.clone());
            catalog.records.insert(record.filename.clone(), record);
        }

        catalog
    }

    /// Filenames carrying the given label, in discovery order.
    ///
    /// Unknown labels yield an empty slice, not an error. The query is
    /// normalized the same way as at build time.
    pub fn lookup(&self, label: &str) -> &[String] {
        self.by_label
            .get(&normalize_label(label))
            .map(|&idx| self.entries[idx].filenames.as_slice())
            .unwrap_or(&[])
    }

    /// Distinct labels in first-seen order. Drives the matcher's candidate
    /// iteration and therefore its tie-break.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Look up the full record for a filename.
    pub fn record(&self, filename: &str) -> Option<&ImageRecord> {
        self.records.get(filename)
    }

    /// (label, image count) pairs in first-seen order.
    pub fn label_counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|e| (e.label.as_str(), e.filenames.len()))
    }

    /// Total number of indexed images.
    pub fn image_count(&self) -> usize {
        self.records.len()
    }

    /// Number of distinct labels.
    pub fn label_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no images.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
