//! Precomputed per-image embeddings.
//!
//! The offline indexer writes a flat N×dim matrix of f32 little-endian bytes
//! plus a JSON manifest carrying the dimension and the filename order. The
//! store loads both once at startup and answers filename → row lookups.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Manifest sidecar for the raw embedding matrix.
#[derive(Debug, Serialize, Deserialize)]
struct StoreManifest {
    embedding_dim: usize,
    /// Row order of the matrix
    filenames: Vec<String>,
}

/// Read-only store of precomputed image embeddings.
#[derive(Debug)]
pub struct EmbeddingStore {
    /// Flat matrix, N × dim, row-major
    matrix: Vec<f32>,
    dim: usize,
    /// Filename → row index
    index: HashMap<String, usize>,
}

impl EmbeddingStore {
    /// Create an empty store (no embeddings available).
    pub fn empty() -> Self {
        Self {
            matrix: Vec::new(),
            dim: 0,
            index: HashMap::new(),
        }
    }

    /// Load the matrix and its manifest from disk.
    ///
    /// A byte count that disagrees with the manifest is a contract violation
    /// between indexer runs and fails fast.
    pub fn load(matrix_path: &Path, manifest_path: &Path) -> Result<Self, EngineError> {
        let manifest: StoreManifest =
            serde_json::from_str(&std::fs::read_to_string(manifest_path)?)?;
        let bytes = std::fs::read(matrix_path)?;

        let expected = manifest.filenames.len() * manifest.embedding_dim;
        let actual = bytes.len() / 4;
        if bytes.len() % 4 != 0 || actual != expected {
            return Err(EngineError::DimensionMismatch { expected, actual });
        }

        let matrix: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        let index = manifest
            .filenames
            .iter()
            .enumerate()
            .map(|(row, name)| (name.clone(), row))
            .collect();

        tracing::info!(
            "Embedding store ready: {} vectors x {} dims ({:.1} MB)",
            manifest.filenames.len(),
            manifest.embedding_dim,
            (bytes.len()) as f64 / 1_000_000.0
        );

        Ok(Self {
            matrix,
            dim: manifest.embedding_dim,
            index,
        })
    }

    /// Build a store from in-memory entries. All vectors must share one
    /// dimension.
    pub fn from_entries(entries: Vec<(String, Vec<f32>)>) -> Result<Self, EngineError> {
        let Some(dim) = entries.first().map(|(_, v)| v.len()) else {
            return Ok(Self::empty());
        };

        let mut matrix = Vec::with_capacity(entries.len() * dim);
        let mut index = HashMap::with_capacity(entries.len());
        for (row, (filename, vector)) in entries.into_iter().enumerate() {
            if vector.len() != dim {
                return Err(EngineError::DimensionMismatch {
                    expected: dim,
                    actual: vector.len(),
                });
            }
            matrix.extend_from_slice(&vector);
            index.insert(filename, row);
        }

        Ok(Self { matrix, dim, index })
    }

    /// The embedding for a filename, if the indexer produced one.
    pub fn get(&self, filename: &str) -> Option<&[f32]> {
        self.index.get(filename).map(|&row| {
            let offset = row * self.dim;
            &self.matrix[offset..offset + self.dim]
        })
    }

    /// Embedding dimension (0 when empty).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored vectors.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the store holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_entries_and_get() {
        let store = EmbeddingStore::from_entries(vec![
            ("a.JPEG".to_string(), vec![1.0, 2.0]),
            ("b.JPEG".to_string(), vec![3.0, 4.0]),
        ])
        .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.dim(), 2);
        assert_eq!(store.get("a.JPEG"), Some(&[1.0, 2.0][..]));
        assert_eq!(store.get("b.JPEG"), Some(&[3.0, 4.0][..]));
        assert!(store.get("missing.JPEG").is_none());
    }

    #[test]
    fn test_from_entries_rejects_mixed_dims() {
        let err = EmbeddingStore::from_entries(vec![
            ("a.JPEG".to_string(), vec![1.0, 2.0]),
            ("b.JPEG".to_string(), vec![3.0]),
        ])
        .unwrap_err();
        assert!(matches!(err, EngineError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let matrix_path = dir.path().join("embeddings.bin");
        let manifest_path = dir.path().join("embeddings.json");

        let values: Vec<f32> = vec![0.5, -1.5, 2.0, 0.25];
        let bytes: Vec<u8> = values.iter().flat_map(|f| f.to_le_bytes()).collect();
        std::fs::write(&matrix_path, &bytes).unwrap();
        std::fs::write(
            &manifest_path,
            r#"{"embedding_dim": 2, "filenames": ["a.JPEG", "b.JPEG"]}"#,
        )
        .unwrap();

        let store = EmbeddingStore::load(&matrix_path, &manifest_path).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a.JPEG"), Some(&[0.5, -1.5][..]));
        assert_eq!(store.get("b.JPEG"), Some(&[2.0, 0.25][..]));
    }

    #[test]
    fn test_load_rejects_size_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let matrix_path = dir.path().join("embeddings.bin");
        let manifest_path = dir.path().join("embeddings.json");

        std::fs::write(&matrix_path, [0u8; 12]).unwrap(); // 3 floats
        std::fs::write(
            &manifest_path,
            r#"{"embedding_dim": 2, "filenames": ["a.JPEG", "b.JPEG"]}"#,
        )
        .unwrap();

        let err = EmbeddingStore::load(&matrix_path, &manifest_path).unwrap_err();
        match err {
            EngineError::DimensionMismatch { expected, actual } => {
                assert_eq!(expected, 4);
                assert_eq!(actual, 3);
            }
            other => panic!("Expected DimensionMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_store() {
        let store = EmbeddingStore::empty();
        assert!(store.is_empty());
        assert!(store.get("anything").is_none());
    }
}
