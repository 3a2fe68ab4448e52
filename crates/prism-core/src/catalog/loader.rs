//! Corpus reader for the tiny-imagenet directory layout.
//!
//! Reads `words.txt` (wnid → label), the offline indexer's `metadata.json`,
//! and — when no metadata file exists — scans `train/<wnid>/images/*.JPEG`
//! plus `val/val_annotations.txt`. Every file is optional: a missing one
//! degrades to a smaller (possibly empty) record set with a log line, never
//! a crash.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::EngineError;
use crate::types::ImageRecord;

/// Reads corpus files into [`ImageRecord`]s.
pub struct CorpusLoader {
    root: PathBuf,
    metadata_file: String,
}

impl CorpusLoader {
    /// Create a loader rooted at the dataset directory.
    pub fn new(root: impl Into<PathBuf>, metadata_file: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            metadata_file: metadata_file.into(),
        }
    }

    /// Load all corpus records.
    ///
    /// Prefers `metadata.json` when present (the indexer already resolved
    /// labels); otherwise falls back to scanning the train/val directories.
    /// Errors only on present-but-malformed files, never on absent ones.
    pub fn load(&self) -> Result<Vec<ImageRecord>, EngineError> {
        if !self.root.is_dir() {
            tracing::warn!(
                "Corpus directory not found at {:?} — starting with an empty catalog",
                self.root
            );
            return Ok(Vec::new());
        }

        let label_map = self.load_label_map()?;

        let metadata_path = self.root.join(&self.metadata_file);
        let mut records = if metadata_path.is_file() {
            self.load_metadata(&metadata_path, &label_map)?
        } else {
            tracing::debug!("No metadata file at {:?}, scanning train directory", metadata_path);
            self.scan_train(&label_map)
        };

        records.extend(self.load_val_annotations(&label_map)?);

        tracing::info!("Loaded {} corpus records from {:?}", records.len(), self.root);
        Ok(records)
    }

    /// Read `words.txt`: one `wnid\tlabel` per line.
    fn load_label_map(&self) -> Result<HashMap<String, String>, EngineError> {
        let path = self.root.join("words.txt");
        if !path.is_file() {
            tracing::warn!("words.txt not found at {:?} — wnids will be used as labels", path);
            return Ok(HashMap::new());
        }

        let content = std::fs::read_to_string(&path)?;
        let mut map = HashMap::new();
        for line in content.lines() {
            let mut parts = line.splitn(2, '\t');
            let (Some(wnid), Some(label)) = (parts.next(), parts.next()) else {
                continue;
            };
            map.insert(wnid.trim().to_string(), label.trim().to_string());
        }
        tracing::info!("Loaded {} labels from words.txt", map.len());
        Ok(map)
    }

    /// Parse the offline indexer's `metadata.json` (array of records).
    ///
    /// The indexer stores machine-local absolute paths; corpus-relative
    /// paths are rebuilt here from the wnid and filename.
    fn load_metadata(
        &self,
        path: &Path,
        label_map: &HashMap<String, String>,
    ) -> Result<Vec<ImageRecord>, EngineError> {
        let content = std::fs::read_to_string(path)?;
        let mut records: Vec<ImageRecord> = serde_json::from_str(&content)?;

        for record in &mut records {
            if !record.wnid.is_empty() {
                record.path = format!("train/{}/images/{}", record.wnid, record.filename);
                if record.label.is_empty() {
                    record.label = label_map
                        .get(&record.wnid)
                        .cloned()
                        .unwrap_or_else(|| record.wnid.clone());
                }
            }
        }
        tracing::debug!("Loaded {} records from {:?}", records.len(), path);
        Ok(records)
    }

    /// Scan `train/<wnid>/images/*.JPEG`, sorted by path for determinism.
    fn scan_train(&self, label_map: &HashMap<String, String>) -> Vec<ImageRecord> {
        let train_dir = self.root.join("train");
        if !train_dir.is_dir() {
            tracing::warn!("train directory not found at {:?}", train_dir);
            return Vec::new();
        }

        let mut records = Vec::new();
        for entry in WalkDir::new(&train_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !has_jpeg_extension(path) {
                continue;
            }
            // Expected shape: train/<wnid>/images/<file>
            let Some(wnid) = path
                .parent()
                .and_then(Path::parent)
                .and_then(Path::file_name)
                .and_then(|n| n.to_str())
            else {
                continue;
            };
            let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            records.push(ImageRecord {
                filename: filename.to_string(),
                path: format!("train/{wnid}/images/{filename}"),
                label: label_map.get(wnid).cloned().unwrap_or_else(|| wnid.to_string()),
                wnid: wnid.to_string(),
            });
        }
        tracing::debug!("Scanned {} train images", records.len());
        records
    }

    /// Read `val/val_annotations.txt`: `filename\twnid\t...` per line.
    fn load_val_annotations(
        &self,
        label_map: &HashMap<String, String>,
    ) -> Result<Vec<ImageRecord>, EngineError> {
        let path = self.root.join("val").join("val_annotations.txt");
        if !path.is_file() {
            tracing::debug!("No val annotations at {:?}", path);
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&path)?;
        let mut records = Vec::new();
        for line in content.lines() {
            let mut parts = line.split('\t');
            let (Some(filename), Some(wnid)) = (parts.next(), parts.next()) else {
                continue;
            };
            let filename = filename.trim();
            let wnid = wnid.trim();
            if filename.is_empty() || wnid.is_empty() {
                continue;
            }
            records.push(ImageRecord {
                filename: filename.to_string(),
                path: format!("val/images/{filename}"),
                label: label_map.get(wnid).cloned().unwrap_or_else(|| wnid.to_string()),
                wnid: wnid.to_string(),
            });
        }
        tracing::debug!("Loaded {} val annotations", records.len());
        Ok(records)
    }
}

fn has_jpeg_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("jpeg") || ext.eq_ignore_ascii_case("jpg"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_corpus(dir: &Path) {
        fs::write(dir.join("words.txt"), "n01440764\ttench, Tinca tinca\nn01443537\tgoldfish\n")
            .unwrap();

        let images = dir.join("train/n01440764/images");
        fs::create_dir_all(&images).unwrap();
        fs::write(images.join("n01440764_0.JPEG"), b"jpg").unwrap();
        fs::write(images.join("n01440764_1.JPEG"), b"jpg").unwrap();

        let val = dir.join("val");
        fs::create_dir_all(&val).unwrap();
        fs::write(
            val.join("val_annotations.txt"),
            "val_0.JPEG\tn01443537\t12\t4\t55\t60\n",
        )
        .unwrap();
    }

    #[test]
    fn test_scan_without_metadata() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path());

        let loader = CorpusLoader::new(dir.path(), "annoy_data/metadata.json");
        let records = loader.load().unwrap();

        assert_eq!(records.len(), 3);
        let train: Vec<&ImageRecord> =
            records.iter().filter(|r| r.path.starts_with("train/")).collect();
        assert_eq!(train.len(), 2);
        assert_eq!(train[0].label, "tench, Tinca tinca");
        assert_eq!(train[0].path, "train/n01440764/images/n01440764_0.JPEG");

        let val = records.iter().find(|r| r.filename == "val_0.JPEG").unwrap();
        assert_eq!(val.path, "val/images/val_0.JPEG");
        assert_eq!(val.label, "goldfish");
    }

    #[test]
    fn test_metadata_preferred_over_scan() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path());

        let annoy = dir.path().join("annoy_data");
        fs::create_dir_all(&annoy).unwrap();
        fs::write(
            annoy.join("metadata.json"),
            r#"[{"filename": "n01440764_0.JPEG",
                 "path": "C:/somewhere/absolute/n01440764_0.JPEG",
                 "label": "tench",
                 "wnid": "n01440764"}]"#,
        )
        .unwrap();

        let loader = CorpusLoader::new(dir.path(), "annoy_data/metadata.json");
        let records = loader.load().unwrap();

        // 1 metadata record + 1 val annotation; the train scan is skipped
        assert_eq!(records.len(), 2);
        // Machine-local absolute path replaced with the corpus-relative one
        assert_eq!(records[0].path, "train/n01440764/images/n01440764_0.JPEG");
    }

    #[test]
    fn test_missing_corpus_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loader = CorpusLoader::new(dir.path().join("nope"), "annoy_data/metadata.json");
        let records = loader.load().unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_words_falls_back_to_wnid() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("train/n09999999/images");
        fs::create_dir_all(&images).unwrap();
        fs::write(images.join("x.JPEG"), b"jpg").unwrap();

        let loader = CorpusLoader::new(dir.path(), "annoy_data/metadata.json");
        let records = loader.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "n09999999");
    }

    #[test]
    fn test_malformed_metadata_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let annoy = dir.path().join("annoy_data");
        fs::create_dir_all(&annoy).unwrap();
        fs::write(annoy.join("metadata.json"), "not json").unwrap();

        let loader = CorpusLoader::new(dir.path(), "annoy_data/metadata.json");
        assert!(matches!(loader.load(), Err(EngineError::Json(_))));
    }
}
