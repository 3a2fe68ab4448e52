//! Free-text query → catalog label resolution.
//!
//! Embeds the query once, fans out per-label embedding calls with bounded
//! concurrency, then re-aggregates deterministically before picking the
//! maximum so the first-seen tie-break is unaffected by completion order.

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::embedding::provider::TextEmbedder;
use crate::error::EngineError;
use crate::math::cosine_similarity;

/// A resolved label with its query similarity.
#[derive(Debug, Clone)]
pub struct LabelMatch {
    pub label: String,
    pub similarity: f32,
}

/// Resolves free-text queries against the catalog's label vocabulary.
pub struct SemanticMatcher {
    embedder: Arc<dyn TextEmbedder>,
    parallel: usize,
}

impl SemanticMatcher {
    pub fn new(embedder: Arc<dyn TextEmbedder>, parallel: usize) -> Self {
        Self {
            embedder,
            parallel: parallel.max(1),
        }
    }

    /// Resolve `query` to the best-matching candidate label.
    ///
    /// The query embedding failing fails the whole match with
    /// [`EngineError::EmbeddingUnavailable`] — no silent fallback. Labels
    /// whose own embedding call fails are skipped with a warning; when every
    /// label fails (or none were given) the result is
    /// [`EngineError::NoMatch`]. Ties break to the earlier label in
    /// `labels`' order.
    pub async fn resolve(
        &self,
        query: &str,
        labels: &[String],
    ) -> Result<LabelMatch, EngineError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(EngineError::InvalidInput("query must not be empty".into()));
        }
        if labels.is_empty() {
            return Err(EngineError::NoMatch("no candidate labels in the catalog".into()));
        }

        let query_vector = self.embedder.embed(query).await?;

        let semaphore = Arc::new(Semaphore::new(self.parallel));
        let mut handles = Vec::with_capacity(labels.len());

        for (idx, label) in labels.iter().enumerate() {
            let permit = semaphore.clone().acquire_owned().await;
            let Ok(permit) = permit else {
                tracing::warn!("Matcher semaphore closed unexpectedly — stopping fan-out");
                break;
            };

            let embedder = self.embedder.clone();
            let label = label.clone();
            handles.push(tokio::spawn(async move {
                let result = embedder.embed(&label).await;
                drop(permit);
                (idx, label, result)
            }));
        }

        // Collect every result before comparing, so completion order cannot
        // change which label wins a tie.
        let mut embeddings: Vec<Option<Vec<f32>>> = vec![None; labels.len()];
        for handle in handles {
            match handle.await {
                Ok((idx, _, Ok(vector))) => embeddings[idx] = Some(vector),
                Ok((_, label, Err(e))) => {
                    tracing::warn!("Skipping label '{label}': {e}");
                }
                Err(e) => {
                    tracing::error!("Label embedding task panicked: {e}");
                }
            }
        }

        let mut best: Option<(usize, f32)> = None;
        for (idx, embedding) in embeddings.iter().enumerate() {
            let Some(embedding) = embedding else { continue };
            let similarity = cosine_similarity(&query_vector, embedding)?;
            match best {
                Some((_, best_sim)) if similarity <= best_sim => {}
                _ => best = Some((idx, similarity)),
            }
        }

        let Some((idx, similarity)) = best else {
            return Err(EngineError::NoMatch(format!(
                "no label embedding available for query '{query}'"
            )));
        };

        tracing::debug!(
            "Query '{}' resolved to label '{}' (similarity {:.3})",
            query,
            labels[idx],
            similarity
        );
        Ok(LabelMatch {
            label: labels[idx].clone(),
            similarity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Mock embedder mapping exact text to a fixed vector, counting calls,
    /// and optionally failing for chosen texts.
    struct MockEmbedder {
        vectors: HashMap<String, Vec<f32>>,
        failing: Vec<String>,
        calls: Arc<AtomicU32>,
    }

    impl MockEmbedder {
        fn new(entries: &[(&str, &[f32])]) -> Self {
            Self {
                vectors: entries
                    .iter()
                    .map(|(text, v)| (text.to_string(), v.to_vec()))
                    .collect(),
                failing: Vec::new(),
                calls: Arc::new(AtomicU32::new(0)),
            }
        }

        fn failing_for(mut self, texts: &[&str]) -> Self {
            self.failing = texts.iter().map(|t| t.to_string()).collect();
            self
        }

        fn call_count_handle(&self) -> Arc<AtomicU32> {
            self.calls.clone()
        }
    }

    #[async_trait]
    impl TextEmbedder for MockEmbedder {
        fn name(&self) -> &str {
            "mock"
        }

        async fn is_available(&self) -> bool {
            true
        }

        async fn embed(&self, text: &str) -> Result<Vec<f32>, EngineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.iter().any(|t| t == text) {
                return Err(EngineError::EmbeddingUnavailable {
                    message: format!("mock failure for '{text}'"),
                    status_code: None,
                });
            }
            self.vectors
                .get(text)
                .cloned()
                .ok_or_else(|| EngineError::EmbeddingUnavailable {
                    message: format!("no mock vector for '{text}'"),
                    status_code: None,
                })
        }
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_resolves_best_label() {
        let embedder = MockEmbedder::new(&[
            ("fish", &[1.0, 0.0]),
            ("tench", &[0.9, 0.1]),
            ("submarine", &[0.0, 1.0]),
        ]);
        let matcher = SemanticMatcher::new(Arc::new(embedder), 4);

        let matched = matcher
            .resolve("fish", &labels(&["submarine", "tench"]))
            .await
            .unwrap();
        assert_eq!(matched.label, "tench");
        assert!(matched.similarity > 0.9);
    }

    #[tokio::test]
    async fn test_identical_vectors_give_unit_similarity() {
        let embedder = MockEmbedder::new(&[("tench", &[0.3, 0.4, 0.5])]);
        let matcher = SemanticMatcher::new(Arc::new(embedder), 2);

        let matched = matcher.resolve("tench", &labels(&["tench"])).await.unwrap();
        assert_eq!(matched.label, "tench");
        assert!((matched.similarity - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_tie_breaks_to_first_seen() {
        let embedder = MockEmbedder::new(&[
            ("query", &[1.0, 0.0]),
            ("alpha", &[2.0, 0.0]),
            ("beta", &[3.0, 0.0]),
        ]);
        let matcher = SemanticMatcher::new(Arc::new(embedder), 4);

        // Both labels are colinear with the query (similarity 1.0); the
        // first-seen one must win.
        let matched = matcher
            .resolve("query", &labels(&["alpha", "beta"]))
            .await
            .unwrap();
        assert_eq!(matched.label, "alpha");
    }

    #[tokio::test]
    async fn test_empty_labels_is_no_match_without_dependency_calls() {
        let embedder = MockEmbedder::new(&[("query", &[1.0])]);
        let calls = embedder.call_count_handle();
        let matcher = SemanticMatcher::new(Arc::new(embedder), 4);

        let err = matcher.resolve("query", &[]).await.unwrap_err();
        assert!(matches!(err, EngineError::NoMatch(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_query_is_invalid_input_without_dependency_calls() {
        let embedder = MockEmbedder::new(&[]);
        let calls = embedder.call_count_handle();
        let matcher = SemanticMatcher::new(Arc::new(embedder), 4);

        let err = matcher.resolve("   ", &labels(&["tench"])).await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_query_embedding_failure_propagates() {
        let embedder =
            MockEmbedder::new(&[("tench", &[1.0])]).failing_for(&["broken query"]);
        let matcher = SemanticMatcher::new(Arc::new(embedder), 4);

        let err = matcher
            .resolve("broken query", &labels(&["tench"]))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::EmbeddingUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_failed_labels_skipped_survivor_wins() {
        let embedder = MockEmbedder::new(&[
            ("query", &[1.0, 0.0]),
            ("good", &[0.5, 0.5]),
        ])
        .failing_for(&["bad"]);
        let matcher = SemanticMatcher::new(Arc::new(embedder), 4);

        let matched = matcher
            .resolve("query", &labels(&["bad", "good"]))
            .await
            .unwrap();
        assert_eq!(matched.label, "good");
    }

    #[tokio::test]
    async fn test_all_labels_failing_is_no_match() {
        let embedder =
            MockEmbedder::new(&[("query", &[1.0])]).failing_for(&["a", "b"]);
        let matcher = SemanticMatcher::new(Arc::new(embedder), 4);

        let err = matcher.resolve("query", &labels(&["a", "b"])).await.unwrap_err();
        assert!(matches!(err, EngineError::NoMatch(_)));
    }
}
