//! The recommendation engine: orchestrates catalog, embedding store,
//! matcher, scoring, and selection into the two query entry points, plus
//! the per-session preference state.

use std::path::Path;
use std::sync::Arc;

use crate::catalog::{CorpusLoader, LabelCatalog};
use crate::classify::ImageClassifier;
use crate::config::Config;
use crate::embedding::{EmbeddingStore, RemoteEmbedder, TextEmbedder};
use crate::error::EngineError;
use crate::ranking::{selection, LabelMatch, PreferenceModel, ScoringEngine, SemanticMatcher};
use crate::types::{Classification, ScoredCandidate, SearchResponse};

/// Per-session user state: the preference model plus the embedding of the
/// most recently processed image.
///
/// One instance per session, owned by a single caller at a time — `&mut`
/// access serializes all mutation. Never shared across sessions.
#[derive(Default)]
pub struct Session {
    preference: PreferenceModel,
    current_image: Option<Vec<f32>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preference(&self) -> &PreferenceModel {
        &self.preference
    }

    /// Embedding of the image currently driving recommendations, if any.
    pub fn current_image(&self) -> Option<&[f32]> {
        self.current_image.as_deref()
    }

    pub fn set_current_image(&mut self, embedding: Vec<f32>) {
        self.current_image = Some(embedding);
    }

    /// Fold a rating for the given image embedding into the preference
    /// model. Returns the new similarity threshold.
    pub fn rate(&mut self, embedding: &[f32], rating: u8) -> Result<f32, EngineError> {
        self.preference.update(embedding, rating)?;
        Ok(self.preference.similarity_threshold())
    }

    /// Rate the session's current image.
    pub fn rate_current(&mut self, rating: u8) -> Result<f32, EngineError> {
        let Some(embedding) = self.current_image.clone() else {
            return Err(EngineError::InvalidInput(
                "no image has been processed in this session".into(),
            ));
        };
        self.rate(&embedding, rating)
    }

    /// Clear the preference state and the current image.
    pub fn reset(&mut self) {
        self.preference.reset();
        self.current_image = None;
    }
}

/// The engine: immutable-after-construction corpus state plus the embedding
/// gateway. Shared by reference across queries; all mutable state lives in
/// [`Session`].
pub struct RecommendationEngine {
    catalog: LabelCatalog,
    store: EmbeddingStore,
    matcher: SemanticMatcher,
    top_k: usize,
    max_per_label: usize,
    /// Dataset directory name, prefixed onto corpus-relative paths so
    /// results are addressable under the static-file mount.
    path_prefix: String,
}

impl RecommendationEngine {
    pub fn new(
        catalog: LabelCatalog,
        store: EmbeddingStore,
        embedder: Arc<dyn TextEmbedder>,
        config: &Config,
    ) -> Self {
        let path_prefix = config
            .dataset_dir()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            catalog,
            store,
            matcher: SemanticMatcher::new(embedder, config.matcher.parallel),
            top_k: config.selection.top_k,
            max_per_label: config.selection.max_per_label,
            path_prefix,
        }
    }

    /// Build the engine from configuration: load the corpus, the embedding
    /// store, and connect the remote embedder.
    pub fn from_config(config: &Config) -> Result<Self, EngineError> {
        let root = config.dataset_dir();
        let loader = CorpusLoader::new(&root, config.corpus.metadata_file.clone());
        let catalog = LabelCatalog::build(loader.load()?);
        tracing::info!(
            "Catalog ready: {} images across {} labels",
            catalog.image_count(),
            catalog.label_count()
        );

        let matrix_path = root.join(&config.corpus.embeddings_file);
        let manifest_path = root.join(&config.corpus.manifest_file);
        let store = if matrix_path.is_file() && manifest_path.is_file() {
            EmbeddingStore::load(&matrix_path, &manifest_path)?
        } else {
            tracing::warn!(
                "No embedding store at {:?} — candidates cannot be content-scored",
                matrix_path
            );
            EmbeddingStore::empty()
        };

        let embedder: Arc<dyn TextEmbedder> = Arc::new(RemoteEmbedder::new(
            &config.embedder.endpoint,
            config.embedder.timeout_ms,
        ));

        Ok(Self::new(catalog, store, embedder, config))
    }

    /// Query-by-text entry point, primary display size.
    ///
    /// Empty keywords fail with `InvalidInput` before any dependency call;
    /// an unreachable embedder surfaces as `EmbeddingUnavailable`; an empty
    /// result set is `NoMatch` — the three are never conflated.
    pub async fn search(
        &self,
        session: &Session,
        keyword: &str,
    ) -> Result<SearchResponse, EngineError> {
        let (matched, selected) = self.search_candidates(session, keyword, self.top_k).await?;
        Ok(SearchResponse::new(
            selected.into_iter().map(|c| c.path).collect(),
            matched.label,
            matched.similarity,
        ))
    }

    /// Query-by-text with the wider secondary-view size (`max_per_label`
    /// results instead of `top_k`).
    pub async fn search_wide(
        &self,
        session: &Session,
        keyword: &str,
    ) -> Result<SearchResponse, EngineError> {
        let (matched, selected) = self
            .search_candidates(session, keyword, self.max_per_label)
            .await?;
        Ok(SearchResponse::new(
            selected.into_iter().map(|c| c.path).collect(),
            matched.label,
            matched.similarity,
        ))
    }

    /// Query-by-text returning full scored candidates (for interactive
    /// callers that need filenames and scores, not just servable paths).
    pub async fn search_candidates(
        &self,
        session: &Session,
        keyword: &str,
        limit: usize,
    ) -> Result<(LabelMatch, Vec<ScoredCandidate>), EngineError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(EngineError::InvalidInput("keyword must not be empty".into()));
        }

        let labels: Vec<String> = self.catalog.labels().map(str::to_string).collect();
        let matched = self.matcher.resolve(keyword, &labels).await?;

        let uploaded_label = keyword.to_lowercase();
        let selected = self.rank_label(session, &matched.label, &uploaded_label, limit)?;
        if selected.is_empty() {
            return Err(EngineError::NoMatch(format!(
                "no images passed the similarity threshold for label '{}'",
                matched.label
            )));
        }
        Ok((matched, selected))
    }

    /// Image-path entry point: consume a classification, install its
    /// embedding as the session's current image, and recommend against the
    /// top class label. Bypasses the semantic matcher — the classifier
    /// already named a label.
    pub fn recommend_for_classification(
        &self,
        session: &mut Session,
        classification: &Classification,
    ) -> Result<Vec<ScoredCandidate>, EngineError> {
        let Some(top) = classification.top_class() else {
            return Err(EngineError::InvalidInput(
                "classification contained no predictions".into(),
            ));
        };
        if classification.embedding.is_empty() {
            return Err(EngineError::InvalidInput(
                "classification carried no embedding".into(),
            ));
        }
        session.set_current_image(classification.embedding.clone());

        let selected = self.rank_label(session, &top, &top, self.top_k)?;
        if selected.is_empty() {
            return Err(EngineError::NoMatch(format!(
                "no images found for label '{top}'"
            )));
        }
        Ok(selected)
    }

    /// Classify an image via the external classifier, then recommend.
    pub async fn recommend_for_image(
        &self,
        session: &mut Session,
        classifier: &dyn ImageClassifier,
        image: &Path,
    ) -> Result<Vec<ScoredCandidate>, EngineError> {
        tracing::debug!("Classifying {:?} via {}", image, classifier.name());
        let classification = classifier.classify(image).await?;
        self.recommend_for_classification(session, &classification)
    }

    /// Score and select the candidates of one label.
    ///
    /// Candidates without a stored embedding are skipped with a warning,
    /// matching the reference behavior for failed per-candidate fetches.
    fn rank_label(
        &self,
        session: &Session,
        label: &str,
        uploaded_label: &str,
        limit: usize,
    ) -> Result<Vec<ScoredCandidate>, EngineError> {
        let filenames = self.catalog.lookup(label);
        let mut scored = Vec::with_capacity(filenames.len());

        for filename in filenames {
            let Some(record) = self.catalog.record(filename) else {
                continue;
            };
            let Some(embedding) = self.store.get(filename) else {
                tracing::warn!("No stored embedding for {filename} — skipping");
                continue;
            };

            let score = ScoringEngine::score(
                embedding,
                uploaded_label,
                &record.label,
                session.preference().vector(),
                session.current_image(),
            )?;
            scored.push(ScoredCandidate {
                filename: filename.clone(),
                path: self.serve_path(&record.path),
                label: record.label.clone(),
                score,
            });
        }

        let threshold = session.preference().similarity_threshold();
        tracing::debug!(
            "Ranking {} candidates for label '{}' (threshold {:.2})",
            scored.len(),
            label,
            threshold
        );
        Ok(selection::select(scored, threshold, limit, self.max_per_label))
    }

    /// The embedding stored for a corpus image, if any.
    pub fn embedding_for(&self, filename: &str) -> Option<&[f32]> {
        self.store.get(filename)
    }

    pub fn catalog(&self) -> &LabelCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &EmbeddingStore {
        &self.store
    }

    fn serve_path(&self, corpus_relative: &str) -> String {
        if self.path_prefix.is_empty() {
            corpus_relative.to_string()
        } else {
            format!("{}/{}", self.path_prefix, corpus_relative)
        }
    }
}
