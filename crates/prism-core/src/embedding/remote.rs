//! HTTP client for the sentence-embedding sidecar service.
//!
//! Talks to a local service exposing `POST /embed {"text": ...}` →
//! `{"embedding": [...]}`. No authentication — it only ever runs next to
//! the engine.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::provider::TextEmbedder;
use crate::error::EngineError;

/// Remote embedding provider backed by the sidecar service.
pub struct RemoteEmbedder {
    endpoint: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl RemoteEmbedder {
    pub fn new(endpoint: &str, timeout_ms: u64) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(timeout_ms),
            client: reqwest::Client::new(),
        }
    }
}

/// `/embed` request body.
#[derive(Serialize)]
struct EmbedRequest<'a> {
    text: &'a str,
}

/// `/embed` response body.
#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

#[async_trait]
impl TextEmbedder for RemoteEmbedder {
    fn name(&self) -> &str {
        "remote"
    }

    async fn is_available(&self) -> bool {
        // Any HTTP response counts as reachable; the /embed route itself
        // only accepts POST, so the status code is irrelevant here.
        self.client
            .get(&self.endpoint)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .is_ok()
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EngineError> {
        let url = format!("{}/embed", self.endpoint);

        let resp = self
            .client
            .post(&url)
            .json(&EmbedRequest { text })
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| EngineError::EmbeddingUnavailable {
                message: format!("Embed request failed: {e}"),
                status_code: None,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(EngineError::EmbeddingUnavailable {
                message: format!("Embedding service HTTP {status}: {body}"),
                status_code: Some(status.as_u16()),
            });
        }

        let parsed: EmbedResponse =
            resp.json().await.map_err(|e| EngineError::EmbeddingUnavailable {
                message: format!("Failed to parse embedding response: {e}"),
                status_code: None,
            })?;

        if parsed.embedding.is_empty() {
            return Err(EngineError::EmbeddingUnavailable {
                message: "Embedding service returned an empty vector".to_string(),
                status_code: None,
            });
        }

        Ok(parsed.embedding)
    }
}
