//! OpenAI-compatible embeddings client (`POST {base}/embeddings`).

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use schoolcatch_core::retrieval::embedder::Embedder;
use schoolcatch_types::config::EmbeddingConfig;
use schoolcatch_types::error::RetrievalError;

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

/// Embedder backed by an OpenAI-compatible `/embeddings` endpoint.
///
/// Does NOT derive Debug: it holds the API key.
pub struct OpenAiEmbedder {
    client: Client,
    base_url: String,
    api_key: SecretString,
    model: String,
}

impl OpenAiEmbedder {
    pub fn new(config: &EmbeddingConfig, api_key: SecretString) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
        }
    }
}

impl Embedder for OpenAiEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let body = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        let resp = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| RetrievalError::Embedding(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %text, "Embedding API error response");
            return Err(RetrievalError::Embedding(format!("HTTP {status}: {text}")));
        }

        let mut data = resp
            .json::<EmbeddingResponse>()
            .await
            .map_err(|e| RetrievalError::Embedding(format!("failed to parse response: {e}")))?
            .data;

        if data.len() != texts.len() {
            return Err(RetrievalError::Embedding(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                data.len()
            )));
        }

        // The API may return items out of order; `index` is authoritative.
        data.sort_by_key(|d| d.index);
        Ok(data.into_iter().map(|d| d.embedding).collect())
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
