//! OpenAI-compatible embeddings client.

use super::normalize;
use crate::http::{HttpFailure, build_client, endpoint, send_json};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use vault_application::{Embedder, EmbeddingError};

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
    dimensions: usize,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

pub struct OpenAiEmbedder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    dimensions: usize,
}

impl OpenAiEmbedder {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        dimensions: usize,
        timeout: Duration,
    ) -> Result<Self, EmbeddingError> {
        let client =
            build_client(timeout).map_err(|e| EmbeddingError::RequestFailed(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            dimensions,
        })
    }
}

impl From<HttpFailure> for EmbeddingError {
    fn from(e: HttpFailure) -> Self {
        match e {
            HttpFailure::Decode(msg) => EmbeddingError::InvalidResponse(msg),
            other => EmbeddingError::RequestFailed(other.to_string()),
        }
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vectors = self.embed_batch(&[text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| EmbeddingError::InvalidResponse("empty data".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Embedding {} texts with {}", texts.len(), self.model);

        let request = self
            .client
            .post(endpoint(&self.base_url, "/v1/embeddings"))
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest {
                model: &self.model,
                input: texts,
                dimensions: self.dimensions,
            });
        let mut response: EmbeddingResponse = send_json(request).await?;

        if response.data.len() != texts.len() {
            return Err(EmbeddingError::InvalidResponse(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                response.data.len()
            )));
        }
        response.data.sort_by_key(|d| d.index);

        response
            .data
            .into_iter()
            .map(|d| {
                if d.embedding.len() != self.dimensions {
                    return Err(EmbeddingError::DimensionMismatch {
                        expected: self.dimensions,
                        actual: d.embedding.len(),
                    });
                }
                let mut vector = d.embedding;
                normalize(&mut vector);
                Ok(vector)
            })
            .collect()
    }
}
