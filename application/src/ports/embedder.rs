//! Embedding port
//!
//! Turns text into a dense vector. Used by backends that search locally.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while embedding text
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmbeddingError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Text embedding function
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Length of every vector this embedder produces
    fn dimensions(&self) -> usize;

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Embed several texts. The default embeds them one at a time.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }
}
