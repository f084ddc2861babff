//! Embedding adapters
//!
//! Implementations of the [`Embedder`](vault_application::Embedder) port:
//!
//! - [`HashingEmbedder`]: deterministic feature hashing, no network
//! - [`OpenAiEmbedder`]: OpenAI-compatible `/v1/embeddings` endpoint

mod hashing;
mod openai;

pub use hashing::HashingEmbedder;
pub use openai::OpenAiEmbedder;

/// Scale a vector to unit length; the zero vector is left unchanged
pub(crate) fn normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}
