//! Feature-hashing embedder.
//!
//! Each lowercase word and word bigram is hashed (FNV-1a) into one of
//! `dimensions` buckets with a hash-derived sign, and the result is
//! L2-normalized. Vectors are stable across processes and platforms, so
//! they can be persisted in a disk index.

use super::normalize;
use async_trait::async_trait;
use vault_application::{Embedder, EmbeddingError};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME)
    })
}

#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    pub fn embed_sync(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        let tokens: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
            .collect();

        let mut add = |feature: &str| {
            let hash = fnv1a(feature.as_bytes());
            let bucket = (hash % self.dimensions as u64) as usize;
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        };

        for token in &tokens {
            add(token);
        }
        for pair in tokens.windows(2) {
            add(&format!("{} {}", pair[0], pair[1]));
        }

        normalize(&mut vector);
        vector
    }
}

#[async_trait]
impl Embedder for HashingEmbedder {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.embed_sync(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn test_deterministic_and_normalized() {
        let embedder = HashingEmbedder::new(64);
        let a = embedder.embed_sync("Wire transfer to offshore account");
        let b = embedder.embed_sync("wire TRANSFER to offshore account!");
        assert_eq!(a, b);
        assert!((cosine(&a, &a) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_similar_text_scores_higher() {
        let embedder = HashingEmbedder::new(384);
        let query = embedder.embed_sync("large wire transfer offshore");
        let close = embedder.embed_sync("wire transfer to an offshore account");
        let far = embedder.embed_sync("grocery purchase with debit card");
        assert!(cosine(&query, &close) > cosine(&query, &far));
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let embedder = HashingEmbedder::new(8);
        assert!(embedder.embed_sync("  ...  ").iter().all(|v| *v == 0.0));
    }

    #[tokio::test]
    async fn test_port_dimensions() {
        let embedder = HashingEmbedder::new(16);
        assert_eq!(embedder.dimensions(), 16);
        assert_eq!(embedder.embed("x").await.unwrap().len(), 16);
    }
}
