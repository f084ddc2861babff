//! In-memory flat index backend.

use super::flat_index::{FlatIndex, IndexEntry};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use vault_application::{BackendError, CorpusRecord, Embedder, VectorBackend};
use vault_domain::{BackendKind, RankedItem};

/// Exact search over an index held in RAM, built at startup
pub struct InMemoryBackend {
    index: FlatIndex,
    embedder: Arc<dyn Embedder>,
}

impl InMemoryBackend {
    pub fn new(index: FlatIndex, embedder: Arc<dyn Embedder>) -> Self {
        Self { index, embedder }
    }

    /// Embed every record and index it
    pub async fn build(
        records: &[CorpusRecord],
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self, BackendError> {
        let index = build_index(records, embedder.as_ref()).await?;
        info!("In-memory index built with {} entries", index.len());
        Ok(Self::new(index, embedder))
    }

    pub fn index(&self) -> &FlatIndex {
        &self.index
    }
}

/// Embed `records` into a fresh [`FlatIndex`]
pub async fn build_index(
    records: &[CorpusRecord],
    embedder: &dyn Embedder,
) -> Result<FlatIndex, BackendError> {
    let texts: Vec<String> = records.iter().map(|r| r.text.clone()).collect();
    let vectors = embedder
        .embed_batch(&texts)
        .await
        .map_err(|e| BackendError::Embedding(e.to_string()))?;

    let mut index = FlatIndex::new(embedder.dimensions());
    for (record, vector) in records.iter().zip(vectors) {
        let inserted = index.insert(IndexEntry {
            content: record.text.clone(),
            metadata: record.attributes.clone(),
            vector,
        });
        if !inserted {
            return Err(BackendError::Embedding(format!(
                "embedder returned a vector that is not {}-dimensional",
                embedder.dimensions()
            )));
        }
    }
    Ok(index)
}

#[async_trait]
impl VectorBackend for InMemoryBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::InMemory
    }

    async fn similarity_search(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<RankedItem>, BackendError> {
        let vector = self
            .embedder
            .embed(query)
            .await
            .map_err(|e| BackendError::Embedding(e.to_string()))?;
        Ok(self.index.search(&vector, top_k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashingEmbedder;

    fn records() -> Vec<CorpusRecord> {
        vec![
            CorpusRecord::new("Wire transfer of 9,900 USD to offshore account")
                .with_attribute("label", "fraud"),
            CorpusRecord::new("Monthly grocery purchase at local store")
                .with_attribute("label", "legit"),
        ]
    }

    #[tokio::test]
    async fn test_build_and_search() {
        let backend = InMemoryBackend::build(&records(), Arc::new(HashingEmbedder::new(128)))
            .await
            .unwrap();
        assert_eq!(backend.index().len(), 2);

        let items = backend
            .similarity_search("offshore wire transfer", 1)
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].content.contains("offshore"));
        assert_eq!(items[0].metadata["label"], "fraud");
        assert_eq!(backend.kind(), BackendKind::InMemory);
    }
}
