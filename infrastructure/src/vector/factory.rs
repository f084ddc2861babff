//! Builds the configured backend set.
//!
//! Every enabled backend becomes a [`BackendAdapter`], in the order the
//! configuration lists them. A backend that fails to construct is still
//! returned, as a permanently unavailable adapter.

use super::disk::DiskBackend;
use super::encrypted::{EncryptedIndexSettings, EncryptedRemoteBackend};
use super::in_memory::InMemoryBackend;
use crate::config::{FileBackendsConfig, FileEmbeddingConfig};
use crate::embedding::{HashingEmbedder, OpenAiEmbedder};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use vault_application::{
    BackendAdapter, BackendError, CorpusSource, Embedder, EmbeddingError, VectorBackend,
};
use vault_domain::BackendKind;

/// Build the embedder named by `[embedding] provider`
pub fn build_embedder(config: &FileEmbeddingConfig) -> Result<Arc<dyn Embedder>, EmbeddingError> {
    match config.provider.as_str() {
        "openai" => {
            let api_key = config.resolve_api_key().ok_or_else(|| {
                EmbeddingError::RequestFailed(format!(
                    "missing API key (set {})",
                    config.api_key_env
                ))
            })?;
            let embedder = OpenAiEmbedder::new(
                config.base_url.clone(),
                api_key,
                config.model.clone(),
                config.dimensions,
                Duration::from_secs(30),
            )?;
            Ok(Arc::new(embedder))
        }
        _ => Ok(Arc::new(HashingEmbedder::new(config.dimensions))),
    }
}

pub struct BackendFactory<'a> {
    config: &'a FileBackendsConfig,
    embedder: Arc<dyn Embedder>,
}

impl<'a> BackendFactory<'a> {
    pub fn new(config: &'a FileBackendsConfig, embedder: Arc<dyn Embedder>) -> Self {
        Self { config, embedder }
    }

    /// Construct every enabled backend
    pub async fn build_adapters(&self, corpus: &dyn CorpusSource) -> Vec<BackendAdapter> {
        let mut adapters = Vec::new();
        for (name, kind) in self.config.enabled() {
            let backend = match kind {
                BackendKind::InMemory => self.in_memory(corpus).await,
                BackendKind::DiskBacked => self.disk(),
                BackendKind::Encrypted => self.encrypted(),
            };
            adapters.push(BackendAdapter::connect(name, kind, backend));
        }
        info!(
            "Backends: {}",
            adapters
                .iter()
                .map(|a| format!("{} ({})", a.name(), a.availability().as_str()))
                .collect::<Vec<_>>()
                .join(", ")
        );
        adapters
    }

    async fn in_memory(
        &self,
        corpus: &dyn CorpusSource,
    ) -> Result<Arc<dyn VectorBackend>, BackendError> {
        let records = corpus
            .records()
            .map_err(|e| BackendError::IndexNotFound(e.to_string()))?;
        let backend = InMemoryBackend::build(&records, Arc::clone(&self.embedder)).await?;
        Ok(Arc::new(backend))
    }

    fn disk(&self) -> Result<Arc<dyn VectorBackend>, BackendError> {
        let backend = DiskBackend::load(&self.config.disk.path, Arc::clone(&self.embedder))?;
        Ok(Arc::new(backend))
    }

    fn encrypted(&self) -> Result<Arc<dyn VectorBackend>, BackendError> {
        let encrypted = &self.config.encrypted;
        let backend = EncryptedRemoteBackend::connect(EncryptedIndexSettings {
            base_url: encrypted.base_url.clone(),
            index_name: encrypted.index_name.clone(),
            api_key: encrypted.resolve_api_key(),
            index_key: encrypted.resolve_index_key(),
            timeout: Duration::from_secs(encrypted.timeout_seconds),
        })?;
        Ok(Arc::new(backend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CsvCorpus;
    use vault_domain::BackendAvailability;

    #[tokio::test]
    async fn test_failed_backends_become_unavailable_adapters() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FileBackendsConfig::default();
        config.disk.path = dir.path().join("missing.json").display().to_string();
        config.encrypted.api_key_env = "VAULT_RAG_TEST_UNSET_API_KEY".to_string();
        config.encrypted.index_key_env = "VAULT_RAG_TEST_UNSET_INDEX_KEY".to_string();

        let csv_path = dir.path().join("corpus.csv");
        std::fs::write(&csv_path, "text,amount,label,metadata\nsmall test charge,1.00,1,x\n")
            .unwrap();
        let corpus = CsvCorpus::new(&csv_path, "text");

        let factory = BackendFactory::new(&config, Arc::new(HashingEmbedder::new(16)));
        let adapters = factory.build_adapters(&corpus).await;

        let states: Vec<_> = adapters
            .iter()
            .map(|a| (a.name().to_string(), a.availability()))
            .collect();
        assert_eq!(
            states,
            vec![
                ("faiss".to_string(), BackendAvailability::Available),
                ("chroma".to_string(), BackendAvailability::Unavailable),
                ("cyborg".to_string(), BackendAvailability::Unavailable),
            ]
        );
    }

    #[test]
    fn test_default_embedder_is_hashing() {
        let embedder = build_embedder(&FileEmbeddingConfig::default()).unwrap();
        assert_eq!(embedder.dimensions(), 384);
    }

    #[test]
    fn test_openai_embedder_requires_key() {
        let config = FileEmbeddingConfig {
            provider: "openai".to_string(),
            api_key_env: "VAULT_RAG_TEST_UNSET_OPENAI_KEY".to_string(),
            ..Default::default()
        };
        assert!(build_embedder(&config).is_err());
    }
}
