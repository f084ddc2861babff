//! Disk-persisted index backend.
//!
//! The index is a JSON document (`format`, `version`, `index`) written by
//! [`DiskBackend::persist`]. It is validated once at construction, where a
//! missing or unreadable file makes the backend fail to construct. Every
//! query then reads and decodes the file again, so the latency recorded
//! for this backend includes the disk round trip instead of being an
//! in-memory scan. Rewriting the file between queries is picked up on the
//! next query.

use super::flat_index::FlatIndex;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use vault_application::{BackendError, Embedder, VectorBackend};
use vault_domain::{BackendKind, RankedItem};

const FORMAT: &str = "vault-rag-flat-index";
const VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct IndexFile {
    format: String,
    version: u32,
    index: FlatIndex,
}

pub struct DiskBackend {
    path: PathBuf,
    /// Entry count seen when the index was validated
    entries: usize,
    embedder: Arc<dyn Embedder>,
}

impl DiskBackend {
    /// Validate the index at `path`.
    pub fn load(
        path: impl AsRef<Path>,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self, BackendError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(BackendError::IndexNotFound(path.display().to_string()));
        }

        let bytes = std::fs::read(path)
            .map_err(|e| BackendError::Misconfigured(format!("{}: {}", path.display(), e)))?;
        let index = decode(path, &bytes, embedder.dimensions())?;

        info!("Loaded disk index {} ({} entries)", path.display(), index.len());
        Ok(Self {
            path: path.to_path_buf(),
            entries: index.len(),
            embedder,
        })
    }

    /// Write `index` to `path` in the format [`load`](Self::load) reads.
    pub fn persist(index: &FlatIndex, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = IndexFile {
            format: FORMAT.to_string(),
            version: VERSION,
            index: index.clone(),
        };
        let json = serde_json::to_vec(&file).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    async fn read_index(&self) -> Result<FlatIndex, BackendError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| BackendError::QueryFailed(format!("{}: {}", self.path.display(), e)))?;
        decode(&self.path, &bytes, self.embedder.dimensions())
    }
}

fn decode(path: &Path, bytes: &[u8], dimensions: usize) -> Result<FlatIndex, BackendError> {
    let file: IndexFile = serde_json::from_slice(bytes)
        .map_err(|e| BackendError::Misconfigured(format!("{}: {}", path.display(), e)))?;

    if file.format != FORMAT || file.version != VERSION {
        return Err(BackendError::Misconfigured(format!(
            "{}: unsupported index format {} v{}",
            path.display(),
            file.format,
            file.version
        )));
    }
    if !file.index.is_consistent() || file.index.dimensions() != dimensions {
        return Err(BackendError::Misconfigured(format!(
            "{}: index is {}-dimensional, embedder produces {}",
            path.display(),
            file.index.dimensions(),
            dimensions
        )));
    }
    Ok(file.index)
}

#[async_trait]
impl VectorBackend for DiskBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::DiskBacked
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
        let index = self.read_index().await?;
        Ok(index.search(&vector, top_k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashingEmbedder;
    use crate::vector::in_memory::build_index;
    use vault_application::CorpusRecord;

    #[tokio::test]
    async fn test_persist_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("disk_index.json");
        let embedder = Arc::new(HashingEmbedder::new(32));
        let index = build_index(
            &[
                CorpusRecord::new("card testing: many small charges"),
                CorpusRecord::new("payroll deposit"),
            ],
            embedder.as_ref(),
        )
        .await
        .unwrap();

        DiskBackend::persist(&index, &path).unwrap();
        let backend = DiskBackend::load(&path, embedder).unwrap();

        assert_eq!(backend.len(), 2);
        let items = backend
            .similarity_search("many small charges", 1)
            .await
            .unwrap();
        assert_eq!(items[0].content, "card testing: many small charges");
    }

    #[tokio::test]
    async fn test_each_query_reads_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("disk_index.json");
        let embedder = Arc::new(HashingEmbedder::new(32));
        let first = build_index(
            &[CorpusRecord::new("wire transfer to new payee")],
            embedder.as_ref(),
        )
        .await
        .unwrap();
        DiskBackend::persist(&first, &path).unwrap();
        let backend = DiskBackend::load(&path, embedder.clone()).unwrap();

        let rebuilt = build_index(
            &[CorpusRecord::new("chargeback on disputed purchase")],
            embedder.as_ref(),
        )
        .await
        .unwrap();
        DiskBackend::persist(&rebuilt, &path).unwrap();
        let items = backend.similarity_search("wire transfer", 1).await.unwrap();
        assert_eq!(items[0].content, "chargeback on disputed purchase");

        std::fs::remove_file(&path).unwrap();
        let err = backend.similarity_search("wire transfer", 1).await.unwrap_err();
        assert!(matches!(err, BackendError::QueryFailed(_)));
    }

    #[test]
    fn test_missing_file_is_index_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = DiskBackend::load(
            dir.path().join("absent.json"),
            Arc::new(HashingEmbedder::new(8)),
        );
        assert!(matches!(result, Err(BackendError::IndexNotFound(_))));
    }

    #[test]
    fn test_corrupt_file_is_misconfigured() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(&path, "{not json").unwrap();
        let result = DiskBackend::load(&path, Arc::new(HashingEmbedder::new(8)));
        assert!(matches!(result, Err(BackendError::Misconfigured(_))));
    }

    #[test]
    fn test_dimension_mismatch_is_misconfigured() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        DiskBackend::persist(&FlatIndex::new(16), &path).unwrap();
        let result = DiskBackend::load(&path, Arc::new(HashingEmbedder::new(8)));
        assert!(matches!(result, Err(BackendError::Misconfigured(_))));
    }
}
