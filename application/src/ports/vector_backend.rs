//! Vector backend port
//!
//! Defines the interface to one similarity-search engine.

use async_trait::async_trait;
use thiserror::Error;
use vault_domain::{BackendKind, RankedItem};

/// Errors raised by a vector backend, at construction or query time
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("Index not found: {0}")]
    IndexNotFound(String),

    #[error("Backend misconfigured: {0}")]
    Misconfigured(String),

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Timeout")]
    Timeout,
}

/// A similarity-search backend
///
/// Implementations must tolerate concurrent `similarity_search` calls; the
/// benchmark harness shares one instance across all of its workers.
#[async_trait]
pub trait VectorBackend: Send + Sync {
    /// Storage engine family of this backend
    fn kind(&self) -> BackendKind;

    /// Return up to `top_k` items, most relevant first
    async fn similarity_search(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<RankedItem>, BackendError>;
}
