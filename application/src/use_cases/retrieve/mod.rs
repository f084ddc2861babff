//! Retrieval orchestrator
//!
//! Issues one query to every configured backend, records each backend's
//! elapsed time and returns the primary backend's items.
//!
//! Only the primary backend is allowed to fail the call. Any other backend
//! that errors is logged and recorded as an unmeasured `0` for that call.

mod adapter;

pub use adapter::{AdapterOutcome, BackendAdapter};

use crate::config::{FanOut, RetrievalParams};
use crate::ports::vector_backend::BackendError;
use futures::future::join_all;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info, warn};
use vault_domain::{BackendDescriptor, DomainError, Query, RankedItem, RetrievalMetrics};

/// Errors that can occur during retrieval
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RetrievalError {
    #[error("Primary backend '{0}' is unavailable")]
    PrimaryUnavailable(String),

    #[error("Primary backend '{backend}' failed: {source}")]
    PrimaryFailed {
        backend: String,
        #[source]
        source: BackendError,
    },

    #[error("Primary backend '{0}' is not configured")]
    UnknownPrimary(String),

    #[error("Duplicate backend name: {0}")]
    DuplicateBackend(String),

    #[error("top_k must be at least 1")]
    InvalidTopK,

    #[error("{0}")]
    InvalidQuery(#[from] DomainError),
}

/// Metrics plus the primary backend's items for one call
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalOutcome {
    pub metrics: RetrievalMetrics,
    pub items: Vec<RankedItem>,
}

/// Fan-out caller over a fixed set of backend adapters
///
/// The adapter set is fixed at construction and shared read-only, so one
/// orchestrator can serve many concurrent callers.
#[derive(Debug)]
pub struct RetrievalOrchestrator {
    adapters: Vec<BackendAdapter>,
    primary: usize,
    params: RetrievalParams,
}

impl RetrievalOrchestrator {
    pub fn new(
        adapters: Vec<BackendAdapter>,
        params: RetrievalParams,
    ) -> Result<Self, RetrievalError> {
        if params.top_k == 0 {
            return Err(RetrievalError::InvalidTopK);
        }

        let mut seen = HashSet::new();
        for adapter in &adapters {
            if !seen.insert(adapter.name()) {
                return Err(RetrievalError::DuplicateBackend(adapter.name().to_string()));
            }
        }

        let primary = adapters
            .iter()
            .position(|a| a.name() == params.primary)
            .ok_or_else(|| RetrievalError::UnknownPrimary(params.primary.clone()))?;

        info!(
            "Retrieval orchestrator ready: {} backends ({} available), primary '{}'",
            adapters.len(),
            adapters.iter().filter(|a| a.is_available()).count(),
            params.primary
        );

        Ok(Self {
            adapters,
            primary,
            params,
        })
    }

    pub fn adapters(&self) -> &[BackendAdapter] {
        &self.adapters
    }

    pub fn params(&self) -> &RetrievalParams {
        &self.params
    }

    pub fn primary(&self) -> &BackendAdapter {
        &self.adapters[self.primary]
    }

    pub fn primary_name(&self) -> &str {
        self.primary().name()
    }

    pub fn backend_names(&self) -> Vec<String> {
        self.adapters.iter().map(|a| a.name().to_string()).collect()
    }

    pub fn descriptors(&self) -> Vec<BackendDescriptor> {
        self.adapters.iter().map(|a| a.descriptor()).collect()
    }

    /// All-zero metrics with one entry per configured backend
    pub fn zero_metrics(&self) -> RetrievalMetrics {
        RetrievalMetrics::zeroed(self.adapters.iter().map(|a| a.name()))
    }

    /// Query every backend with the same text.
    ///
    /// The returned metrics always hold exactly one entry per configured
    /// backend, in configured order.
    pub async fn retrieve(&self, query: &str) -> Result<RetrievalOutcome, RetrievalError> {
        let query = Query::new(query)?;
        let primary = self.primary();
        if !primary.is_available() {
            return Err(RetrievalError::PrimaryUnavailable(primary.name().to_string()));
        }

        let top_k = self.params.top_k;
        let results = match self.params.fan_out {
            FanOut::Sequential => {
                let mut results = Vec::with_capacity(self.adapters.len());
                for adapter in &self.adapters {
                    results.push(adapter.query(query.text(), top_k).await);
                }
                results
            }
            FanOut::Concurrent => {
                join_all(
                    self.adapters
                        .iter()
                        .map(|adapter| adapter.query(query.text(), top_k)),
                )
                .await
            }
        };

        let mut metrics = RetrievalMetrics::new();
        let mut items = Vec::new();

        for (index, (adapter, result)) in self.adapters.iter().zip(results).enumerate() {
            match result {
                Ok(outcome) => {
                    if outcome.measured {
                        metrics.record(adapter.name(), outcome.elapsed_secs);
                    } else {
                        metrics.record_unmeasured(adapter.name());
                    }
                    if index == self.primary {
                        items = outcome.items;
                    }
                }
                Err(e) if index == self.primary => {
                    return Err(RetrievalError::PrimaryFailed {
                        backend: adapter.name().to_string(),
                        source: e,
                    });
                }
                Err(e) => {
                    warn!("Backend '{}' failed, recording 0: {}", adapter.name(), e);
                    metrics.record_unmeasured(adapter.name());
                }
            }
        }

        debug!(
            "Retrieved {} items from primary '{}'",
            items.len(),
            primary.name()
        );
        Ok(RetrievalOutcome { metrics, items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::MockBackend;
    use std::sync::Arc;
    use vault_domain::BackendKind;

    fn adapters(chroma: MockBackend, cyborg: MockBackend) -> Vec<BackendAdapter> {
        vec![
            BackendAdapter::new("faiss", Arc::new(MockBackend::new(BackendKind::InMemory))),
            BackendAdapter::new("chroma", Arc::new(chroma)),
            BackendAdapter::new("cyborg", Arc::new(cyborg)),
        ]
    }

    fn healthy() -> Vec<BackendAdapter> {
        adapters(
            MockBackend::new(BackendKind::DiskBacked),
            MockBackend::new(BackendKind::Encrypted).with_items(&["structuring", "smurfing"]),
        )
    }

    #[tokio::test]
    async fn test_metrics_have_one_entry_per_backend() {
        for fan_out in [FanOut::Sequential, FanOut::Concurrent] {
            let orchestrator = RetrievalOrchestrator::new(
                healthy(),
                RetrievalParams::default().with_fan_out(fan_out),
            )
            .unwrap();
            let outcome = orchestrator.retrieve("deposits under 10k").await.unwrap();
            let names: Vec<_> = outcome.metrics.names().collect();
            assert_eq!(names, vec!["faiss", "chroma", "cyborg"]);
        }
    }

    #[tokio::test]
    async fn test_returns_primary_items_only() {
        let orchestrator = RetrievalOrchestrator::new(healthy(), RetrievalParams::default()).unwrap();
        let outcome = orchestrator.retrieve("deposits").await.unwrap();
        assert_eq!(outcome.items.len(), 1);
        assert_eq!(outcome.items[0].content, "structuring");
    }

    #[tokio::test]
    async fn test_top_k_is_passed_through() {
        let cyborg = MockBackend::new(BackendKind::Encrypted).with_items(&["a", "b", "c"]);
        let orchestrator = RetrievalOrchestrator::new(
            adapters(MockBackend::new(BackendKind::DiskBacked), cyborg),
            RetrievalParams::default().with_top_k(2),
        )
        .unwrap();
        let outcome = orchestrator.retrieve("q").await.unwrap();
        assert_eq!(outcome.items.len(), 2);
    }

    #[tokio::test]
    async fn test_unavailable_backend_recorded_as_zero_and_never_called() {
        let faiss = MockBackend::new(BackendKind::InMemory);
        let calls = faiss.call_counter();
        let orchestrator = RetrievalOrchestrator::new(
            vec![
                BackendAdapter::connect(
                    "chroma",
                    BackendKind::DiskBacked,
                    Err(BackendError::IndexNotFound("data/disk_index.json".to_string())),
                ),
                BackendAdapter::new("faiss", Arc::new(faiss)),
                BackendAdapter::new("cyborg", Arc::new(MockBackend::new(BackendKind::Encrypted))),
            ],
            RetrievalParams::default(),
        )
        .unwrap();

        for _ in 0..3 {
            let outcome = orchestrator.retrieve("q").await.unwrap();
            assert_eq!(outcome.metrics.len(), 3);
            assert_eq!(outcome.metrics.get("chroma"), Some(0.0));
            assert!(outcome.metrics.is_unmeasured("chroma"));
        }
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_secondary_failure_degrades_to_zero() {
        let orchestrator = RetrievalOrchestrator::new(
            adapters(
                MockBackend::new(BackendKind::DiskBacked).failing(),
                MockBackend::new(BackendKind::Encrypted).with_items(&["evidence"]),
            ),
            RetrievalParams::default(),
        )
        .unwrap();
        let outcome = orchestrator.retrieve("q").await.unwrap();
        assert_eq!(outcome.metrics.get("chroma"), Some(0.0));
        assert!(outcome.metrics.is_unmeasured("chroma"));
        assert!(!outcome.metrics.is_unmeasured("cyborg"));
        assert_eq!(outcome.metrics.len(), 3);
        assert_eq!(outcome.items[0].content, "evidence");
    }

    #[tokio::test]
    async fn test_primary_unavailable_is_error() {
        let orchestrator = RetrievalOrchestrator::new(
            vec![
                BackendAdapter::new("faiss", Arc::new(MockBackend::new(BackendKind::InMemory))),
                BackendAdapter::connect(
                    "cyborg",
                    BackendKind::Encrypted,
                    Err(BackendError::Misconfigured("missing api key".to_string())),
                ),
            ],
            RetrievalParams::default(),
        )
        .unwrap();
        let err = orchestrator.retrieve("q").await.unwrap_err();
        assert_eq!(err, RetrievalError::PrimaryUnavailable("cyborg".to_string()));
    }

    #[tokio::test]
    async fn test_primary_failure_is_error() {
        let orchestrator = RetrievalOrchestrator::new(
            adapters(
                MockBackend::new(BackendKind::DiskBacked),
                MockBackend::new(BackendKind::Encrypted).failing(),
            ),
            RetrievalParams::default(),
        )
        .unwrap();
        let err = orchestrator.retrieve("q").await.unwrap_err();
        assert!(matches!(err, RetrievalError::PrimaryFailed { ref backend, .. } if backend == "cyborg"));
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected() {
        let orchestrator = RetrievalOrchestrator::new(healthy(), RetrievalParams::default()).unwrap();
        assert!(matches!(
            orchestrator.retrieve("  ").await,
            Err(RetrievalError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_construction_validation() {
        assert_eq!(
            RetrievalOrchestrator::new(healthy(), RetrievalParams::default().with_primary("pinecone"))
                .unwrap_err(),
            RetrievalError::UnknownPrimary("pinecone".to_string())
        );
        assert_eq!(
            RetrievalOrchestrator::new(healthy(), RetrievalParams::default().with_top_k(0))
                .unwrap_err(),
            RetrievalError::InvalidTopK
        );

        let mut duplicated = healthy();
        duplicated.push(BackendAdapter::new(
            "faiss",
            Arc::new(MockBackend::new(BackendKind::InMemory)),
        ));
        assert_eq!(
            RetrievalOrchestrator::new(duplicated, RetrievalParams::default()).unwrap_err(),
            RetrievalError::DuplicateBackend("faiss".to_string())
        );
    }

    #[test]
    fn test_zero_metrics() {
        let orchestrator = RetrievalOrchestrator::new(healthy(), RetrievalParams::default()).unwrap();
        let metrics = orchestrator.zero_metrics();
        assert_eq!(metrics.len(), 3);
        assert!(metrics.is_all_zero());
    }
}
