//! Benchmark samples

use crate::retrieval::metrics::RetrievalMetrics;
use serde::{Deserialize, Serialize};

/// Outcome of one benchmark query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleStatus {
    Success,
    Failed,
}

/// One query executed during the timed phase (Value Object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSample {
    pub query_id: usize,
    pub status: SampleStatus,
    /// Per-backend latencies; present only for successful samples
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latencies: Option<RetrievalMetrics>,
    /// Failure detail; present only for failed samples
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BenchmarkSample {
    pub fn success(query_id: usize, latencies: RetrievalMetrics) -> Self {
        Self {
            query_id,
            status: SampleStatus::Success,
            latencies: Some(latencies),
            error: None,
        }
    }

    pub fn failure(query_id: usize, error: impl Into<String>) -> Self {
        Self {
            query_id,
            status: SampleStatus::Failed,
            latencies: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SampleStatus::Success
    }

    /// Latency in seconds measured for `backend`.
    ///
    /// `None` for failed samples and for backends that were skipped or
    /// failed during this call.
    pub fn latency(&self, backend: &str) -> Option<f64> {
        self.latencies.as_ref().and_then(|m| m.measured(backend))
    }
}
