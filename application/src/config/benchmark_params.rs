//! Benchmark parameters: harness control.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use vault_domain::{ENCRYPTED_BACKEND, IN_MEMORY_BACKEND};

/// Parameters of one benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkParams {
    /// Number of concurrent workers in the timed phase.
    pub concurrency: usize,
    /// Untimed queries run before the timer starts.
    pub warmup_queries: usize,
    /// Upper bound on timed queries (capped by corpus size).
    pub sample_size: usize,
    /// Emit a progress update every N completed samples.
    pub progress_interval: usize,
    /// Optional per-query deadline; an expired query becomes a failed sample.
    pub query_timeout: Option<Duration>,
    /// Backend the overhead is measured against.
    pub baseline: String,
    /// Backend whose overhead is reported.
    pub target: String,
}

impl Default for BenchmarkParams {
    fn default() -> Self {
        Self {
            concurrency: 5,
            warmup_queries: 20,
            sample_size: 500,
            progress_interval: 50,
            query_timeout: None,
            baseline: IN_MEMORY_BACKEND.to_string(),
            target: ENCRYPTED_BACKEND.to_string(),
        }
    }
}

impl BenchmarkParams {
    // ==================== Builder Methods ====================

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_warmup_queries(mut self, warmup: usize) -> Self {
        self.warmup_queries = warmup;
        self
    }

    pub fn with_sample_size(mut self, size: usize) -> Self {
        self.sample_size = size;
        self
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_query_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn with_overhead_pair(
        mut self,
        baseline: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        self.baseline = baseline.into();
        self.target = target.into();
        self
    }
}
