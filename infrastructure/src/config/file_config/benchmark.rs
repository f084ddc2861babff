//! Benchmark configuration from TOML (`[benchmark]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;
use vault_application::BenchmarkParams;
use vault_domain::{ENCRYPTED_BACKEND, IN_MEMORY_BACKEND};

/// Raw benchmark configuration from TOML
///
/// # Example
///
/// ```toml
/// [benchmark]
/// concurrency = 5
/// warmup_queries = 20
/// sample_size = 500
/// query_timeout_seconds = 10
/// report_path = "benchmark_dashboard.html"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBenchmarkConfig {
    pub concurrency: usize,
    pub warmup_queries: usize,
    pub sample_size: usize,
    pub progress_interval: usize,
    /// Per-query deadline; unset means no deadline
    pub query_timeout_seconds: Option<u64>,
    pub report_path: String,
    pub baseline: String,
    pub target: String,
}

impl Default for FileBenchmarkConfig {
    fn default() -> Self {
        Self {
            concurrency: 5,
            warmup_queries: 20,
            sample_size: 500,
            progress_interval: 50,
            query_timeout_seconds: None,
            report_path: "benchmark_dashboard.html".to_string(),
            baseline: IN_MEMORY_BACKEND.to_string(),
            target: ENCRYPTED_BACKEND.to_string(),
        }
    }
}

impl FileBenchmarkConfig {
    pub fn to_params(&self) -> BenchmarkParams {
        BenchmarkParams::default()
            .with_concurrency(self.concurrency)
            .with_warmup_queries(self.warmup_queries)
            .with_sample_size(self.sample_size)
            .with_progress_interval(self.progress_interval)
            .with_query_timeout(self.query_timeout_seconds.map(Duration::from_secs))
            .with_overhead_pair(self.baseline.clone(), self.target.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_params_default() {
        assert_eq!(
            FileBenchmarkConfig::default().to_params(),
            BenchmarkParams::default()
        );
    }

    #[test]
    fn test_timeout_conversion() {
        let config = FileBenchmarkConfig {
            query_timeout_seconds: Some(3),
            ..Default::default()
        };
        assert_eq!(
            config.to_params().query_timeout,
            Some(Duration::from_secs(3))
        );
    }
}
