//! Benchmark report

use super::statistics::BenchmarkStatistics;
use crate::retrieval::backend::BackendKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statistics of a completed benchmark run together with its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub generated_at: DateTime<Utc>,
    pub concurrency: usize,
    pub warmup_queries: usize,
    /// Backend whose results are used for context (headline latency cards)
    pub primary: String,
    pub statistics: BenchmarkStatistics,
}

/// The four headline numbers shown at the top of a report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryMetrics {
    pub throughput_qps: f64,
    pub primary_mean_ms: f64,
    pub primary_p99_ms: f64,
    pub overhead_pct: f64,
}

/// Chart datasets in [`BackendKind::chart_order`]
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub labels: Vec<&'static str>,
    pub mean_ms: Vec<f64>,
    pub p95_ms: Vec<f64>,
    pub max_ms: Vec<f64>,
}

impl BenchmarkReport {
    pub fn new(
        concurrency: usize,
        warmup_queries: usize,
        primary: impl Into<String>,
        statistics: BenchmarkStatistics,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            concurrency,
            warmup_queries,
            primary: primary.into(),
            statistics,
        }
    }

    /// Number of successful timed samples (warmup is never included)
    pub fn sample_count(&self) -> usize {
        self.statistics.successful
    }

    pub fn summary(&self) -> SummaryMetrics {
        let primary = self
            .statistics
            .backend(&self.primary)
            .map(|b| b.latency)
            .unwrap_or_default();
        SummaryMetrics {
            throughput_qps: self.statistics.throughput_qps,
            primary_mean_ms: primary.mean_ms,
            primary_p99_ms: primary.p99_ms,
            overhead_pct: self.statistics.overhead_pct,
        }
    }

    pub fn chart_data(&self) -> ChartData {
        ChartData {
            labels: BackendKind::chart_order()
                .iter()
                .map(|k| k.display_label())
                .collect(),
            mean_ms: self.statistics.chart_series(|l| l.mean_ms),
            p95_ms: self.statistics.chart_series(|l| l.p95_ms),
            max_ms: self.statistics.chart_series(|l| l.max_ms),
        }
    }
}
