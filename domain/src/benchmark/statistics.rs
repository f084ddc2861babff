//! Latency and throughput statistics.
//!
//! All aggregates are computed from sorted copies of the input, so the
//! results do not depend on the order in which samples completed.

use super::sample::BenchmarkSample;
use crate::retrieval::backend::{BackendDescriptor, BackendKind};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Latency summary for one backend, in milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    pub mean_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    /// Number of measurements the summary was built from
    pub count: usize,
}

impl LatencyStats {
    /// Summarize latencies given in seconds.
    ///
    /// An empty input yields the all-zero record.
    pub fn from_seconds(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let mut sorted: Vec<f64> = values.iter().map(|s| s * 1000.0).collect();
        sorted.sort_by(f64::total_cmp);

        let sum: f64 = sorted.iter().sum();
        Self {
            mean_ms: sum / sorted.len() as f64,
            p95_ms: percentile(&sorted, 0.95),
            p99_ms: percentile(&sorted, 0.99),
            min_ms: sorted[0],
            max_ms: sorted[sorted.len() - 1],
            count: sorted.len(),
        }
    }
}

/// Percentile of an ascending-sorted slice, interpolating linearly between
/// the two closest ranks. `quantile` is clamped to `0.0..=1.0`.
pub fn percentile(sorted: &[f64], quantile: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (sorted.len() - 1) as f64 * quantile.clamp(0.0, 1.0);
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// Relative p95 cost of `target` over `baseline`, in percent.
///
/// Defined as 0 when the baseline p95 is 0.
pub fn overhead_percent(target_p95: f64, baseline_p95: f64) -> f64 {
    if baseline_p95 > 0.0 {
        (target_p95 - baseline_p95) / baseline_p95 * 100.0
    } else {
        0.0
    }
}

/// Successful queries per second over `duration`; 0 for a zero duration.
pub fn throughput(successful: usize, duration: Duration) -> f64 {
    let secs = duration.as_secs_f64();
    if secs > 0.0 {
        successful as f64 / secs
    } else {
        0.0
    }
}

/// Latency summary for one named backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendStatistics {
    pub name: String,
    pub kind: BackendKind,
    pub latency: LatencyStats,
}

/// Aggregates over the timed phase of a benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkStatistics {
    /// One entry per configured backend, in configured order
    pub backends: Vec<BackendStatistics>,
    pub successful: usize,
    pub failed: usize,
    pub duration_secs: f64,
    pub throughput_qps: f64,
    /// Backend whose p95 the overhead is measured against
    pub baseline: String,
    /// Backend whose p95 overhead is reported
    pub target: String,
    pub overhead_pct: f64,
}

impl BenchmarkStatistics {
    /// Compute statistics from the timed-phase samples.
    ///
    /// Failed samples are counted but contribute no latencies. Neither do
    /// a backend's unmeasured placeholders.
    pub fn compute(
        samples: &[BenchmarkSample],
        backends: &[BackendDescriptor],
        duration: Duration,
        baseline: &str,
        target: &str,
    ) -> Self {
        let successful = samples.iter().filter(|s| s.is_success()).count();
        let failed = samples.len() - successful;

        let backend_stats: Vec<BackendStatistics> = backends
            .iter()
            .map(|backend| {
                let values: Vec<f64> = samples
                    .iter()
                    .filter_map(|s| s.latency(&backend.name))
                    .collect();
                BackendStatistics {
                    name: backend.name.clone(),
                    kind: backend.kind,
                    latency: LatencyStats::from_seconds(&values),
                }
            })
            .collect();

        let p95_of = |name: &str| {
            backend_stats
                .iter()
                .find(|b| b.name == name)
                .map(|b| b.latency.p95_ms)
                .unwrap_or(0.0)
        };
        let overhead_pct = overhead_percent(p95_of(target), p95_of(baseline));

        Self {
            backends: backend_stats,
            successful,
            failed,
            duration_secs: duration.as_secs_f64(),
            throughput_qps: throughput(successful, duration),
            baseline: baseline.to_string(),
            target: target.to_string(),
            overhead_pct,
        }
    }

    pub fn backend(&self, name: &str) -> Option<&BackendStatistics> {
        self.backends.iter().find(|b| b.name == name)
    }

    pub fn by_kind(&self, kind: BackendKind) -> Option<&BackendStatistics> {
        self.backends.iter().find(|b| b.kind == kind)
    }

    /// One value per [`BackendKind::chart_order`] entry; 0 for absent kinds.
    pub fn chart_series(&self, metric: impl Fn(&LatencyStats) -> f64) -> Vec<f64> {
        BackendKind::chart_order()
            .iter()
            .map(|kind| self.by_kind(*kind).map(|b| metric(&b.latency)).unwrap_or(0.0))
            .collect()
    }
}
