//! Benchmark domain.
//!
//! - [`sample::BenchmarkSample`]: outcome of one timed query
//! - [`statistics::LatencyStats`] / [`statistics::BenchmarkStatistics`]: aggregates
//! - [`report::BenchmarkReport`]: statistics plus run metadata
//! - [`phase::BenchmarkPhase`]: setup / warmup / timed / report

pub mod phase;
pub mod report;
pub mod sample;
pub mod statistics;
