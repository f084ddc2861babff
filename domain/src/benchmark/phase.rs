//! Benchmark phases

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strictly ordered phases of a benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BenchmarkPhase {
    /// Load the corpus and check the backends
    Setup,
    /// Untimed queries that absorb cold-start cost
    Warmup,
    /// Concurrent, timed queries
    Timed,
    /// Statistics and report rendering
    Report,
}

impl BenchmarkPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            BenchmarkPhase::Setup => "setup",
            BenchmarkPhase::Warmup => "warmup",
            BenchmarkPhase::Timed => "timed",
            BenchmarkPhase::Report => "report",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BenchmarkPhase::Setup => "Phase 1: Setup",
            BenchmarkPhase::Warmup => "Phase 2: Warmup",
            BenchmarkPhase::Timed => "Phase 3: Stress Test",
            BenchmarkPhase::Report => "Phase 4: Report",
        }
    }
}

impl fmt::Display for BenchmarkPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
