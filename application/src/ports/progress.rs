//! Progress notification port
//!
//! Defines the interface for reporting progress during a benchmark run.

use vault_domain::{BenchmarkPhase, BenchmarkSample};

/// Callback for progress updates during a benchmark run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain text, ...).
pub trait BenchmarkProgress: Send + Sync {
    /// Called when a phase starts; `total_tasks` is 0 when unknown
    fn on_phase_start(&self, phase: BenchmarkPhase, total_tasks: usize);

    /// Called for every timed sample, in completion order
    fn on_sample_complete(&self, _sample: &BenchmarkSample) {}

    /// Called every `progress_interval` completions during the timed phase
    fn on_progress(&self, _completed: usize, _total: usize) {}

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: BenchmarkPhase);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl BenchmarkProgress for NoProgress {
    fn on_phase_start(&self, _phase: BenchmarkPhase, _total_tasks: usize) {}
    fn on_phase_complete(&self, _phase: BenchmarkPhase) {}
}
