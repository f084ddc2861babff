//! Progress reporting for benchmark runs

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use vault_application::BenchmarkProgress;
use vault_domain::{BenchmarkPhase, BenchmarkSample};

/// Reports benchmark progress with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
    failed: AtomicUsize,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
            failed: AtomicUsize::new(0),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        let guard = self.phase_bar.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(pb) = guard.as_ref() {
            f(pb);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl BenchmarkProgress for ProgressReporter {
    fn on_phase_start(&self, phase: BenchmarkPhase, total_tasks: usize) {
        // Only the timed phase reports per-query completions
        let pb = if phase == BenchmarkPhase::Timed {
            self.failed.store(0, Ordering::Relaxed);
            let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
            pb.set_style(Self::bar_style());
            pb
        } else {
            let pb = self.multi.add(ProgressBar::new_spinner());
            pb.set_style(Self::spinner_style());
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        };
        pb.set_prefix(phase.display_name());
        if total_tasks > 0 {
            pb.set_message(format!("{} queries", total_tasks));
        } else {
            pb.set_message("Starting...");
        }

        *self.phase_bar.lock().unwrap_or_else(|e| e.into_inner()) = Some(pb);
    }

    fn on_sample_complete(&self, sample: &BenchmarkSample) {
        if !sample.is_success() {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
        self.with_bar(|pb| pb.inc(1));
    }

    fn on_progress(&self, completed: usize, total: usize) {
        let failed = self.failed.load(Ordering::Relaxed);
        self.with_bar(|pb| {
            if failed > 0 {
                pb.set_message(format!("{} failed", failed).red().to_string());
            } else {
                pb.set_message(format!("{}/{} ok", completed, total));
            }
        });
    }

    fn on_phase_complete(&self, phase: BenchmarkPhase) {
        let taken = self.phase_bar.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(pb) = taken {
            pb.finish_with_message(format!("{} complete!", phase.as_str().green()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl BenchmarkProgress for SimpleProgress {
    fn on_phase_start(&self, phase: BenchmarkPhase, total_tasks: usize) {
        if total_tasks > 0 {
            println!(
                "{} {} ({} queries)",
                "->".cyan(),
                phase.display_name().bold(),
                total_tasks
            );
        } else {
            println!("{} {}", "->".cyan(), phase.display_name().bold());
        }
    }

    fn on_sample_complete(&self, sample: &BenchmarkSample) {
        if let Some(error) = &sample.error {
            println!("  {} query {}: {}", "x".red(), sample.query_id, error);
        }
    }

    fn on_progress(&self, completed: usize, total: usize) {
        println!("  {} {}/{}", "v".green(), completed, total);
    }

    fn on_phase_complete(&self, _phase: BenchmarkPhase) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use vault_domain::RetrievalMetrics;

    #[test]
    fn test_reporter_tracks_timed_phase() {
        let reporter = ProgressReporter::new();
        reporter.on_phase_start(BenchmarkPhase::Timed, 3);
        reporter.on_sample_complete(&BenchmarkSample::success(0, RetrievalMetrics::new()));
        reporter.on_sample_complete(&BenchmarkSample::failure(1, "timed out"));
        reporter.on_progress(2, 3);

        assert_eq!(reporter.failed.load(Ordering::Relaxed), 1);
        {
            let guard = reporter.phase_bar.lock().unwrap();
            assert_eq!(guard.as_ref().unwrap().position(), 2);
        }

        reporter.on_phase_complete(BenchmarkPhase::Timed);
        assert!(reporter.phase_bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_events_without_phase_are_ignored() {
        let reporter = ProgressReporter::default();
        reporter.on_sample_complete(&BenchmarkSample::failure(0, "boom"));
        reporter.on_progress(1, 1);
        reporter.on_phase_complete(BenchmarkPhase::Report);
        assert!(reporter.phase_bar.lock().unwrap().is_none());
    }
}
