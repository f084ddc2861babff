//! Console output formatter

use colored::Colorize;
use serde::Serialize;
use std::fmt::Display;
use vault_application::ChatResponse;
use vault_domain::{BenchmarkReport, RetrievalMetrics};

/// Formats chat responses and benchmark reports for the terminal
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Reply text followed by a one-line latency footer
    pub fn format_response(response: &ChatResponse) -> String {
        let mut output = String::new();
        if response.is_error() {
            output.push_str(&response.response.red().to_string());
        } else {
            output.push_str(&response.response);
        }
        output.push('\n');

        if !response.metrics.is_empty() {
            output.push_str(&format!(
                "\n{} {}\n",
                "Latency:".dimmed(),
                Self::format_metrics(&response.metrics).dimmed()
            ));
        }
        output
    }

    /// `name 1.23 ms | name 4.56 ms`, in recorded order
    pub fn format_metrics(metrics: &RetrievalMetrics) -> String {
        metrics
            .iter()
            .map(|(name, seconds)| format!("{} {:.2} ms", name, seconds * 1000.0))
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Pretty JSON
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Summary block and per-backend latency table
    pub fn format_report(report: &BenchmarkReport) -> String {
        let summary = report.summary();
        let stats = &report.statistics;
        let mut output = String::new();

        output.push_str(&Self::header("Benchmark Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {} ok, {} failed, concurrency {}, {} warmup, {:.2} s\n",
            "Samples:".cyan().bold(),
            report.sample_count(),
            stats.failed,
            report.concurrency,
            report.warmup_queries,
            stats.duration_secs
        ));
        output.push_str(&format!(
            "{} {:.1} QPS\n",
            "Throughput:".cyan().bold(),
            summary.throughput_qps
        ));
        output.push_str(&format!(
            "{} avg {:.1} ms, p99 {:.1} ms\n",
            format!("Primary ({}):", report.primary).cyan().bold(),
            summary.primary_mean_ms,
            summary.primary_p99_ms
        ));

        let overhead = format!("{:+.1}%", summary.overhead_pct);
        let overhead = if summary.overhead_pct > 0.0 {
            overhead.yellow()
        } else {
            overhead.green()
        };
        output.push_str(&format!(
            "{} {} ({} vs {}, p95)\n",
            "Overhead:".cyan().bold(),
            overhead,
            stats.target,
            stats.baseline
        ));

        output.push_str(&Self::section_header("Latency by backend (ms)"));
        output.push_str(&format!(
            "{:<10} {:<12} {:>6} {:>9} {:>9} {:>9} {:>9} {:>9}\n",
            "backend", "kind", "n", "mean", "p95", "p99", "min", "max"
        ));
        for backend in &stats.backends {
            let l = &backend.latency;
            output.push_str(&format!(
                "{:<10} {:<12} {:>6} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2}\n",
                backend.name,
                backend.kind.as_str(),
                l.count,
                l.mean_ms,
                l.p95_ms,
                l.p99_ms,
                l.min_ms,
                l.max_ms
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Bulleted list of configuration problems
    pub fn format_issues<I: Display>(issues: &[I]) -> String {
        let mut output = format!("{}\n", "Configuration problems:".yellow().bold());
        for issue in issues {
            output.push_str(&format!("  {} {}\n", "*".yellow(), issue));
        }
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
