//! Self-contained HTML dashboard for a benchmark report
//!
//! The page pulls Chart.js from a CDN; all data is embedded inline, so
//! the file can be opened directly from disk.

use std::fs;
use std::io;
use std::path::Path;
use vault_domain::BenchmarkReport;

const STYLE: &str = r#"
    body { font-family: 'Segoe UI', sans-serif; background: #f4f7f6; padding: 20px; }
    .container { max-width: 1000px; margin: 0 auto; background: white; padding: 40px; border-radius: 15px; box-shadow: 0 10px 25px rgba(0,0,0,0.05); }
    h1 { color: #2c3e50; border-bottom: 2px solid #eee; padding-bottom: 10px; }
    .summary-grid { display: grid; grid-template-columns: repeat(4, 1fr); gap: 20px; margin-bottom: 40px; }
    .card { background: #f8f9fa; padding: 20px; border-radius: 10px; text-align: center; }
    .card h3 { margin: 0; color: #7f8c8d; font-size: 0.9rem; text-transform: uppercase; }
    .card .val { font-size: 2rem; font-weight: bold; color: #2c3e50; margin-top: 10px; }
    .card .unit { font-size: 1rem; }
    .chart-container { position: relative; height: 300px; width: 100%; margin-bottom: 50px; }
    .footer { margin-top: 50px; font-size: 0.8rem; color: #bdc3c7; text-align: center; }
    .badge-good { color: #27ae60; }
    .badge-warn { color: #e67e22; }
"#;

/// Renders [`BenchmarkReport`]s as HTML dashboards
pub struct HtmlDashboard;

impl HtmlDashboard {
    /// Render the full dashboard document
    pub fn render(report: &BenchmarkReport) -> String {
        let summary = report.summary();
        let chart = report.chart_data();
        let primary = escape_html(&report.primary);

        let overhead_class = if summary.overhead_pct > 0.0 {
            "badge-warn"
        } else {
            "badge-good"
        };

        let mut failed_note = String::new();
        if report.statistics.failed > 0 {
            failed_note = format!(
                " | <strong>Failed:</strong> {}",
                report.statistics.failed
            );
        }

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>vault-rag Performance Audit</title>
<script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
<style>{style}</style>
</head>
<body>
<div class="container">
  <h1>vault-rag Performance Audit</h1>
  <p><strong>Date:</strong> {date} | <strong>Samples:</strong> {samples}{failed_note} | <strong>Concurrency:</strong> {concurrency} Users | <strong>Duration:</strong> {duration:.2} s</p>

  <div class="summary-grid">
    <div class="card">
      <h3>Throughput</h3>
      <div class="val">{qps:.1} <span class="unit">QPS</span></div>
    </div>
    <div class="card">
      <h3>Avg Latency ({primary})</h3>
      <div class="val">{mean:.1} <span class="unit">ms</span></div>
    </div>
    <div class="card">
      <h3>P99 Latency ({primary})</h3>
      <div class="val">{p99:.1} <span class="unit">ms</span></div>
    </div>
    <div class="card">
      <h3>Privacy Overhead</h3>
      <div class="val {overhead_class}">{overhead:+.1}%</div>
    </div>
  </div>

  <h2>1. Latency Distribution (Lower is Better)</h2>
  <p>Average and P95 (tail) latency across storage engines.</p>
  <div class="chart-container">
    <canvas id="barChart"></canvas>
  </div>

  <h2>2. Stability Analysis</h2>
  <p>Worst observed latency per engine. Lower spikes mean more stable performance.</p>
  <div class="chart-container">
    <canvas id="stabilityChart"></canvas>
  </div>

  <div class="footer">Overhead compares the P95 latency of {target} against {baseline}.</div>
</div>
<script>
  const labels = {labels};
  const avgData = {avg_data};
  const p95Data = {p95_data};
  const maxData = {max_data};

  new Chart(document.getElementById('barChart'), {{
    type: 'bar',
    data: {{
      labels: labels,
      datasets: [
        {{ label: 'Avg Latency (ms)', data: avgData, backgroundColor: '#3498db' }},
        {{ label: 'P95 Latency (ms)', data: p95Data, backgroundColor: '#2c3e50' }}
      ]
    }},
    options: {{ responsive: true, maintainAspectRatio: false }}
  }});

  new Chart(document.getElementById('stabilityChart'), {{
    type: 'line',
    data: {{
      labels: labels,
      datasets: [{{
        label: 'Max Latency Spike (ms)',
        data: maxData,
        borderColor: '#e74c3c',
        backgroundColor: 'rgba(231, 76, 60, 0.1)',
        fill: true,
        tension: 0.4
      }}]
    }},
    options: {{ responsive: true, maintainAspectRatio: false }}
  }});
</script>
</body>
</html>
"#,
            style = STYLE,
            date = report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            samples = report.sample_count(),
            failed_note = failed_note,
            concurrency = report.concurrency,
            duration = report.statistics.duration_secs,
            qps = summary.throughput_qps,
            primary = primary,
            mean = summary.primary_mean_ms,
            p99 = summary.primary_p99_ms,
            overhead_class = overhead_class,
            overhead = summary.overhead_pct,
            target = escape_html(&report.statistics.target),
            baseline = escape_html(&report.statistics.baseline),
            labels = js_array(&chart.labels),
            avg_data = js_numbers(&chart.mean_ms),
            p95_data = js_numbers(&chart.p95_ms),
            max_data = js_numbers(&chart.max_ms),
        )
    }

    /// Render and write the dashboard, creating parent directories
    pub fn write(report: &BenchmarkReport, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, Self::render(report))
    }
}

fn js_array(labels: &[&str]) -> String {
    serde_json::to_string(labels).unwrap_or_else(|_| "[]".to_string())
}

/// Numbers rounded to two decimals, as a JS array literal
fn js_numbers(values: &[f64]) -> String {
    let parts: Vec<String> = values
        .iter()
        .map(|v| {
            if v.is_finite() {
                format!("{:.2}", v)
            } else {
                "0.00".to_string()
            }
        })
        .collect();
    format!("[{}]", parts.join(", "))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
