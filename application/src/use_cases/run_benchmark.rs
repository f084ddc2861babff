//! Run Benchmark use case.
//!
//! Drives the [`RetrievalOrchestrator`] under load in four ordered phases:
//!
//! 1. **Setup** - sample queries from the corpus, check the primary backend
//! 2. **Warmup** - run the first slice of queries sequentially, untimed
//! 3. **Stress Test** - a fixed pool of workers drains the remaining queries
//! 4. **Report** - aggregate the timed samples into [`BenchmarkStatistics`]
//!
//! Samples are collected in completion order. Everything computed from them
//! is order-independent.

use crate::config::BenchmarkParams;
use crate::ports::corpus::{CorpusError, CorpusSource};
use crate::ports::progress::BenchmarkProgress;
use crate::use_cases::retrieve::RetrievalOrchestrator;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use vault_domain::util::truncate_str;
use vault_domain::{BenchmarkPhase, BenchmarkReport, BenchmarkSample, BenchmarkStatistics};

/// Errors that abort a benchmark run before any timing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BenchmarkError {
    #[error("Setup failed: {0}")]
    Setup(String),

    #[error("Setup failed: {0}")]
    Corpus(#[from] CorpusError),
}

/// Output of a completed run
#[derive(Debug, Clone)]
pub struct BenchmarkRun {
    pub report: BenchmarkReport,
    /// Timed-phase samples in completion order
    pub samples: Vec<BenchmarkSample>,
}

type QueryQueue = Arc<Mutex<VecDeque<(usize, String)>>>;

/// Use case for running a retrieval benchmark
pub struct RunBenchmarkUseCase {
    orchestrator: Arc<RetrievalOrchestrator>,
    corpus: Arc<dyn CorpusSource>,
}

impl RunBenchmarkUseCase {
    pub fn new(orchestrator: Arc<RetrievalOrchestrator>, corpus: Arc<dyn CorpusSource>) -> Self {
        Self {
            orchestrator,
            corpus,
        }
    }

    pub async fn execute(
        &self,
        params: &BenchmarkParams,
        progress: &dyn BenchmarkProgress,
    ) -> Result<BenchmarkRun, BenchmarkError> {
        // ==================== Phase 1: Setup ====================
        info!("{}", BenchmarkPhase::Setup.display_name());
        progress.on_phase_start(BenchmarkPhase::Setup, 0);

        if params.concurrency == 0 {
            return Err(BenchmarkError::Setup(
                "concurrency must be at least 1".to_string(),
            ));
        }
        let primary = self.orchestrator.primary();
        if !primary.is_available() {
            return Err(BenchmarkError::Setup(format!(
                "primary backend '{}' is unavailable",
                primary.name()
            )));
        }

        let mut queries = self
            .corpus
            .sample_queries(params.sample_size + params.warmup_queries)?;
        if queries.is_empty() {
            return Err(BenchmarkError::Setup("corpus has no records".to_string()));
        }
        let warmup_count = params.warmup_queries.min(queries.len());
        let timed = queries.split_off(warmup_count);
        let warmup = queries;

        info!(
            "Sampled {} warmup and {} timed queries",
            warmup.len(),
            timed.len()
        );
        progress.on_phase_complete(BenchmarkPhase::Setup);

        // ==================== Phase 2: Warmup ====================
        self.warm_up(&warmup, progress).await;

        // ==================== Phase 3: Stress Test ====================
        let (samples, duration) = self.stress(timed, params, progress).await;

        // ==================== Phase 4: Report ====================
        info!("{}", BenchmarkPhase::Report.display_name());
        progress.on_phase_start(BenchmarkPhase::Report, 0);
        let statistics = BenchmarkStatistics::compute(
            &samples,
            &self.orchestrator.descriptors(),
            duration,
            &params.baseline,
            &params.target,
        );
        info!(
            "{} successful, {} failed, {:.1} QPS, overhead {:.1}%",
            statistics.successful,
            statistics.failed,
            statistics.throughput_qps,
            statistics.overhead_pct
        );
        let report = BenchmarkReport::new(
            params.concurrency,
            warmup.len(),
            self.orchestrator.primary_name(),
            statistics,
        );
        progress.on_phase_complete(BenchmarkPhase::Report);

        Ok(BenchmarkRun { report, samples })
    }

    async fn warm_up(&self, queries: &[String], progress: &dyn BenchmarkProgress) {
        info!(
            "{}: {} queries",
            BenchmarkPhase::Warmup.display_name(),
            queries.len()
        );
        progress.on_phase_start(BenchmarkPhase::Warmup, queries.len());
        for query in queries {
            if let Err(e) = self.orchestrator.retrieve(query).await {
                debug!("Warmup query failed (ignored): {}", e);
            }
        }
        progress.on_phase_complete(BenchmarkPhase::Warmup);
    }

    async fn stress(
        &self,
        queries: Vec<String>,
        params: &BenchmarkParams,
        progress: &dyn BenchmarkProgress,
    ) -> (Vec<BenchmarkSample>, Duration) {
        let total = queries.len();
        let workers = params.concurrency.min(total.max(1));
        info!(
            "{}: {} queries across {} workers",
            BenchmarkPhase::Timed.display_name(),
            total,
            workers
        );
        progress.on_phase_start(BenchmarkPhase::Timed, total);

        let queue: QueryQueue = Arc::new(Mutex::new(queries.into_iter().enumerate().collect()));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let start = Instant::now();
        let mut join_set = JoinSet::new();
        for _ in 0..workers {
            let queue = Arc::clone(&queue);
            let orchestrator = Arc::clone(&self.orchestrator);
            let tx = tx.clone();
            let timeout = params.query_timeout;
            join_set.spawn(async move {
                while let Some((id, query)) = next_query(&queue) {
                    let sample = run_one(&orchestrator, id, &query, timeout).await;
                    if tx.send(sample).is_err() {
                        break;
                    }
                }
            });
        }
        drop(tx);

        let interval = params.progress_interval.max(1);
        let mut samples = Vec::with_capacity(total);
        while let Some(sample) = rx.recv().await {
            progress.on_sample_complete(&sample);
            samples.push(sample);
            if samples.len() % interval == 0 {
                info!("Processed {}/{} queries...", samples.len(), total);
                progress.on_progress(samples.len(), total);
            }
        }
        let duration = start.elapsed();

        while let Some(result) = join_set.join_next().await {
            if let Err(e) = result {
                warn!("Benchmark worker failed: {}", e);
            }
        }

        info!("Stress test complete in {:.2}s", duration.as_secs_f64());
        progress.on_phase_complete(BenchmarkPhase::Timed);
        (samples, duration)
    }
}

fn next_query(queue: &QueryQueue) -> Option<(usize, String)> {
    // a poisoned queue still holds valid entries
    let mut guard = queue.lock().unwrap_or_else(|e| e.into_inner());
    guard.pop_front()
}

async fn run_one(
    orchestrator: &RetrievalOrchestrator,
    id: usize,
    query: &str,
    timeout: Option<Duration>,
) -> BenchmarkSample {
    let result = match timeout {
        Some(limit) => match tokio::time::timeout(limit, orchestrator.retrieve(query)).await {
            Ok(result) => result.map_err(|e| e.to_string()),
            Err(_) => Err(format!("timed out after {}ms", limit.as_millis())),
        },
        None => orchestrator.retrieve(query).await.map_err(|e| e.to_string()),
    };

    match result {
        Ok(outcome) => BenchmarkSample::success(id, outcome.metrics),
        Err(e) => {
            debug!("Query {} failed ({}): {}", id, truncate_str(query, 40), e);
            BenchmarkSample::failure(id, e)
        }
    }
}
