//! Orchestrator execution logic

use std::sync::Arc;
use std::time::Instant;

use crate::config::SessionConfig;
use crate::error::BenchResult;
use crate::metrics::{RunSummary, SessionResult, SessionTotals};
use crate::request::RequestSpec;
use crate::traits::RequestExecutor;
use crate::worker::{WorkerPool, WorkerStats};

use super::aggregator::ResultAggregator;

/// Orchestrator manages the session lifecycle
///
/// Runs the configured number of repeats one after another, each with a
/// fresh aggregator and a full worker pool, then combines the runs.
pub struct Orchestrator {
    /// Session configuration
    pub(crate) config: SessionConfig,

    /// Request spec shared by all workers of all runs
    pub(crate) spec: Arc<RequestSpec>,

    /// Worker pool (re-used by every run)
    pub(crate) pool: WorkerPool,

    /// Executor name, kept for Debug output
    pub(crate) executor_name: String,
}

impl Orchestrator {
    /// Create a new orchestrator
    ///
    /// Use `OrchestratorBuilder` for a more ergonomic construction. The
    /// configuration is validated again when the session starts.
    pub fn new(config: SessionConfig, executor: Arc<dyn RequestExecutor>) -> Self {
        let spec = Arc::new(config.request.clone());
        let executor_name = executor.name().to_string();

        Self {
            config,
            spec,
            pool: WorkerPool::new(executor),
            executor_name,
        }
    }

    /// Get the session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Run every repeat and combine the results
    ///
    /// Configuration errors are returned before any request is sent.
    /// Request failures never make this fail; they are counted.
    pub async fn run_session(&self) -> BenchResult<SessionResult> {
        self.config.validate()?;

        let started_at = chrono::Utc::now();
        tracing::info!(
            url = %self.spec.url,
            method = %self.spec.method,
            total_requests = self.config.total_requests,
            worker_count = self.config.worker_count,
            repeat_count = self.config.repeat_count,
            timeout_secs = self.spec.timeout.as_secs_f64(),
            "Starting session"
        );

        let mut runs = Vec::with_capacity(self.config.repeat_count);
        for run_index in 1..=self.config.repeat_count {
            runs.push(self.run_once(run_index).await?);
        }

        let totals = SessionTotals::from_runs(&runs);
        tracing::info!(
            total_requests = totals.total_requests,
            succeeded = totals.aggregate.succeeded,
            failed = totals.aggregate.failed,
            duration_secs = totals.duration_secs,
            rps = totals.requests_per_second,
            "Session completed"
        );

        Ok(SessionResult {
            config: self.config.clone(),
            started_at,
            runs,
            totals,
        })
    }

    /// Run a single repeat with a fresh aggregator
    pub async fn run_once(&self, run_index: usize) -> BenchResult<RunSummary> {
        let sink = Arc::new(ResultAggregator::new());

        tracing::debug!(run_index, "Starting run");
        let start = Instant::now();
        let worker_stats = self
            .pool
            .run(
                self.config.total_requests,
                self.config.worker_count,
                Arc::clone(&self.spec),
                Arc::clone(&sink),
            )
            .await?;
        let elapsed = start.elapsed();

        log_distribution(run_index, &worker_stats);

        // Every worker has been joined, so no other reference can still write.
        let aggregate = match Arc::try_unwrap(sink) {
            Ok(aggregator) => aggregator.into_aggregate(),
            Err(shared) => shared.snapshot(),
        };

        let summary = RunSummary::new(run_index, aggregate, elapsed, self.config.total_requests);
        tracing::info!(
            run_index,
            elapsed_secs = summary.duration_secs,
            succeeded = summary.aggregate.succeeded,
            failed = summary.aggregate.failed,
            rps = summary.requests_per_second,
            "Run completed"
        );

        Ok(summary)
    }
}

fn log_distribution(run_index: usize, stats: &[WorkerStats]) {
    let busiest = stats.iter().map(WorkerStats::total_requests).max().unwrap_or(0);
    let idle = stats.iter().filter(|s| s.total_requests() == 0).count();
    tracing::debug!(
        run_index,
        workers = stats.len(),
        busiest_worker_requests = busiest,
        idle_workers = idle,
        "Work distribution"
    );
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("config", &self.config)
            .field("executor", &self.executor_name)
            .finish()
    }
}
