//! Worker execution loop

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::orchestrator::ResultAggregator;
use crate::request::RequestSpec;
use crate::traits::RequestExecutor;

use super::stats::WorkerStats;

/// Worker executes requests in a loop: claim -> execute -> record -> repeat
///
/// Workers are tokio tasks spawned by the [`WorkerPool`](super::WorkerPool).
/// They share the executor, the request spec, the aggregator and the
/// request counter via Arc.
pub struct Worker {
    /// Unique worker identifier within a run
    id: usize,

    /// Executor (shared across workers via Arc)
    executor: Arc<dyn RequestExecutor>,

    /// Request every unit of work sends
    spec: Arc<RequestSpec>,

    /// Run aggregate every outcome is recorded into
    sink: Arc<ResultAggregator>,

    /// Shared counter of claimed units
    request_counter: Arc<AtomicUsize>,

    /// Units available in this run
    total_requests: usize,
}

impl Worker {
    /// Create a new worker
    ///
    /// Use [`WorkerBuilder`](super::WorkerBuilder) for a more ergonomic construction.
    pub fn new(
        id: usize,
        executor: Arc<dyn RequestExecutor>,
        spec: Arc<RequestSpec>,
        sink: Arc<ResultAggregator>,
        request_counter: Arc<AtomicUsize>,
        total_requests: usize,
    ) -> Self {
        Self {
            id,
            executor,
            spec,
            sink,
            request_counter,
            total_requests,
        }
    }

    /// Run the worker loop until no unit of work is left
    pub async fn run(self) -> WorkerStats {
        let mut stats = WorkerStats::new(self.id);
        stats.start();

        tracing::debug!(worker_id = self.id, "Worker started");

        while self.try_claim_request() {
            let outcome = self.executor.execute(&self.spec).await;

            if let Some(kind) = outcome.error_kind() {
                tracing::debug!(
                    worker_id = self.id,
                    error_kind = %kind,
                    elapsed_ms = outcome.elapsed().as_millis() as u64,
                    "Request failed"
                );
            }

            stats.record(&outcome);
            self.sink.record(&outcome);
        }

        stats.stop();
        tracing::debug!(
            worker_id = self.id,
            succeeded = stats.succeeded,
            failed = stats.failed,
            elapsed_ms = ?stats.elapsed().map(|d| d.as_millis()),
            "Worker finished"
        );

        stats
    }

    /// Try to claim a unit of work from the shared counter
    ///
    /// The counter never moves past `total_requests`, so every index below it
    /// is handed out exactly once across all workers.
    fn try_claim_request(&self) -> bool {
        let total = self.total_requests;
        self.request_counter
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |claimed| {
                (claimed < total).then_some(claimed + 1)
            })
            .is_ok()
    }

    /// Get the worker ID
    pub fn id(&self) -> usize {
        self.id
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("id", &self.id)
            .field("executor", &self.executor.name())
            .field("url", &self.spec.url.as_str())
            .field("total_requests", &self.total_requests)
            .finish()
    }
}
