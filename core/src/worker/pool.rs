//! Fixed-size pool of workers for a single run

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::{BenchError, BenchResult};
use crate::orchestrator::ResultAggregator;
use crate::request::RequestSpec;
use crate::traits::RequestExecutor;

use super::builder::WorkerBuilder;
use super::stats::WorkerStats;

/// Dispatches a fixed number of requests over a fixed number of workers
///
/// Every worker is its own tokio task, so on the multi-threaded runtime all
/// of them wait on the network independently. Units of work are claimed
/// from a counter that is fresh for each call to [`run`](Self::run).
pub struct WorkerPool {
    executor: Arc<dyn RequestExecutor>,
}

impl WorkerPool {
    /// Create a pool that sends requests through `executor`
    pub fn new(executor: Arc<dyn RequestExecutor>) -> Self {
        Self { executor }
    }

    /// Execute exactly `total_requests` requests over `worker_count` workers
    ///
    /// Blocks until every worker has exited and every outcome is in `sink`.
    /// Workers beyond `total_requests` find nothing to claim and return
    /// immediately. Per-worker stats are returned in worker-id order.
    pub async fn run(
        &self,
        total_requests: usize,
        worker_count: usize,
        spec: Arc<RequestSpec>,
        sink: Arc<ResultAggregator>,
    ) -> BenchResult<Vec<WorkerStats>> {
        if worker_count == 0 {
            return Err(crate::config::ConfigError::InvalidWorkerCount.into());
        }

        let request_counter = Arc::new(AtomicUsize::new(0));
        let mut handles = Vec::with_capacity(worker_count);

        for worker_id in 0..worker_count {
            let worker = WorkerBuilder::new(worker_id)
                .executor(Arc::clone(&self.executor))
                .spec(Arc::clone(&spec))
                .sink(Arc::clone(&sink))
                .request_counter(Arc::clone(&request_counter), total_requests)
                .build()?;

            handles.push(tokio::spawn(worker.run()));
        }

        // Wait for all workers to complete
        let mut results = Vec::with_capacity(handles.len());
        let mut worker_failures = 0;
        for (idx, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok(stats) => results.push(stats),
                Err(e) => {
                    worker_failures += 1;
                    tracing::error!(worker_id = idx, error = %e, "Worker task panicked");
                }
            }
        }

        if worker_failures > 0 {
            return Err(BenchError::worker(format!(
                "{} of {} workers failed to complete",
                worker_failures, worker_count
            )));
        }

        let dispatched = request_counter.load(Ordering::Acquire);
        if dispatched != total_requests {
            return Err(BenchError::orchestration(format!(
                "dispatched {} of {} requests",
                dispatched, total_requests
            )));
        }

        Ok(results)
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("executor", &self.executor.name())
            .finish()
    }
}
