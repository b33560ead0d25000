//! Integration tests for the Worker module

use super::*;
use crate::metrics::StatusKey;
use crate::orchestrator::ResultAggregator;
use crate::request::RequestSpec;
use crate::response::{ErrorKind, RequestOutcome};
use crate::traits::RequestExecutor;

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Mock RequestExecutor
// ============================================================================

struct MockExecutor {
    delay: Option<Duration>,
    fail_every: Option<usize>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockExecutor {
    fn new() -> Self {
        Self {
            delay: None,
            fail_every: None,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn with_fail_every(mut self, n: usize) -> Self {
        self.fail_every = Some(n);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RequestExecutor for MockExecutor {
    fn name(&self) -> &str {
        "mock"
    }

    async fn execute(&self, _spec: &RequestSpec) -> RequestOutcome {
        let count = self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let elapsed = Duration::from_micros(100 + (count % 7) as u64 * 10);
        match self.fail_every {
            Some(n) if count % n == 0 => RequestOutcome::failure(ErrorKind::Connect, elapsed),
            _ => RequestOutcome::success(200, elapsed),
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn test_spec() -> Arc<RequestSpec> {
    Arc::new(RequestSpec::parse("http://localhost:9/").unwrap())
}

fn create_test_worker(
    id: usize,
    executor: Arc<dyn RequestExecutor>,
    counter: Arc<AtomicUsize>,
    total: usize,
) -> (Worker, Arc<ResultAggregator>) {
    let sink = Arc::new(ResultAggregator::new());
    let worker = WorkerBuilder::new(id)
        .executor(executor)
        .spec(test_spec())
        .sink(Arc::clone(&sink))
        .request_counter(counter, total)
        .build()
        .expect("Failed to build worker");
    (worker, sink)
}

// ============================================================================
// Worker tests
// ============================================================================

#[tokio::test]
async fn test_single_worker_drains_counter() {
    let executor = Arc::new(MockExecutor::new());
    let counter = Arc::new(AtomicUsize::new(0));
    let (worker, sink) = create_test_worker(0, executor.clone(), Arc::clone(&counter), 25);

    let stats = worker.run().await;

    assert_eq!(stats.total_requests(), 25);
    assert_eq!(executor.calls(), 25);
    assert_eq!(counter.load(Ordering::SeqCst), 25);
    assert_eq!(sink.snapshot().total, 25);
    assert!(stats.ended_at.is_some());
}

#[tokio::test]
async fn test_worker_with_exhausted_counter_does_nothing() {
    let executor = Arc::new(MockExecutor::new());
    let counter = Arc::new(AtomicUsize::new(10));
    let (worker, sink) = create_test_worker(3, executor.clone(), counter, 10);

    let stats = worker.run().await;

    assert_eq!(stats.worker_id, 3);
    assert_eq!(stats.total_requests(), 0);
    assert_eq!(executor.calls(), 0);
    assert_eq!(sink.snapshot().total, 0);
}

#[tokio::test]
async fn test_worker_records_failures() {
    let executor = Arc::new(MockExecutor::new().with_fail_every(2));
    let counter = Arc::new(AtomicUsize::new(0));
    let (worker, sink) = create_test_worker(0, executor, counter, 10);

    let stats = worker.run().await;
    let agg = sink.snapshot();

    assert_eq!(stats.failed, 5);
    assert_eq!(stats.succeeded, 5);
    assert_eq!(agg.status_count(StatusKey::Error), 5);
    assert_eq!(agg.status_count(StatusKey::Code(200)), 5);
    assert!(agg.is_consistent());
}

#[test]
fn test_worker_debug_format() {
    let executor: Arc<dyn RequestExecutor> = Arc::new(MockExecutor::new());
    let (worker, _) = create_test_worker(7, executor, Arc::new(AtomicUsize::new(0)), 1);
    let debug = format!("{:?}", worker);
    assert!(debug.contains("Worker"));
    assert!(debug.contains("mock"));
    assert_eq!(worker.id(), 7);
}

// ============================================================================
// Pool tests
// ============================================================================

async fn run_pool(
    executor: Arc<MockExecutor>,
    total: usize,
    workers: usize,
) -> (Vec<WorkerStats>, crate::metrics::RunAggregate) {
    let pool = WorkerPool::new(executor);
    let sink = Arc::new(ResultAggregator::new());
    let stats = pool
        .run(total, workers, test_spec(), Arc::clone(&sink))
        .await
        .expect("Pool run failed");
    (stats, sink.snapshot())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_pool_exact_dispatch_for_any_worker_count() {
    for workers in [1, 4, 50] {
        let executor = Arc::new(MockExecutor::new().with_delay(Duration::from_millis(1)));
        let (stats, agg) = run_pool(executor.clone(), 200, workers).await;

        assert_eq!(stats.len(), workers);
        assert_eq!(executor.calls(), 200, "workers = {workers}");
        assert_eq!(agg.total, 200, "workers = {workers}");
        assert_eq!(agg.histogram_total(), 200);
        assert_eq!(agg.succeeded + agg.failed, 200);
        assert_eq!(agg.latency.count, 200);

        let per_worker: usize = stats.iter().map(WorkerStats::total_requests).sum();
        assert_eq!(per_worker, 200);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_pool_runs_workers_concurrently() {
    let executor = Arc::new(MockExecutor::new().with_delay(Duration::from_millis(50)));
    let start = std::time::Instant::now();
    let (_, agg) = run_pool(executor.clone(), 10, 5).await;
    let elapsed = start.elapsed();

    assert_eq!(agg.total, 10);
    // Two waves of five, far below ten sequential delays
    assert!(elapsed < Duration::from_millis(400));
    assert!(executor.max_in_flight() > 1);
    assert!(executor.max_in_flight() <= 5);
}

#[tokio::test]
async fn test_pool_more_workers_than_requests() {
    let executor = Arc::new(MockExecutor::new());
    let (stats, agg) = run_pool(executor.clone(), 3, 10).await;

    assert_eq!(stats.len(), 10);
    assert_eq!(agg.total, 3);
    assert_eq!(executor.calls(), 3);
    let idle = stats.iter().filter(|s| s.total_requests() == 0).count();
    assert!(idle >= 7);
}

#[tokio::test]
async fn test_pool_stats_in_worker_order() {
    let executor = Arc::new(MockExecutor::new());
    let (stats, _) = run_pool(executor, 20, 4).await;
    let ids: Vec<usize> = stats.iter().map(|s| s.worker_id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn test_pool_rejects_zero_workers() {
    let executor = Arc::new(MockExecutor::new());
    let pool = WorkerPool::new(executor.clone());
    let result = pool
        .run(10, 0, test_spec(), Arc::new(ResultAggregator::new()))
        .await;

    assert!(result.unwrap_err().is_config());
    assert_eq!(executor.calls(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_pool_all_failures_still_accounted() {
    let executor = Arc::new(MockExecutor::new().with_fail_every(1));
    let (_, agg) = run_pool(executor, 50, 10).await;

    assert_eq!(agg.total, 50);
    assert_eq!(agg.succeeded, 0);
    assert_eq!(agg.failed, 50);
    assert_eq!(agg.status_counts.len(), 1);
    assert_eq!(agg.status_count(StatusKey::Error), 50);
}
