//! Builder pattern for Worker construction

use crate::error::{BenchError, BenchResult};
use crate::orchestrator::ResultAggregator;
use crate::request::RequestSpec;
use crate::traits::RequestExecutor;

use super::executor::Worker;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

/// Builder for creating Worker instances
///
/// # Example
/// ```ignore
/// let worker = WorkerBuilder::new(0)
///     .executor(executor)
///     .spec(spec)
///     .sink(aggregator)
///     .request_counter(counter, 200)
///     .build()?;
/// ```
pub struct WorkerBuilder {
    id: usize,
    executor: Option<Arc<dyn RequestExecutor>>,
    spec: Option<Arc<RequestSpec>>,
    sink: Option<Arc<ResultAggregator>>,
    request_counter: Option<Arc<AtomicUsize>>,
    total_requests: Option<usize>,
}

impl WorkerBuilder {
    /// Create a new builder with the given worker ID
    pub fn new(id: usize) -> Self {
        Self {
            id,
            executor: None,
            spec: None,
            sink: None,
            request_counter: None,
            total_requests: None,
        }
    }

    /// Set the request executor
    pub fn executor(mut self, executor: Arc<dyn RequestExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Set the request spec
    pub fn spec(mut self, spec: Arc<RequestSpec>) -> Self {
        self.spec = Some(spec);
        self
    }

    /// Set the aggregator outcomes are recorded into
    pub fn sink(mut self, sink: Arc<ResultAggregator>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Set the shared request counter and the number of units it guards
    pub fn request_counter(mut self, counter: Arc<AtomicUsize>, total: usize) -> Self {
        self.request_counter = Some(counter);
        self.total_requests = Some(total);
        self
    }

    /// Build the Worker
    ///
    /// # Errors
    /// Returns an error if any required field is missing.
    pub fn build(self) -> BenchResult<Worker> {
        let executor = self
            .executor
            .ok_or(BenchError::missing_config("executor"))?;
        let spec = self.spec.ok_or(BenchError::missing_config("spec"))?;
        let sink = self.sink.ok_or(BenchError::missing_config("sink"))?;
        let request_counter = self
            .request_counter
            .ok_or(BenchError::missing_config("request_counter"))?;
        let total_requests = self
            .total_requests
            .ok_or(BenchError::missing_config("total_requests"))?;

        Ok(Worker::new(
            self.id,
            executor,
            spec,
            sink,
            request_counter,
            total_requests,
        ))
    }
}
