//! Builder pattern for Orchestrator construction

use std::sync::Arc;

use crate::config::SessionConfig;
use crate::error::{BenchError, BenchResult};
use crate::request::RequestSpec;
use crate::traits::RequestExecutor;

use super::executor::Orchestrator;

/// Builder for creating an Orchestrator with a validated configuration
///
/// # Example
///
/// ```ignore
/// let orchestrator = OrchestratorBuilder::new()
///     .request(RequestSpec::parse("http://localhost:8080/")?)
///     .total_requests(1000)
///     .worker_count(10)
///     .repeat_count(3)
///     .executor(executor)
///     .build()?;
/// ```
pub struct OrchestratorBuilder {
    request: Option<RequestSpec>,
    total_requests: usize,
    worker_count: usize,
    repeat_count: usize,
    executor: Option<Arc<dyn RequestExecutor>>,
}

impl OrchestratorBuilder {
    /// Create a new orchestrator builder with default counts
    pub fn new() -> Self {
        Self {
            request: None,
            total_requests: 100,
            worker_count: 1,
            repeat_count: 1,
            executor: None,
        }
    }

    /// Set the full session configuration
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.request = Some(config.request);
        self.total_requests = config.total_requests;
        self.worker_count = config.worker_count;
        self.repeat_count = config.repeat_count;
        self
    }

    /// Set the request every worker sends
    pub fn request(mut self, request: RequestSpec) -> Self {
        self.request = Some(request);
        self
    }

    /// Set the number of requests per run
    pub fn total_requests(mut self, total: usize) -> Self {
        self.total_requests = total;
        self
    }

    /// Set the number of workers
    pub fn worker_count(mut self, workers: usize) -> Self {
        self.worker_count = workers;
        self
    }

    /// Set the number of runs
    pub fn repeat_count(mut self, repeats: usize) -> Self {
        self.repeat_count = repeats;
        self
    }

    /// Set the request executor
    pub fn executor(mut self, executor: Arc<dyn RequestExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Build the orchestrator
    ///
    /// # Errors
    ///
    /// Returns an error if the request or executor is not set, or if
    /// configuration validation fails.
    pub fn build(self) -> BenchResult<Orchestrator> {
        let request = self
            .request
            .ok_or_else(|| BenchError::missing_config("request"))?;

        let executor = self
            .executor
            .ok_or_else(|| BenchError::missing_config("executor"))?;

        let config = SessionConfig {
            request,
            total_requests: self.total_requests,
            worker_count: self.worker_count,
            repeat_count: self.repeat_count,
        };
        config.validate()?;

        Ok(Orchestrator::new(config, executor))
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
