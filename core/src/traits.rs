//! Core traits
//!
//! Defined in core so the worker pool can be driven by the real HTTP client
//! (in `stress-bench-client`) or by test doubles.

use async_trait::async_trait;

use crate::request::RequestSpec;
use crate::response::RequestOutcome;

/// Performs exactly one request per call
///
/// Implementations must never panic or return early on network problems:
/// every failure path, including an expired timeout, is reported as
/// [`RequestOutcome::Failure`] together with the time spent.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Identifier used in logs (e.g. "http")
    fn name(&self) -> &str;

    /// Send one request described by `spec` and classify the result
    async fn execute(&self, spec: &RequestSpec) -> RequestOutcome;
}
