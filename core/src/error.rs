//! Error types for stress-bench-core

use thiserror::Error;

use crate::config::ConfigError;

/// Core error type
///
/// Individual request failures never show up here; they are recorded as
/// [`RequestOutcome::Failure`](crate::RequestOutcome::Failure) and counted.
#[derive(Error, Debug)]
pub enum BenchError {
    /// Configuration rejected before any request was sent
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A builder was finished without a required field
    #[error("missing required field: {0}")]
    MissingConfig(&'static str),

    /// A worker task failed to complete
    #[error("worker error: {0}")]
    Worker(String),

    /// Run coordination failed
    #[error("orchestration error: {0}")]
    Orchestration(String),
}

impl BenchError {
    /// Error for a builder field that was never set
    pub fn missing_config(field: &'static str) -> Self {
        BenchError::MissingConfig(field)
    }

    /// Error for a worker task that did not finish cleanly
    pub fn worker(message: impl Into<String>) -> Self {
        BenchError::Worker(message.into())
    }

    /// Error for a run that could not be coordinated
    pub fn orchestration(message: impl Into<String>) -> Self {
        BenchError::Orchestration(message.into())
    }

    /// Whether this error was raised before any work started
    pub fn is_config(&self) -> bool {
        matches!(self, BenchError::Config(_) | BenchError::MissingConfig(_))
    }
}

/// Result type alias
pub type BenchResult<T> = std::result::Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_message() {
        let err = BenchError::missing_config("executor");
        assert!(err.to_string().contains("executor"));
        assert!(err.is_config());
    }

    #[test]
    fn test_config_error_conversion() {
        let err: BenchError = ConfigError::InvalidWorkerCount.into();
        assert!(err.is_config());
        assert!(err.to_string().starts_with("configuration error"));
    }

    #[test]
    fn test_worker_error_is_not_config() {
        let err = BenchError::worker("task panicked");
        assert!(!err.is_config());
        assert_eq!(err.to_string(), "worker error: task panicked");
    }
}
