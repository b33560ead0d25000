//! Session configuration types

use std::collections::BTreeMap;
use std::time::Duration;

use crate::request::RequestSpec;

/// Session configuration
///
/// Defines what a stress session sends and how hard: the request itself,
/// how many requests per run, how many workers, and how many runs.
/// Values are validated once, before the first request of the first run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Request sent by every worker
    pub request: RequestSpec,

    /// Requests dispatched per run
    pub total_requests: usize,

    /// Concurrently active workers per run
    pub worker_count: usize,

    /// Number of sequential runs
    pub repeat_count: usize,
}

impl SessionConfig {
    /// Create a config for the given request with default counts
    pub fn new(request: RequestSpec) -> Self {
        Self {
            request,
            total_requests: 100,
            worker_count: 1,
            repeat_count: 1,
        }
    }

    /// Set the number of requests per run
    pub fn with_total_requests(mut self, total: usize) -> Self {
        self.total_requests = total;
        self
    }

    /// Set the number of workers
    pub fn with_worker_count(mut self, workers: usize) -> Self {
        self.worker_count = workers;
        self
    }

    /// Set the number of runs
    pub fn with_repeat_count(mut self, repeats: usize) -> Self {
        self.repeat_count = repeats;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_requests == 0 {
            return Err(ConfigError::InvalidRequestCount);
        }

        if self.worker_count == 0 {
            return Err(ConfigError::InvalidWorkerCount);
        }

        if self.repeat_count == 0 {
            return Err(ConfigError::InvalidRepeatCount);
        }

        self.request.validate()
    }
}

/// Parse request headers from a JSON object of string values
///
/// Blank input means no headers. Anything other than an object whose values
/// are all strings is rejected.
pub fn parse_headers_json(input: &str) -> Result<BTreeMap<String, String>, ConfigError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(BTreeMap::new());
    }

    let value: serde_json::Value =
        serde_json::from_str(input).map_err(|e| ConfigError::InvalidHeaders(e.to_string()))?;

    let serde_json::Value::Object(map) = value else {
        return Err(ConfigError::InvalidHeaders(
            "headers must be a JSON object".into(),
        ));
    };

    map.into_iter()
        .map(|(name, value)| match value {
            serde_json::Value::String(s) => Ok((name, s)),
            other => Err(ConfigError::InvalidHeaders(format!(
                "value of header '{name}' must be a string, got {other}"
            ))),
        })
        .collect()
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// URL could not be parsed or has no host
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected input
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// URL scheme other than http/https
    #[error("Unsupported URL scheme '{0}', expected http or https")]
    UnsupportedScheme(String),

    /// Zero requests per run
    #[error("Invalid request count: must be at least 1")]
    InvalidRequestCount,

    /// Zero workers
    #[error("Invalid worker count: must be at least 1")]
    InvalidWorkerCount,

    /// Zero runs
    #[error("Invalid repeat count: must be at least 1")]
    InvalidRepeatCount,

    /// Timeout must be positive
    #[error("Invalid timeout: {0:?}")]
    InvalidTimeout(Duration),

    /// Method other than GET or HEAD
    #[error("Invalid HTTP method '{0}', expected GET or HEAD")]
    InvalidMethod(String),

    /// Header name or value is not valid on the wire
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader {
        /// Header name as given
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Header input is not a JSON object of strings
    #[error("Invalid headers: {0}")]
    InvalidHeaders(String),
}
