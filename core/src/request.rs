//! Request description shared by every worker of a session

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP method used for every request of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `GET`, the response body is read and discarded
    #[default]
    Get,
    /// `HEAD`
    Head,
}

impl HttpMethod {
    /// Canonical upper-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "HEAD" => Ok(HttpMethod::Head),
            _ => Err(ConfigError::InvalidMethod(s.trim().to_string())),
        }
    }
}

/// Immutable description of the request every worker sends
///
/// Built once from user input and shared read-only (behind an `Arc`) by all
/// workers of every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    /// Absolute `http`/`https` target
    pub url: Url,

    /// Request method
    pub method: HttpMethod,

    /// Extra request headers
    pub headers: BTreeMap<String, String>,

    /// Hard per-request deadline
    pub timeout: Duration,
}

impl RequestSpec {
    /// Parse the target URL and create a spec with default method and timeout
    ///
    /// Only absolute `http` and `https` URLs with a host are accepted.
    pub fn parse(url: &str) -> Result<Self, ConfigError> {
        let trimmed = url.trim();
        let parsed = Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl {
            url: trimmed.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(parsed.scheme().to_string()));
        }
        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(ConfigError::InvalidUrl {
                url: trimmed.to_string(),
                reason: "missing host".into(),
            });
        }

        Ok(Self {
            url: parsed,
            method: HttpMethod::default(),
            headers: BTreeMap::new(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Set the method
    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Add a single header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Replace all headers
    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Host part of the target, if any
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }

    /// Validate the parts that cannot be checked while building
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(self.timeout));
        }

        for (name, value) in &self.headers {
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| ConfigError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
            HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        }

        Ok(())
    }
}
