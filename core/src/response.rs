//! Per-request outcomes

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Classification of a request that did not complete an HTTP exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Per-request deadline expired
    Timeout,
    /// Connection refused, reset or unreachable
    Connect,
    /// Name resolution failed
    Dns,
    /// TLS handshake or certificate failure
    Tls,
    /// Failure while reading the response body
    Body,
    /// Anything else (protocol errors, redirect loops, ...)
    Other,
}

impl ErrorKind {
    /// Stable identifier used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Timeout => "timeout",
            ErrorKind::Connect => "connect",
            ErrorKind::Dns => "dns",
            ErrorKind::Tls => "tls",
            ErrorKind::Body => "body",
            ErrorKind::Other => "other",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single HTTP attempt
///
/// Any completed HTTP exchange is a `Success`, whatever its status code.
/// Only network-level problems produce a `Failure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The server answered
    Success {
        /// HTTP status code
        status: u16,
        /// Time from sending to response fully consumed
        elapsed: Duration,
    },
    /// The exchange did not complete
    Failure {
        /// What went wrong
        kind: ErrorKind,
        /// Time spent until the failure surfaced
        elapsed: Duration,
    },
}

impl RequestOutcome {
    /// Shorthand for a successful outcome
    pub fn success(status: u16, elapsed: Duration) -> Self {
        RequestOutcome::Success { status, elapsed }
    }

    /// Shorthand for a failed outcome
    pub fn failure(kind: ErrorKind, elapsed: Duration) -> Self {
        RequestOutcome::Failure { kind, elapsed }
    }

    /// Elapsed wall-clock time of the attempt
    pub fn elapsed(&self) -> Duration {
        match self {
            RequestOutcome::Success { elapsed, .. } | RequestOutcome::Failure { elapsed, .. } => {
                *elapsed
            }
        }
    }

    /// Whether an HTTP exchange completed
    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Success { .. })
    }

    /// Status code, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestOutcome::Success { status, .. } => Some(*status),
            RequestOutcome::Failure { .. } => None,
        }
    }

    /// Error classification, if the exchange failed
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            RequestOutcome::Success { .. } => None,
            RequestOutcome::Failure { kind, .. } => Some(*kind),
        }
    }
}
