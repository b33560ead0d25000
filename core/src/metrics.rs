//! Run aggregates, summaries and session results

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::SessionConfig;
use crate::response::{ErrorKind, RequestOutcome};

/// Histogram bucket: a literal status code, or `error` for failed attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusKey {
    /// Server answered with this status
    Code(u16),
    /// No HTTP exchange completed
    Error,
}

impl StatusKey {
    /// Bucket for an outcome
    pub fn of(outcome: &RequestOutcome) -> Self {
        match outcome {
            RequestOutcome::Success { status, .. } => StatusKey::Code(*status),
            RequestOutcome::Failure { .. } => StatusKey::Error,
        }
    }
}

impl fmt::Display for StatusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusKey::Code(code) => write!(f, "{code}"),
            StatusKey::Error => f.write_str("error"),
        }
    }
}

impl FromStr for StatusKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "error" {
            return Ok(StatusKey::Error);
        }
        s.parse::<u16>()
            .map(StatusKey::Code)
            .map_err(|_| format!("invalid status key: {s}"))
    }
}

impl Serialize for StatusKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StatusKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Running latency extremes and sum, in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    /// Number of samples folded in
    pub count: u64,
    /// Sum of all samples
    pub sum_secs: f64,
    /// Smallest sample
    pub min_secs: Option<f64>,
    /// Largest sample
    pub max_secs: Option<f64>,
}

impl LatencyStats {
    /// Fold one sample in
    pub fn record(&mut self, elapsed: Duration) {
        let secs = elapsed.as_secs_f64();
        self.count += 1;
        self.sum_secs += secs;
        self.min_secs = Some(self.min_secs.map_or(secs, |m| m.min(secs)));
        self.max_secs = Some(self.max_secs.map_or(secs, |m| m.max(secs)));
    }

    /// Merge another set of samples
    pub fn merge(&mut self, other: &LatencyStats) {
        self.count += other.count;
        self.sum_secs += other.sum_secs;
        self.min_secs = match (self.min_secs, other.min_secs) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.max_secs = match (self.max_secs, other.max_secs) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }

    /// Mean sample, 0 when empty
    pub fn avg_secs(&self) -> f64 {
        if self.count > 0 {
            self.sum_secs / self.count as f64
        } else {
            0.0
        }
    }
}

/// Everything counted during one run
///
/// At the end of a run `total == succeeded + failed == sum(status_counts)`
/// and `latency.count == total`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunAggregate {
    /// Attempts recorded
    pub total: u64,
    /// Attempts that completed an HTTP exchange
    pub succeeded: u64,
    /// Attempts that did not
    pub failed: u64,
    /// Outcomes by status code, failures under `error`
    pub status_counts: BTreeMap<StatusKey, u64>,
    /// Failures by classification
    pub error_kinds: BTreeMap<ErrorKind, u64>,
    /// Latency over all attempts, failures included
    pub latency: LatencyStats,
}

impl RunAggregate {
    /// Create an empty aggregate
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one outcome
    pub fn record(&mut self, outcome: &RequestOutcome) {
        self.total += 1;
        match outcome {
            RequestOutcome::Success { .. } => self.succeeded += 1,
            RequestOutcome::Failure { kind, .. } => {
                self.failed += 1;
                *self.error_kinds.entry(*kind).or_insert(0) += 1;
            }
        }
        *self.status_counts.entry(StatusKey::of(outcome)).or_insert(0) += 1;
        self.latency.record(outcome.elapsed());
    }

    /// Add another aggregate field by field
    pub fn merge(&mut self, other: &RunAggregate) {
        self.total += other.total;
        self.succeeded += other.succeeded;
        self.failed += other.failed;
        for (key, count) in &other.status_counts {
            *self.status_counts.entry(*key).or_insert(0) += count;
        }
        for (kind, count) in &other.error_kinds {
            *self.error_kinds.entry(*kind).or_insert(0) += count;
        }
        self.latency.merge(&other.latency);
    }

    /// Sum of all histogram buckets
    pub fn histogram_total(&self) -> u64 {
        self.status_counts.values().sum()
    }

    /// Count in one histogram bucket
    pub fn status_count(&self, key: StatusKey) -> u64 {
        self.status_counts.get(&key).copied().unwrap_or(0)
    }

    /// Whether the accounting identities hold
    pub fn is_consistent(&self) -> bool {
        self.total == self.succeeded + self.failed
            && self.total == self.histogram_total()
            && self.total == self.latency.count
            && self.failed == self.error_kinds.values().sum::<u64>()
    }
}

/// Requests per second, 0 when no time elapsed
pub fn requests_per_second(count: u64, duration_secs: f64) -> f64 {
    if duration_secs > 0.0 {
        count as f64 / duration_secs
    } else {
        0.0
    }
}

/// One finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// 1-based position within the session
    pub run_index: usize,
    /// Counters of the run
    pub aggregate: RunAggregate,
    /// Wall-clock duration of the run
    pub duration_secs: f64,
    /// Configured requests divided by duration
    pub requests_per_second: f64,
}

impl RunSummary {
    /// Derive a summary from a drained aggregate
    pub fn new(
        run_index: usize,
        aggregate: RunAggregate,
        duration: Duration,
        total_requests: usize,
    ) -> Self {
        let duration_secs = duration.as_secs_f64();
        Self {
            run_index,
            requests_per_second: requests_per_second(total_requests as u64, duration_secs),
            aggregate,
            duration_secs,
        }
    }
}

/// Totals combined over every run of a session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionTotals {
    /// Requests dispatched across all runs
    pub total_requests: u64,
    /// Field-wise sum of the run aggregates
    pub aggregate: RunAggregate,
    /// Sum of run durations
    pub duration_secs: f64,
    /// `total_requests / duration_secs`
    pub requests_per_second: f64,
}

impl SessionTotals {
    /// Combine run summaries
    pub fn from_runs(runs: &[RunSummary]) -> Self {
        let mut aggregate = RunAggregate::new();
        let mut duration_secs = 0.0;
        for run in runs {
            aggregate.merge(&run.aggregate);
            duration_secs += run.duration_secs;
        }

        let total_requests = aggregate.total;
        Self {
            total_requests,
            requests_per_second: requests_per_second(total_requests, duration_secs),
            aggregate,
            duration_secs,
        }
    }
}

/// Complete result of a session, handed to reporting
#[derive(Debug, Clone)]
pub struct SessionResult {
    /// Configuration the session ran with
    pub config: SessionConfig,
    /// When the first run started
    pub started_at: chrono::DateTime<chrono::Utc>,
    /// One summary per run, in execution order
    pub runs: Vec<RunSummary>,
    /// Combined totals
    pub totals: SessionTotals,
}
