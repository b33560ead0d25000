//! Worker statistics tracking

use std::time::{Duration, Instant};

use crate::response::RequestOutcome;

/// Statistics tracked by each worker
///
/// These only describe how work was spread over workers. The authoritative
/// counts of a run live in the shared
/// [`ResultAggregator`](crate::orchestrator::ResultAggregator).
#[derive(Debug, Default, Clone)]
pub struct WorkerStats {
    /// Worker identifier
    pub worker_id: usize,

    /// Requests that completed an HTTP exchange
    pub succeeded: usize,

    /// Requests that failed at the network level
    pub failed: usize,

    /// Worker start time
    pub started_at: Option<Instant>,

    /// Worker end time
    pub ended_at: Option<Instant>,
}

impl WorkerStats {
    /// Create new empty stats for a worker
    pub fn new(worker_id: usize) -> Self {
        Self {
            worker_id,
            ..Default::default()
        }
    }

    /// Start tracking (records start time)
    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    /// Stop tracking (records end time)
    pub fn stop(&mut self) {
        self.ended_at = Some(Instant::now());
    }

    /// Count one outcome
    pub fn record(&mut self, outcome: &RequestOutcome) {
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Get total number of requests executed by this worker
    pub fn total_requests(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Get elapsed time since start
    pub fn elapsed(&self) -> Option<Duration> {
        self.started_at.map(|start| {
            self.ended_at
                .map(|end| end.duration_since(start))
                .unwrap_or_else(|| start.elapsed())
        })
    }
}
