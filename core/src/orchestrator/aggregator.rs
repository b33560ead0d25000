//! Thread-safe accumulation of request outcomes

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::metrics::RunAggregate;
use crate::response::RequestOutcome;

/// Shared sink every worker of a run records into
///
/// Updates are serialized through a mutex that is only held for the few
/// field updates of [`RunAggregate::record`], never across an await.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    inner: Mutex<RunAggregate>,
}

impl ResultAggregator {
    /// Create an aggregator for a fresh run
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one outcome
    pub fn record(&self, outcome: &RequestOutcome) {
        self.lock().record(outcome);
    }

    /// Copy of the current aggregate
    ///
    /// Only meaningful once the pool feeding this aggregator has been joined.
    pub fn snapshot(&self) -> RunAggregate {
        self.lock().clone()
    }

    /// Take the aggregate out, consuming the aggregator
    pub fn into_aggregate(self) -> RunAggregate {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // A panic while holding the lock cannot leave a half-applied record:
    // every field update is a single increment or comparison.
    fn lock(&self) -> MutexGuard<'_, RunAggregate> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::StatusKey;
    use crate::response::ErrorKind;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_empty_snapshot() {
        let aggregator = ResultAggregator::new();
        let agg = aggregator.snapshot();
        assert_eq!(agg.total, 0);
        assert!(agg.status_counts.is_empty());
        assert!(agg.is_consistent());
    }

    #[test]
    fn test_record_and_snapshot() {
        let aggregator = ResultAggregator::new();
        aggregator.record(&RequestOutcome::success(200, Duration::from_millis(3)));
        aggregator.record(&RequestOutcome::failure(
            ErrorKind::Timeout,
            Duration::from_millis(9),
        ));

        let agg = aggregator.snapshot();
        assert_eq!(agg.total, 2);
        assert_eq!(agg.status_count(StatusKey::Code(200)), 1);
        assert_eq!(agg.status_count(StatusKey::Error), 1);
        assert_eq!(aggregator.into_aggregate(), agg);
    }

    #[test]
    fn test_concurrent_record_loses_nothing() {
        let aggregator = Arc::new(ResultAggregator::new());
        let threads: Vec<_> = (0..8)
            .map(|t| {
                let aggregator = Arc::clone(&aggregator);
                std::thread::spawn(move || {
                    for i in 0..1000u64 {
                        let outcome = if (t + i) % 5 == 0 {
                            RequestOutcome::failure(ErrorKind::Connect, Duration::from_micros(i))
                        } else {
                            RequestOutcome::success(200, Duration::from_micros(i))
                        };
                        aggregator.record(&outcome);
                    }
                })
            })
            .collect();

        for thread in threads {
            thread.join().unwrap();
        }

        let agg = aggregator.snapshot();
        assert_eq!(agg.total, 8000);
        assert_eq!(agg.latency.count, 8000);
        assert_eq!(agg.histogram_total(), 8000);
        assert_eq!(agg.succeeded + agg.failed, 8000);
        assert!(agg.is_consistent());
    }
}
