//! stress-bench-core: concurrent request dispatch and aggregation
//!
//! This crate provides everything between a validated configuration and a
//! finished [`SessionResult`], including:
//!
//! - Request description and configuration validation
//! - The [`RequestExecutor`] seam implemented by the HTTP client crate
//! - The worker pool that spreads a fixed number of requests over workers
//! - Thread-safe aggregation of outcomes and per-run/session summaries
//! - Error handling
//!
//! It performs no file-system I/O; rendering and persisting results is the
//! job of the report crate.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod metrics;
pub mod orchestrator;
pub mod request;
pub mod response;
pub mod traits;
pub mod worker;

pub use config::{parse_headers_json, ConfigError, SessionConfig};
pub use error::*;
pub use metrics::*;
pub use orchestrator::{Orchestrator, OrchestratorBuilder, ResultAggregator};
pub use request::*;
pub use response::*;
pub use traits::*;
pub use worker::{Worker, WorkerBuilder, WorkerPool, WorkerStats};

#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::time::Duration;

    // =========================================================================
    // Report-facing JSON shapes
    // =========================================================================

    #[test]
    fn test_run_summary_json_shape() {
        let mut agg = RunAggregate::new();
        agg.record(&RequestOutcome::success(200, Duration::from_millis(10)));
        agg.record(&RequestOutcome::failure(
            ErrorKind::Timeout,
            Duration::from_secs(1),
        ));
        let summary = RunSummary::new(2, agg, Duration::from_secs(2), 2);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["run_index"], 2);
        assert_eq!(json["aggregate"]["status_counts"]["200"], 1);
        assert_eq!(json["aggregate"]["status_counts"]["error"], 1);
        assert_eq!(json["aggregate"]["error_kinds"]["timeout"], 1);
        assert_eq!(json["requests_per_second"], 1.0);
    }

    #[test]
    fn test_aggregate_deserializes_from_report_keys() {
        let json = r#"{
            "total": 3, "succeeded": 2, "failed": 1,
            "status_counts": {"200": 1, "503": 1, "error": 1},
            "error_kinds": {"connect": 1},
            "latency": {"count": 3, "sum_secs": 0.3, "min_secs": 0.05, "max_secs": 0.2}
        }"#;
        let agg: RunAggregate = serde_json::from_str(json).unwrap();

        assert_eq!(agg.status_count(StatusKey::Code(503)), 1);
        assert_eq!(agg.status_count(StatusKey::Error), 1);
        assert_eq!(agg.error_kinds[&ErrorKind::Connect], 1);
        assert!(agg.is_consistent());
    }

    #[test]
    fn test_histogram_orders_codes_before_error() {
        let mut agg = RunAggregate::new();
        agg.record(&RequestOutcome::failure(ErrorKind::Other, Duration::ZERO));
        agg.record(&RequestOutcome::success(500, Duration::ZERO));
        agg.record(&RequestOutcome::success(200, Duration::ZERO));

        let keys: Vec<String> = agg.status_counts.keys().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["200", "500", "error"]);
    }

    // =========================================================================
    // Configuration flow as the CLI drives it
    // =========================================================================

    #[test]
    fn test_config_from_user_input() {
        let headers = parse_headers_json(r#"{"Accept": "application/json"}"#).unwrap();
        let request = RequestSpec::parse("https://example.com/api")
            .unwrap()
            .with_method("head".parse().unwrap())
            .with_headers(headers)
            .with_timeout(Duration::from_secs_f64(2.5));
        let config = SessionConfig::new(request)
            .with_total_requests(500)
            .with_worker_count(20)
            .with_repeat_count(2);

        assert!(config.validate().is_ok());
        assert_eq!(config.request.method, HttpMethod::Head);
        assert_eq!(config.request.timeout, Duration::from_millis(2500));
    }
}
