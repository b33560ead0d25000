//! JSON report

use serde_json::{json, Map, Value};
use stress_bench_core::{LatencyStats, RunAggregate, SessionResult};

/// Machine-readable session report
pub struct JsonReport;

impl JsonReport {
    /// Render the whole session
    ///
    /// Durations and rates are rounded to 4 decimals, latencies to 6.
    pub fn render(result: &SessionResult) -> Value {
        let config = &result.config;
        let runs: Vec<Value> = result
            .runs
            .iter()
            .map(|run| {
                let mut entry = counters(&run.aggregate, run.duration_secs, run.requests_per_second);
                entry.insert("run_index".to_string(), json!(run.run_index));
                Value::Object(entry)
            })
            .collect();

        let totals = &result.totals;
        let mut aggregate = counters(
            &totals.aggregate,
            totals.duration_secs,
            totals.requests_per_second,
        );
        aggregate.insert("total_requests".to_string(), json!(totals.total_requests));

        json!({
            "timestamp_utc": result.started_at.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            "url": config.request.url.as_str(),
            "method": config.request.method.as_str(),
            "headers": config.request.headers,
            "num_requests": config.total_requests,
            "num_threads": config.worker_count,
            "repeats": config.repeat_count,
            "timeout_seconds": config.request.timeout.as_secs_f64(),
            "runs": runs,
            "aggregate": aggregate,
        })
    }

    /// Render as pretty-printed text
    pub fn render_pretty(result: &SessionResult) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::render(result))
    }
}

fn counters(agg: &RunAggregate, duration_secs: f64, rate: f64) -> Map<String, Value> {
    let status_counts: Map<String, Value> = agg
        .status_counts
        .iter()
        .map(|(key, count)| (key.to_string(), json!(count)))
        .collect();
    let error_kinds: Map<String, Value> = agg
        .error_kinds
        .iter()
        .map(|(kind, count)| (kind.as_str().to_string(), json!(count)))
        .collect();

    let mut map = Map::new();
    map.insert("success_count".to_string(), json!(agg.succeeded));
    map.insert("failed_count".to_string(), json!(agg.failed));
    map.insert("status_counts".to_string(), Value::Object(status_counts));
    map.insert("error_kinds".to_string(), Value::Object(error_kinds));
    map.insert("total_time_seconds".to_string(), json!(round4(duration_secs)));
    map.insert("requests_per_second".to_string(), json!(round4(rate)));
    map.insert("latency_seconds".to_string(), latency(&agg.latency));
    map
}

fn latency(stats: &LatencyStats) -> Value {
    json!({
        "min": round6(stats.min_secs.unwrap_or(0.0)),
        "avg": round6(stats.avg_secs()),
        "max": round6(stats.max_secs.unwrap_or(0.0)),
    })
}

pub(crate) fn round4(value: f64) -> f64 {
    round_to(value, 4)
}

pub(crate) fn round6(value: f64) -> f64 {
    round_to(value, 6)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
