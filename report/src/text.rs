//! Plain-text report

use std::collections::BTreeMap;
use std::fmt::{Display, Write};

use stress_bench_core::{LatencyStats, RunAggregate, SessionResult};

use crate::json::{round4, round6};

/// Human-readable session report
pub struct TextReport;

impl TextReport {
    /// Render the whole session
    pub fn render(result: &SessionResult) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = Self::write_to(&mut out, result);
        out
    }

    fn write_to(out: &mut String, result: &SessionResult) -> std::fmt::Result {
        let config = &result.config;
        let request = &config.request;
        let headers = serde_json::to_string(&request.headers).unwrap_or_else(|_| "{}".into());

        writeln!(out, "Timestamp (UTC): {}", result.started_at.format("%Y-%m-%dT%H:%M:%SZ"))?;
        writeln!(out, "URL: {}", request.url)?;
        writeln!(out, "Method: {}", request.method)?;
        writeln!(out, "Headers: {headers}")?;
        writeln!(out, "Requests per run: {}", config.total_requests)?;
        writeln!(out, "Threads: {}", config.worker_count)?;
        writeln!(out, "Repeats: {}", config.repeat_count)?;
        writeln!(out, "Timeout (s): {}", request.timeout.as_secs_f64())?;

        let totals = &result.totals;
        writeln!(out, "\nAggregate:")?;
        writeln!(out, "  Total requests: {}", totals.total_requests)?;
        write_block(
            out,
            "  ",
            &totals.aggregate,
            totals.duration_secs,
            totals.requests_per_second,
        )?;

        writeln!(out, "\nRuns:")?;
        for run in &result.runs {
            writeln!(out, "  Run {}:", run.run_index)?;
            write_block(
                out,
                "    ",
                &run.aggregate,
                run.duration_secs,
                run.requests_per_second,
            )?;
        }
        Ok(())
    }
}

fn write_block(
    out: &mut String,
    indent: &str,
    agg: &RunAggregate,
    duration_secs: f64,
    rate: f64,
) -> std::fmt::Result {
    writeln!(out, "{indent}Successful requests: {}", agg.succeeded)?;
    writeln!(out, "{indent}Failed requests: {}", agg.failed)?;
    writeln!(out, "{indent}Status counts: {}", format_counts(&agg.status_counts))?;
    if !agg.error_kinds.is_empty() {
        writeln!(out, "{indent}Error kinds: {}", format_counts(&agg.error_kinds))?;
    }
    writeln!(out, "{indent}Total time: {} seconds", round4(duration_secs))?;
    writeln!(out, "{indent}Requests per second: {}", round4(rate))?;
    writeln!(out, "{indent}Latency (s): {}", format_latency(&agg.latency))
}

/// `key=count` pairs in key order
pub(crate) fn format_counts<K: Display>(counts: &BTreeMap<K, u64>) -> String {
    if counts.is_empty() {
        return "none".to_string();
    }
    counts
        .iter()
        .map(|(key, count)| format!("{key}={count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn format_latency(stats: &LatencyStats) -> String {
    format!(
        "min={} avg={} max={}",
        round6(stats.min_secs.unwrap_or(0.0)),
        round6(stats.avg_secs()),
        round6(stats.max_secs.unwrap_or(0.0)),
    )
}
