//! Console summary printed after a session

use std::fmt::Write;

use stress_bench_core::SessionResult;

use crate::text::{format_counts, format_latency};

/// Short end-of-session summary
pub struct ConsoleSummary;

impl ConsoleSummary {
    /// Render the session totals
    pub fn render(result: &SessionResult) -> String {
        let totals = &result.totals;
        let agg = &totals.aggregate;
        let mut out = String::new();
        let _ = writeln!(out, "Total requests: {}", totals.total_requests);
        let _ = writeln!(out, "Successful requests: {}", agg.succeeded);
        let _ = writeln!(out, "Failed requests: {}", agg.failed);
        let _ = writeln!(out, "Status counts: {}", format_counts(&agg.status_counts));
        let _ = writeln!(out, "Total time: {:.2} seconds", totals.duration_secs);
        let _ = writeln!(out, "Requests per second: {:.2}", totals.requests_per_second);
        let _ = writeln!(out, "Latency (s): {}", format_latency(&agg.latency));
        out
    }
}
