//! Report generation for stress-bench sessions
//!
//! This crate turns a finished [`SessionResult`](stress_bench_core::SessionResult)
//! into:
//!
//! - A human-readable text report
//! - A JSON report
//! - A short console summary
//!
//! and writes the first two into an output directory.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod json;
mod summary;
mod text;
mod writer;

pub use json::JsonReport;
pub use summary::ConsoleSummary;
pub use text::TextReport;
pub use writer::{sanitize_host, ReportWriter, WrittenReports};
