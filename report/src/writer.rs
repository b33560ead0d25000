//! Persisting reports to the output directory

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use stress_bench_core::SessionResult;
use tracing::info;

use crate::json::JsonReport;
use crate::text::TextReport;

/// Paths of the files produced by [`ReportWriter::write`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReports {
    /// The `.txt` report
    pub text_path: PathBuf,
    /// The `.json` report
    pub json_path: PathBuf,
}

/// Writes text and JSON reports into a directory
///
/// Files are named `<host>_<YYYYMMDD_HHMMSS>` after the target host and the
/// session start time, so successive sessions do not overwrite each other.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    /// Writer for `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Base file name shared by both reports
    pub fn file_stem(result: &SessionResult) -> String {
        let host = result.config.request.host().unwrap_or("unknown");
        format!(
            "{}_{}",
            sanitize_host(host),
            result.started_at.format("%Y%m%d_%H%M%S")
        )
    }

    /// Write both reports
    pub fn write(&self, result: &SessionResult) -> Result<WrittenReports> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create output directory {}", self.dir.display()))?;

        let stem = Self::file_stem(result);
        let text_path = self.dir.join(format!("{stem}.txt"));
        let json_path = self.dir.join(format!("{stem}.json"));

        fs::write(&text_path, TextReport::render(result))
            .with_context(|| format!("Failed to write {}", text_path.display()))?;

        let json = JsonReport::render_pretty(result).context("Failed to serialize JSON report")?;
        fs::write(&json_path, json)
            .with_context(|| format!("Failed to write {}", json_path.display()))?;

        info!(
            text = %text_path.display(),
            json = %json_path.display(),
            "Reports written"
        );

        Ok(WrittenReports {
            text_path,
            json_path,
        })
    }
}

/// Replace characters outside `[A-Za-z0-9.-]` with `_`
pub fn sanitize_host(host: &str) -> String {
    host.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
