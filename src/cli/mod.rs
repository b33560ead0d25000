//! CLI argument parsing and session dispatch

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use stress_bench_client::HttpExecutor;
use stress_bench_core::{parse_headers_json, HttpMethod, OrchestratorBuilder, RequestSpec, SessionConfig};
use stress_bench_report::{ConsoleSummary, ReportWriter};

/// Stress Bench - concurrent HTTP stress testing
#[derive(Parser, Debug)]
#[command(name = "stress-bench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Target URL (http or https)
    #[arg(short, long, env = "STRESS_BENCH_URL")]
    pub url: String,

    /// Requests per run
    #[arg(short = 'n', long, default_value = "100")]
    pub requests: usize,

    /// Concurrent workers
    #[arg(short, long, visible_alias = "threads", default_value = "1")]
    pub workers: usize,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value = "10")]
    pub timeout: f64,

    /// Number of sequential runs
    #[arg(short, long, default_value = "1")]
    pub repeats: usize,

    /// HTTP method (GET or HEAD)
    #[arg(short, long, default_value = "GET")]
    pub method: String,

    /// Request headers as a JSON object, e.g. '{"Accept": "text/html"}'
    #[arg(short = 'H', long)]
    pub headers: Option<String>,

    /// Directory for the text and JSON reports
    #[arg(short, long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Skip writing report files
    #[arg(long)]
    pub no_report: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the session configuration from the arguments
    ///
    /// Everything is validated here, before any request is sent.
    pub fn session_config(&self) -> Result<SessionConfig> {
        if !self.timeout.is_finite() || self.timeout <= 0.0 {
            bail!("Invalid timeout: {} seconds, must be positive", self.timeout);
        }
        let timeout = Duration::try_from_secs_f64(self.timeout)
            .with_context(|| format!("Invalid timeout: {} seconds", self.timeout))?;

        let method: HttpMethod = self.method.parse()?;
        let headers = parse_headers_json(self.headers.as_deref().unwrap_or(""))?;
        let request = RequestSpec::parse(&self.url)?
            .with_method(method)
            .with_headers(headers)
            .with_timeout(timeout);

        let config = SessionConfig::new(request)
            .with_total_requests(self.requests)
            .with_worker_count(self.workers)
            .with_repeat_count(self.repeats);
        config.validate()?;
        Ok(config)
    }

    /// Run the session described by the arguments
    pub async fn run(&self) -> Result<()> {
        let config = self.session_config()?;

        println!("\n{}", "=".repeat(70));
        println!("   Stress Bench - Concurrent HTTP Stress Testing");
        println!("{}", "=".repeat(70));
        println!();
        println!("Configuration:");
        println!("  URL:          {}", config.request.url);
        println!("  Method:       {}", config.request.method);
        println!("  Requests:     {}", config.total_requests);
        println!("  Workers:      {}", config.worker_count);
        println!("  Repeats:      {}", config.repeat_count);
        println!("  Timeout:      {}s", config.request.timeout.as_secs_f64());
        println!("{}", "=".repeat(70));
        println!();

        let executor = HttpExecutor::new().context("Failed to create HTTP executor")?;
        let orchestrator = OrchestratorBuilder::new()
            .config(config)
            .executor(Arc::new(executor))
            .build()?;

        let result = orchestrator
            .run_session()
            .await
            .context("Stress session failed")?;

        print!("{}", ConsoleSummary::render(&result));

        if self.no_report {
            tracing::debug!("Report files disabled");
            return Ok(());
        }

        let written = ReportWriter::new(&self.output_dir).write(&result)?;
        println!();
        println!("Reports saved:");
        println!("  {}", written.text_path.display());
        println!("  {}", written.json_path.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["stress-bench"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["--url", "http://localhost:8080/"]);

        assert_eq!(cli.requests, 100);
        assert_eq!(cli.workers, 1);
        assert_eq!(cli.timeout, 10.0);
        assert_eq!(cli.repeats, 1);
        assert_eq!(cli.method, "GET");
        assert_eq!(cli.output_dir, PathBuf::from("output"));
        assert!(!cli.no_report);

        let config = cli.session_config().unwrap();
        assert_eq!(config.request.timeout, Duration::from_secs(10));
        assert!(config.request.headers.is_empty());
    }

    #[test]
    fn test_threads_alias() {
        let cli = parse(&["-u", "http://localhost/", "--threads", "8", "-n", "500"]);
        assert_eq!(cli.workers, 8);
        assert_eq!(cli.requests, 500);
    }

    #[test]
    fn test_full_config() {
        let cli = parse(&[
            "--url",
            "https://example.com/api",
            "-m",
            "head",
            "-H",
            r#"{"Authorization": "Bearer x"}"#,
            "--timeout",
            "0.5",
            "--repeats",
            "3",
        ]);
        let config = cli.session_config().unwrap();

        assert_eq!(config.request.method, HttpMethod::Head);
        assert_eq!(config.request.headers["Authorization"], "Bearer x");
        assert_eq!(config.request.timeout, Duration::from_millis(500));
        assert_eq!(config.repeat_count, 3);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        for args in [
            vec!["--url", "ftp://example.com/"],
            vec!["--url", "http://localhost/", "-m", "POST"],
            vec!["--url", "http://localhost/", "-H", "[1, 2]"],
            vec!["--url", "http://localhost/", "-H", "{not json"],
            vec!["--url", "http://localhost/", "--workers", "0"],
            vec!["--url", "http://localhost/", "-n", "0"],
            vec!["--url", "http://localhost/", "--timeout", "0"],
        ] {
            let cli = parse(&args);
            assert!(cli.session_config().is_err(), "accepted {args:?}");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_run_writes_reports() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("reports");
        let url = format!("http://{addr}/");
        let cli = parse(&[
            "--url",
            url.as_str(),
            "-n",
            "5",
            "-w",
            "2",
            "--output-dir",
            out.to_str().unwrap(),
        ]);

        cli.run().await.unwrap();

        let files: Vec<_> = std::fs::read_dir(&out).unwrap().collect();
        assert_eq!(files.len(), 2);
    }
}
