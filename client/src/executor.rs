//! reqwest-backed request executor

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use thiserror::Error;
use tracing::trace;

use stress_bench_core::{ErrorKind, HttpMethod, RequestExecutor, RequestOutcome, RequestSpec};

use crate::classify::classify_reqwest_error;

/// Errors raised while constructing the HTTP client
#[derive(Debug, Error)]
pub enum ClientError {
    /// reqwest refused the client configuration
    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Connection-level client settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// `User-Agent` sent unless the request headers override it
    pub user_agent: String,
    /// Whether proxy settings are read from the environment
    pub use_system_proxy: bool,
    /// Idle connections kept per host
    pub pool_max_idle_per_host: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("stress-bench/", env!("CARGO_PKG_VERSION")).to_string(),
            use_system_proxy: true,
            pool_max_idle_per_host: 64,
        }
    }
}

/// Executes requests with a shared, pooled [`reqwest::Client`]
///
/// The client is cloned cheaply into every worker through the `Arc` the pool
/// holds; connections are reused across workers.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
}

impl HttpExecutor {
    /// Executor with default client settings
    pub fn new() -> Result<Self, ClientError> {
        Self::with_config(ClientConfig::default())
    }

    /// Executor built from explicit client settings
    pub fn with_config(config: ClientConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent)
            .pool_max_idle_per_host(config.pool_max_idle_per_host);
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    fn prepare(&self, spec: &RequestSpec) -> Option<RequestBuilder> {
        let headers = header_map(spec)?;
        Some(
            self.client
                .request(method_of(spec.method), spec.url.clone())
                .headers(headers),
        )
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    fn name(&self) -> &str {
        "http"
    }

    async fn execute(&self, spec: &RequestSpec) -> RequestOutcome {
        let Some(request) = self.prepare(spec) else {
            return RequestOutcome::failure(ErrorKind::Other, Duration::ZERO);
        };

        let start = Instant::now();
        let result = tokio::time::timeout(spec.timeout, send_and_drain(request)).await;
        let elapsed = start.elapsed();

        match result {
            Ok(Ok(status)) => RequestOutcome::success(status, elapsed),
            Ok(Err(err)) => {
                let kind = classify_reqwest_error(&err);
                trace!("Request to {} failed ({}): {}", spec.url, kind, err);
                RequestOutcome::failure(kind, elapsed)
            }
            Err(_) => RequestOutcome::failure(ErrorKind::Timeout, elapsed),
        }
    }
}

/// Send the request and read the body to the end
async fn send_and_drain(request: RequestBuilder) -> Result<u16, reqwest::Error> {
    let mut response = request.send().await?;
    let status = response.status().as_u16();
    while response.chunk().await?.is_some() {}
    Ok(status)
}

fn method_of(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Head => Method::HEAD,
    }
}

// Headers are validated with the session config; None only for a spec that
// skipped validation.
fn header_map(spec: &RequestSpec) -> Option<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(spec.headers.len());
    for (name, value) in &spec.headers {
        let name = HeaderName::from_bytes(name.as_bytes()).ok()?;
        let value = HeaderValue::from_str(value).ok()?;
        headers.insert(name, value);
    }
    Some(headers)
}
