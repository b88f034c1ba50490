//! reqwest-backed JSON fetcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::policies::ExponentialBackoff;
use reqwest_retry::{
    RetryTransientMiddleware, Retryable, RetryableStrategy, default_on_request_failure,
};
use serde_json::Value;
use tracing::debug;

use super::error::FetchError;

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default pause before the first retry; later retries back off exponentially.
const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// Cap on a single retry pause, as a multiple of the first.
const MAX_BACKOFF_FACTOR: u32 = 8;

/// How much of an error body to keep in messages.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Query parameters whose values must never reach the logs.
const SECRET_PARAMS: &[&str] = &["access_token", "api_key", "appid"];

/// Something that can GET a URL and hand back the parsed JSON body.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn get_json(&self, url: &Url) -> Result<Value, FetchError>;
}

/// Configuration for the HTTP fetcher.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Timeout for a single request, connect through body
    pub timeout: Duration,
    /// Total attempts per request, including the first (1 = no retries)
    pub max_attempts: u32,
    /// Pause before the first retry
    pub retry_backoff: Duration,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl FetchConfig {
    /// Create a config with defaults: 10s timeout, no retries.
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_attempts: 1,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retry transport failures, up to `max_attempts` attempts in total.
    ///
    /// Values below 1 are treated as 1.
    pub fn with_retries(mut self, max_attempts: u32, backoff: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.retry_backoff = backoff;
        self
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Retry only failures that never produced a response.
///
/// `reqwest-retry`'s default strategy also retries 5xx and 429 replies; an
/// error status here is the provider's answer and is returned as-is.
struct TransportFailuresOnly;

impl RetryableStrategy for TransportFailuresOnly {
    fn handle(&self, res: &Result<reqwest::Response, reqwest_middleware::Error>) -> Option<Retryable> {
        match res {
            Ok(_) => None,
            Err(e) => default_on_request_failure(e),
        }
    }
}

/// JSON fetcher over a pooled `reqwest::Client`.
///
/// Only transport failures are retried; an error status or a bad body is
/// returned straight away.
#[derive(Clone)]
pub struct HttpJsonFetcher {
    http: ClientWithMiddleware,
}

impl HttpJsonFetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(FetchError::network)?;

        let policy = ExponentialBackoff::builder()
            .retry_bounds(config.retry_backoff, config.retry_backoff * MAX_BACKOFF_FACTOR)
            .build_with_max_retries(config.max_attempts.max(1) - 1);

        let http = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy_and_strategy(
                policy,
                TransportFailuresOnly,
            ))
            .build();

        Ok(Self { http })
    }
}

#[async_trait]
impl JsonFetcher for HttpJsonFetcher {
    async fn get_json(&self, url: &Url) -> Result<Value, FetchError> {
        debug!(url = %redact(url), "GET");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(FetchError::middleware)?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Decode {
                message: format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    body.chars().take(MAX_ERROR_BODY_CHARS).collect::<String>()
                ),
            });
        }

        let body = response.text().await.map_err(FetchError::network)?;

        serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            message: format!("invalid JSON body: {e}"),
        })
    }
}

/// Render a URL for logging with credential query values masked.
pub fn redact(url: &Url) -> String {
    if !url
        .query_pairs()
        .any(|(k, _)| SECRET_PARAMS.contains(&k.as_ref()))
    {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if SECRET_PARAMS.contains(&k.as_ref()) {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::{Json, Router, http::StatusCode, routing::get};
    use serde_json::json;

    /// Serve `router` on an ephemeral local port and return its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn url(base: &str, path: &str) -> Url {
        Url::parse(&format!("{base}{path}")).unwrap()
    }

    fn fast_fetcher() -> HttpJsonFetcher {
        HttpJsonFetcher::new(FetchConfig::new().with_timeout(Duration::from_millis(300))).unwrap()
    }

    #[test]
    fn config_defaults() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.max_attempts, 1);
        assert!(config.user_agent.starts_with("station-server/"));
    }

    #[test]
    fn config_with_retries_floors_at_one() {
        let config = FetchConfig::new().with_retries(0, Duration::from_millis(5));
        assert_eq!(config.max_attempts, 1);

        let config = FetchConfig::new().with_retries(3, Duration::from_millis(5));
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.retry_backoff, Duration::from_millis(5));
    }

    #[test]
    fn redact_masks_credentials() {
        let u = Url::parse(
            "https://api.example.com/stops?api_key=SECRET&filter%5Blatitude%5D=42.1&appid=OTHER",
        )
        .unwrap();
        let shown = redact(&u);
        assert!(!shown.contains("SECRET"));
        assert!(!shown.contains("OTHER"));
        assert!(shown.contains("api_key=***"));
        assert!(shown.contains("appid=***"));
        assert!(shown.contains("42.1"));
    }

    #[test]
    fn redact_leaves_plain_urls_alone() {
        let u = Url::parse("https://api.sunrise-sunset.org/json?lat=1&lng=2").unwrap();
        assert_eq!(redact(&u), u.to_string());
    }

    #[tokio::test]
    async fn fetches_json() {
        let base = serve(Router::new().route("/ok", get(|| async { Json(json!({"hello": "world"})) }))).await;

        let value = fast_fetcher().get_json(&url(&base, "/ok")).await.unwrap();
        assert_eq!(value, json!({"hello": "world"}));
    }

    #[tokio::test]
    async fn error_status_is_decode_error() {
        let base = serve(Router::new().route(
            "/fail",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        ))
        .await;

        let err = fast_fetcher().get_json(&url(&base, "/fail")).await.unwrap_err();
        assert_eq!(
            err,
            FetchError::Decode {
                message: "HTTP 500: boom".into()
            }
        );
    }

    #[tokio::test]
    async fn non_json_body_is_decode_error() {
        let base = serve(Router::new().route("/text", get(|| async { "<html>hi</html>" }))).await;

        let err = fast_fetcher().get_json(&url(&base, "/text")).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[tokio::test]
    async fn timeout_is_network_error() {
        let base = serve(Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({}))
            }),
        ))
        .await;

        let err = fast_fetcher().get_json(&url(&base, "/slow")).await.unwrap_err();
        assert!(matches!(err, FetchError::Network { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn connection_refused_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = fast_fetcher()
            .get_json(&url(&format!("http://{addr}"), "/"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Network { .. }));
    }

    #[tokio::test]
    async fn retries_transport_failures_up_to_limit() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let base = serve(Router::new().route(
            "/slow",
            get(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_secs(2)).await;
                    Json(json!({}))
                }
            }),
        ))
        .await;

        let fetcher = HttpJsonFetcher::new(
            FetchConfig::new()
                .with_timeout(Duration::from_millis(200))
                .with_retries(3, Duration::from_millis(10)),
        )
        .unwrap();

        let err = fetcher.get_json(&url(&base, "/slow")).await.unwrap_err();
        assert!(matches!(err, FetchError::Network { .. }));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_error_status() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let base = serve(Router::new().route(
            "/fail",
            get(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::SERVICE_UNAVAILABLE, "down")
                }
            }),
        ))
        .await;

        let fetcher = HttpJsonFetcher::new(
            FetchConfig::new().with_retries(3, Duration::from_millis(10)),
        )
        .unwrap();

        let err = fetcher.get_json(&url(&base, "/fail")).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
