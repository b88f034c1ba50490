//! Mock fetcher for testing without network access.
//!
//! Serves canned JSON documents (or canned failures) keyed by URL prefix,
//! and records every URL it was asked for so tests can assert on call
//! counts.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;

use super::client::JsonFetcher;
use super::error::FetchError;

#[derive(Debug, Clone)]
enum Reply {
    Json(Value),
    Fail(FetchError),
}

/// Mock fetcher that serves pre-registered replies.
///
/// Routes are matched by prefix against the full URL string, in the order
/// they were registered. Unmatched URLs produce a `Network` error, the same
/// outcome as an unreachable host.
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    routes: Arc<Mutex<Vec<(String, Reply)>>>,
    calls: Arc<Mutex<Vec<Url>>>,
}

impl MockFetcher {
    /// Create a mock with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to URLs starting with `prefix` with a JSON document.
    pub fn with_json(self, prefix: impl Into<String>, body: Value) -> Self {
        self.push(prefix.into(), Reply::Json(body));
        self
    }

    /// Reply to URLs starting with `prefix` with an error.
    pub fn with_error(self, prefix: impl Into<String>, error: FetchError) -> Self {
        self.push(prefix.into(), Reply::Fail(error));
        self
    }

    fn push(&self, prefix: String, reply: Reply) {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((prefix, reply));
    }

    /// Total number of requests made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Number of requests whose URL starts with `prefix`.
    pub fn calls_to(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|u| u.as_str().starts_with(prefix))
            .count()
    }

    /// Every URL requested so far, in order.
    pub fn requested_urls(&self) -> Vec<Url> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl JsonFetcher for MockFetcher {
    async fn get_json(&self, url: &Url) -> Result<Value, FetchError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.clone());

        let reply = self
            .routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|(prefix, _)| url.as_str().starts_with(prefix.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Reply::Json(v)) => Ok(v),
            Some(Reply::Fail(e)) => Err(e),
            None => Err(FetchError::Network {
                message: format!("no mock route for {url}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[tokio::test]
    async fn serves_by_prefix() {
        let mock = MockFetcher::new()
            .with_json("http://a.test/one", json!({"n": 1}))
            .with_json("http://a.test/", json!({"n": 2}));

        let one = mock.get_json(&url("http://a.test/one?x=1")).await.unwrap();
        let two = mock.get_json(&url("http://a.test/two")).await.unwrap();
        assert_eq!(one, json!({"n": 1}));
        assert_eq!(two, json!({"n": 2}));
    }

    #[tokio::test]
    async fn serves_errors() {
        let mock = MockFetcher::new().with_error(
            "http://down.test/",
            FetchError::Network {
                message: "timed out".into(),
            },
        );

        let err = mock.get_json(&url("http://down.test/x")).await.unwrap_err();
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn unknown_url_is_network_error() {
        let mock = MockFetcher::new();
        let err = mock.get_json(&url("http://nowhere.test/")).await.unwrap_err();
        assert!(matches!(err, FetchError::Network { .. }));
    }

    #[tokio::test]
    async fn records_calls() {
        let mock = MockFetcher::new().with_json("http://a.test/", json!(null));
        let clone = mock.clone();

        mock.get_json(&url("http://a.test/1")).await.unwrap();
        clone.get_json(&url("http://a.test/2")).await.unwrap();
        let _ = mock.get_json(&url("http://b.test/")).await;

        assert_eq!(mock.call_count(), 3);
        assert_eq!(mock.calls_to("http://a.test/"), 2);
        assert_eq!(clone.requested_urls().len(), 3);
    }
}
