//! Fetcher error types.

/// Errors from fetching a JSON document over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Transport failure: DNS, connection refused, timeout, truncated body
    #[error("network error: {message}")]
    Network { message: String },

    /// Non-success HTTP status or a body that is not valid JSON
    #[error("decode error: {message}")]
    Decode { message: String },
}

impl FetchError {
    pub(crate) fn network(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else {
            err.to_string()
        };
        FetchError::Network { message }
    }

    pub(crate) fn middleware(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(e) => Self::network(e),
            reqwest_middleware::Error::Middleware(e) => FetchError::Network {
                message: format!("{e:#}"),
            },
        }
    }

    /// Whether retrying the same request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Network { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FetchError::Network {
            message: "connection refused".into(),
        };
        assert_eq!(err.to_string(), "network error: connection refused");

        let err = FetchError::Decode {
            message: "HTTP 503: unavailable".into(),
        };
        assert_eq!(err.to_string(), "decode error: HTTP 503: unavailable");
    }

    #[test]
    fn only_network_is_transient() {
        assert!(FetchError::Network { message: String::new() }.is_transient());
        assert!(!FetchError::Decode { message: String::new() }.is_transient());
    }
}
