//! Upstream HTTP Client
//!
//! Thin wrapper around `reqwest` that enforces per-phase timeouts, caps the
//! response size and retries transient failures.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use thiserror::Error;
use tokio::time::timeout;
use tracing::debug;

use super::RetryPolicy;

// == Client Configuration ==
/// Settings for one upstream API.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Prefix for every request path, without a trailing slash
    pub base_url: String,
    pub user_agent: String,
    pub connect_timeout: Duration,
    /// Bound on streaming the response body
    pub read_timeout: Duration,
    /// Bound on sending the request until response headers arrive
    pub write_timeout: Duration,
    /// Largest response body accepted, in bytes
    pub max_body_bytes: usize,
    pub retry: RetryPolicy,
}

// == Fetch Error ==
/// Why an upstream call produced no usable body.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Upstream answered with a non-success status
    #[error("upstream responded with {status}")]
    Status { status: StatusCode, body: String },

    /// A request phase ran past its timeout
    #[error("upstream {phase} timed out")]
    Timeout { phase: &'static str },

    /// Response body exceeded the configured maximum
    #[error("upstream response exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    /// Connection or protocol failure
    #[error("upstream transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl FetchError {
    /// Server errors and rate limiting are worth another attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

// == Api Request ==
/// Description of one upstream call, replayable across retries.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path appended to the client's base URL
    pub path: String,
    pub query: Vec<(String, String)>,
    /// URL-encoded form body, if any
    pub form: Option<Vec<(String, String)>>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            form: None,
        }
    }

    pub fn post_form(path: impl Into<String>, form: Vec<(String, String)>) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            form: Some(form),
        }
    }

    /// Appends a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

// == Upstream Client ==
/// HTTP client bound to a single upstream base URL.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    config: HttpClientConfig,
}

impl UpstreamClient {
    /// Builds the underlying connection pool.
    pub fn new(config: HttpClientConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    // == Fetch ==
    /// Performs `request`, retrying transient failures, and returns the body.
    pub async fn fetch(&self, request: &ApiRequest) -> Result<Vec<u8>, FetchError> {
        self.config
            .retry
            .run(
                move |attempt| self.send_once(request, attempt),
                FetchError::is_transient,
            )
            .await
    }

    /// Like [`fetch`](Self::fetch), decoding the body as UTF-8 text.
    pub async fn fetch_text(&self, request: &ApiRequest) -> Result<String, FetchError> {
        let body = self.fetch(request).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    async fn send_once(&self, request: &ApiRequest, attempt: u32) -> Result<Vec<u8>, FetchError> {
        let url = format!("{}{}", self.config.base_url, request.path);
        debug!(method = %request.method, %url, attempt, "calling upstream");

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .query(&request.query);
        if let Some(form) = &request.form {
            builder = builder.form(form);
        }

        let response = timeout(self.config.write_timeout, builder.send())
            .await
            .map_err(|_| FetchError::Timeout { phase: "write" })??;
        let status = response.status();

        if !status.is_success() {
            let body = timeout(
                self.config.read_timeout,
                read_truncated(response, self.config.max_body_bytes),
            )
            .await
            .unwrap_or_default();
            debug!(%url, %status, bytes = body.len(), "upstream returned error status");

            return Err(FetchError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let body = timeout(
            self.config.read_timeout,
            read_capped(response, self.config.max_body_bytes),
        )
        .await
        .map_err(|_| FetchError::Timeout { phase: "read" })??;

        debug!(%url, %status, bytes = body.len(), "upstream responded");
        Ok(body)
    }
}

/// Reads at most `limit` bytes of an error body, keeping whatever arrived
/// before a read failure.
async fn read_truncated(mut response: reqwest::Response, limit: usize) -> Vec<u8> {
    let mut body = Vec::new();
    while let Ok(Some(chunk)) = response.chunk().await {
        let room = limit - body.len();
        if chunk.len() >= room {
            body.extend_from_slice(&chunk[..room]);
            break;
        }
        body.extend_from_slice(&chunk);
    }
    body
}

/// Streams the body, giving up as soon as it grows past `limit` bytes.
async fn read_capped(mut response: reqwest::Response, limit: usize) -> Result<Vec<u8>, FetchError> {
    if let Some(length) = response.content_length() {
        if length > limit as u64 {
            return Err(FetchError::BodyTooLarge { limit });
        }
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if body.len() + chunk.len() > limit {
            return Err(FetchError::BodyTooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        let status = |code: u16| FetchError::Status {
            status: StatusCode::from_u16(code).unwrap(),
            body: String::new(),
        };

        assert!(status(500).is_transient());
        assert!(status(503).is_transient());
        assert!(status(429).is_transient());
        assert!(!status(404).is_transient());
        assert!(!status(400).is_transient());
        assert!(!FetchError::Timeout { phase: "read" }.is_transient());
        assert!(!FetchError::BodyTooLarge { limit: 1 }.is_transient());
    }

    #[test]
    fn test_request_builders() {
        let request = ApiRequest::get("/textsearch/json")
            .query("query", "hotels in Delhi")
            .query("key", "k");
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.query.len(), 2);
        assert!(request.form.is_none());

        let request = ApiRequest::post_form("/interpreter", vec![("data".into(), "q".into())]);
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.form.as_ref().map(Vec::len), Some(1));
    }
}
