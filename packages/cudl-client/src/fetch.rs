//! Fetch trait for pluggable HTTP transport.
//!
//! The client never talks to `reqwest` directly; it goes through this seam
//! so tests can substitute canned responses (see [`crate::testing::MockFetch`])
//! and callers can wrap transport policy (timeouts, proxies) without
//! touching URL or status logic.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{CudlError, Result};

/// Default request timeout for [`HttpFetch`].
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A raw response: the status code and the body text, verbatim.
///
/// No transcoding happens on the way through - the body's byte length is
/// exactly what the server sent.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    /// Whether the status is in the 2xx success range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport seam for issuing a single GET request.
///
/// Implementations own all transport policy (timeout, retries, TLS). The
/// client issues exactly one call per operation and treats any failure as
/// terminal.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Issue a GET for `url`, returning the status and body text.
    ///
    /// A non-2xx status is returned as a normal [`FetchResponse`], not an
    /// error; only failures that never produced a status (connect errors,
    /// timeouts) map to [`CudlError::Transport`].
    async fn fetch(&self, url: &str) -> Result<FetchResponse>;

    /// Implementation name, for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Fetch implementation backed by `reqwest`.
pub struct HttpFetch {
    client: reqwest::Client,
}

impl HttpFetch {
    /// Create a fetcher with the default timeout.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a fetcher with an explicit request timeout.
    ///
    /// Panics only if the TLS backend cannot initialize, matching
    /// `reqwest::Client::new`.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cudl-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");
        Self { client }
    }
}

impl Default for HttpFetch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetch for HttpFetch {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        tracing::debug!(url = %url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CudlError::Transport(Box::new(e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| CudlError::Transport(Box::new(e)))?;

        tracing::debug!(url = %url, status, bytes = body.len(), "response");
        Ok(FetchResponse { status, body })
    }

    fn name(&self) -> &str {
        "http"
    }
}
