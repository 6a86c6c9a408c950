//! Mock fetch implementation for testing.
//!
//! Lets client tests run against canned responses without touching the
//! network, and lets callers assert how many requests were issued.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{CudlError, Result};
use crate::fetch::{Fetch, FetchResponse};

/// Mock fetch with canned `(status, body)` responses keyed by URL.
///
/// # Example
///
/// ```rust
/// use cudl_client::testing::MockFetch;
///
/// let fetch = MockFetch::new()
///     .with_response("https://example.org/a", 200, "<TEI/>")
///     .with_status("https://example.org/b", 500);
/// ```
#[derive(Default)]
pub struct MockFetch {
    /// Canned responses indexed by URL
    responses: Arc<RwLock<HashMap<String, (u16, String)>>>,
    /// URLs requested, in order
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetch {
    /// Create an empty mock; unknown URLs fail with a transport error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Can a full response for a URL (builder pattern).
    pub fn with_response(
        self,
        url: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(url.into(), (status, body.into()));
        self
    }

    /// Can a bodyless status for a URL (builder pattern).
    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.with_response(url, status, "")
    }

    /// Number of fetches issued so far.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// URLs fetched, in request order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Clear recorded calls, keeping canned responses.
    pub fn reset_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

impl Clone for MockFetch {
    fn clone(&self) -> Self {
        Self {
            responses: Arc::clone(&self.responses),
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl Fetch for MockFetch {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        self.calls.write().unwrap().push(url.to_string());

        let responses = self.responses.read().unwrap();
        match responses.get(url) {
            Some((status, body)) => Ok(FetchResponse {
                status: *status,
                body: body.clone(),
            }),
            None => Err(CudlError::Transport(
                format!("no canned response for {}", url).into(),
            )),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
