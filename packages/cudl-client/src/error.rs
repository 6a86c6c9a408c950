//! Typed errors for the CUDL client.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can
//! distinguish "bad reference" from "page not fetched" from "no such image".

use thiserror::Error;

/// Errors that can occur when resolving or fetching CUDL resources.
#[derive(Debug, Error)]
pub enum CudlError {
    /// The landing-page URL contains no recognizable accession identifier
    #[error("no accession identifier in URL: {url}")]
    MalformedReference { url: String },

    /// The service answered with a non-success status
    #[error("file not found at {url} (HTTP {status})")]
    FileNotFoundAtUrl { url: String, status: u16 },

    /// The image service has no scan at the derived identifier
    #[error("no image at {url}")]
    ImageNotFound { url: String },

    /// The request never produced a status (connect failure, timeout, TLS)
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for CUDL client operations.
pub type Result<T> = std::result::Result<T, CudlError>;
