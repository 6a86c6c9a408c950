//! Typed errors for the letters library.
//!
//! Structural errors (expected TEI element absent) are deliberately
//! distinct from the client's transport errors, so a caller can tell
//! "page not fetched" from "page fetched but not shaped like a letter".

use thiserror::Error;

/// Errors from TEI letter parsing.
#[derive(Debug, Error)]
pub enum LetterError {
    /// No title element in the TEI header
    #[error("no title element in TEI payload")]
    TitleNotFound,

    /// No transcription text element in the TEI body
    #[error("no transcription text in TEI payload")]
    TranscriptionNotFound,
}

/// Errors from the NER annotation layer.
#[derive(Debug, Error)]
pub enum NerError {
    /// The tagger backend failed; its error passes through unchanged,
    /// since annotation correctness is outside this library's contract
    #[error("NER backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Tagger configuration problem (missing API key, bad model name)
    #[error("NER config error: {0}")]
    Config(String),
}

/// Result type alias for letter parsing.
pub type Result<T> = std::result::Result<T, LetterError>;

/// Result type alias for annotation operations.
pub type NerResult<T> = std::result::Result<T, NerError>;
