//! Testing utilities including a mock NER tagger.
//!
//! Useful for testing annotation consumers without model weights or
//! network calls.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{NerError, NerResult};
use crate::ner::{EntitySpan, Ner, NerDoc};

/// A gazetteer-style mock tagger.
///
/// Configured with `(phrase, label)` pairs; annotation marks every
/// occurrence of each phrase in the input. Calls are recorded so tests
/// can assert memoization.
///
/// # Example
///
/// ```rust
/// use letters::testing::MockNer;
///
/// let ner = MockNer::new()
///     .with_entity("Charles Robert Darwin", "PERSON")
///     .with_entity("Shrewsbury", "GPE");
/// ```
#[derive(Default)]
pub struct MockNer {
    /// `(phrase, label)` gazetteer entries
    entities: Arc<RwLock<Vec<(String, String)>>>,
    /// Force every annotate call to fail
    fail: Arc<RwLock<bool>>,
    /// Texts annotated, in call order
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockNer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a gazetteer entry (builder pattern).
    pub fn with_entity(self, phrase: impl Into<String>, label: impl Into<String>) -> Self {
        self.entities
            .write()
            .unwrap()
            .push((phrase.into(), label.into()));
        self
    }

    /// Make every annotate call fail with a backend error.
    pub fn with_failure(self) -> Self {
        *self.fail.write().unwrap() = true;
        self
    }

    /// Stop failing annotate calls.
    pub fn recover(&self) {
        *self.fail.write().unwrap() = false;
    }

    /// Number of annotate calls made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Texts passed to annotate, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

impl Clone for MockNer {
    fn clone(&self) -> Self {
        Self {
            entities: Arc::clone(&self.entities),
            fail: Arc::clone(&self.fail),
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl Ner for MockNer {
    async fn annotate(&self, text: &str) -> NerResult<NerDoc> {
        self.calls.write().unwrap().push(text.to_string());

        if *self.fail.read().unwrap() {
            return Err(NerError::Backend("mock tagger failure".into()));
        }

        let entities = self.entities.read().unwrap();
        let mut spans = Vec::new();
        for (phrase, label) in entities.iter() {
            for (start, found) in text.match_indices(phrase.as_str()) {
                spans.push(EntitySpan {
                    text: found.to_string(),
                    label: label.clone(),
                    start,
                    end: start + found.len(),
                });
            }
        }

        Ok(NerDoc::new(text, spans))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_marks_every_occurrence() {
        let ner = MockNer::new().with_entity("Darwin", "PERSON");
        let doc = ner.annotate("Darwin wrote to Darwin's sister").await.unwrap();
        assert_eq!(doc.entities().len(), 2);
        assert_eq!(ner.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let ner = MockNer::new().with_failure();
        let err = ner.annotate("anything").await.unwrap_err();
        assert!(matches!(err, NerError::Backend(_)));

        ner.recover();
        assert!(ner.annotate("anything").await.is_ok());
        assert_eq!(ner.call_count(), 2);
    }
}
