//! Named-entity annotation over letter text.
//!
//! The actual tagging is a collaborator behind the [`Ner`] trait, so the
//! layer is tested against a gazetteer mock (see [`crate::testing::MockNer`])
//! and shipped against an LLM-backed tagger (feature `openai`). What lives
//! here is the normalized document shape - ordered, non-overlapping entity
//! spans plus token-level IOB tags - and the lazy, memoized computation
//! wrapper around the collaborator call.

pub mod viz;

#[cfg(feature = "openai")]
pub mod openai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::NerResult;
use crate::text::clean_text;

/// One recognized entity: a span of source text and its category label.
///
/// Labels are an open set defined by the tagger (PERSON, GPE, DATE,
/// ORG, ...); this library never interprets them beyond display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: String,
    /// Byte offset of the span start in the source text
    pub start: usize,
    /// Byte offset one past the span end
    pub end: usize,
}

/// IOB position of a token relative to entity spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Iob {
    /// Outside every entity
    Out,
    /// First token of an entity
    Begin,
    /// Continuation token of an entity
    Inside,
}

/// A whitespace token with its entity tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub text: String,
    /// Byte offset of the token in the source text
    pub start: usize,
    pub iob: Iob,
    /// Entity label when `iob` is not `Out`
    pub label: Option<String>,
}

/// An annotated document: the source text, its token stream, and the
/// entity spans in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NerDoc {
    text: String,
    tokens: Vec<TaggedToken>,
    spans: Vec<EntitySpan>,
}

impl NerDoc {
    /// Build a document from raw tagger output.
    ///
    /// Spans are sorted by position; a span overlapping an earlier one is
    /// dropped with a warning, so the result is always ordered and
    /// non-overlapping. Token IOB tags are derived from the surviving
    /// spans.
    pub fn new(text: impl Into<String>, mut spans: Vec<EntitySpan>) -> Self {
        let text = text.into();

        spans.sort_by_key(|s| (s.start, s.end));
        let mut kept: Vec<EntitySpan> = Vec::with_capacity(spans.len());
        for span in spans {
            match kept.last() {
                Some(prev) if span.start < prev.end => {
                    tracing::warn!(
                        text = %span.text,
                        label = %span.label,
                        start = span.start,
                        "dropping overlapping entity span"
                    );
                }
                _ => kept.push(span),
            }
        }

        let tokens = tag_tokens(&text, &kept);
        Self {
            text,
            tokens,
            spans: kept,
        }
    }

    /// The annotated source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whitespace tokens with their IOB entity tags.
    pub fn tokens(&self) -> &[TaggedToken] {
        &self.tokens
    }

    /// Entity spans in document order.
    pub fn entities(&self) -> &[EntitySpan] {
        &self.spans
    }

    /// Whether any token carries an entity tag.
    pub fn has_entity_annotations(&self) -> bool {
        self.tokens.iter().any(|t| t.iob != Iob::Out)
    }
}

/// Assign IOB tags to whitespace tokens from non-overlapping, ordered spans.
fn tag_tokens(text: &str, spans: &[EntitySpan]) -> Vec<TaggedToken> {
    whitespace_tokens(text)
        .into_iter()
        .map(|(start, word)| {
            let end = start + word.len();
            let span = spans.iter().find(|s| start >= s.start && end <= s.end);
            let (iob, label) = match span {
                Some(s) if start == s.start => (Iob::Begin, Some(s.label.clone())),
                Some(s) => (Iob::Inside, Some(s.label.clone())),
                None => (Iob::Out, None),
            };
            TaggedToken {
                text: word.to_string(),
                start,
                iob,
                label,
            }
        })
        .collect()
}

/// Split on whitespace, keeping byte offsets.
fn whitespace_tokens(text: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                out.push((s, &text[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        out.push((s, &text[s..]));
    }
    out
}

/// NER collaborator trait.
///
/// Implementations own tokenization, model weights, and inference; the
/// contract here is only "annotate(text) produces a document". Backend
/// failures pass through as [`crate::error::NerError::Backend`] without
/// interpretation.
#[async_trait]
pub trait Ner: Send + Sync {
    /// Annotate `text`, returning the entity spans found in it.
    async fn annotate(&self, text: &str) -> NerResult<NerDoc>;

    /// Tagger name, for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// A text string plus its lazily computed annotation.
///
/// The annotated document is computed at most once per instance: the memo
/// is an explicit `Option` checked before the collaborator call, and a
/// failed annotation leaves it empty so nothing half-computed is ever
/// observable. If the underlying text changes, construct a new instance -
/// there is no invalidation path.
pub struct NamedEntityDocument<N: Ner> {
    text: String,
    tagger: N,
    doc: Option<NerDoc>,
}

impl<N: Ner> NamedEntityDocument<N> {
    /// Wrap `text` as-is.
    pub fn new(text: impl Into<String>, tagger: N) -> Self {
        Self {
            text: text.into(),
            tagger,
            doc: None,
        }
    }

    /// Wrap `raw` after expanding scribal abbreviations via
    /// [`clean_text`].
    pub fn with_cleaned_text(raw: &str, tagger: N) -> Self {
        Self::new(clean_text(raw), tagger)
    }

    /// The text that will be (or was) annotated.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The annotated document, computing it on first call.
    pub async fn doc(&mut self) -> NerResult<&NerDoc> {
        if self.doc.is_none() {
            tracing::debug!(
                tagger = self.tagger.name(),
                chars = self.text.len(),
                "annotating text"
            );
            let doc = self.tagger.annotate(&self.text).await?;
            tracing::debug!(entities = doc.entities().len(), "annotation complete");
            self.doc = Some(doc);
        }
        // populated above; errors return early and leave the memo empty
        Ok(self.doc.as_ref().expect("memoized annotation"))
    }

    /// Entity spans in document order, annotating on first call.
    pub async fn entities(&mut self) -> NerResult<&[EntitySpan]> {
        Ok(self.doc().await?.entities())
    }

    /// HTML visualization of the annotated entities, annotating on first
    /// call. See [`viz::render_entities_html`].
    pub async fn viz_html(&mut self) -> NerResult<String> {
        Ok(viz::render_entities_html(self.doc().await?))
    }
}
