//! TEI letter parsing.
//!
//! A [`Letter`] wraps a parsed tree over the raw TEI payload the metadata
//! service returns. Parsing is lenient html5ever via the `scraper` crate,
//! which lowercases element names (`titleStmt` becomes `titlestmt`) and
//! drops the TEI `<body>` wrapper, so selection anchors on the `text`
//! element and its paragraphs.

use scraper::{Html, Selector};

use crate::error::{LetterError, Result};
use crate::text::{collapse_whitespace, join_stripped};

/// A single TEI-encoded letter record.
///
/// Both accessors are pure functions of the parsed tree: repeated calls
/// return identical results for the same payload.
pub struct Letter {
    document: Html,
}

impl Letter {
    /// Parse a raw TEI/XML payload.
    ///
    /// Parsing itself never fails (html5ever is lenient); missing
    /// structure surfaces from the accessors instead.
    pub fn new(tei_xml: &str) -> Self {
        Self {
            document: Html::parse_document(tei_xml),
        }
    }

    /// The letter's descriptive heading, e.g. "Letter from Hooker to Darwin".
    ///
    /// Selects the header's `titleStmt > title`, falling back to the first
    /// `title` element anywhere. Text nodes are joined with single spaces;
    /// spacing inside a node is preserved exactly, since canonical titles
    /// carry deliberate double spaces.
    pub fn title(&self) -> Result<String> {
        let element = self
            .select_first("titlestmt > title")
            .or_else(|| self.select_first("title"))
            .ok_or(LetterError::TitleNotFound)?;

        Ok(join_stripped(element.text()))
    }

    /// The transcription, normalized to single-spaced prose.
    ///
    /// Concatenates the paragraphs of the TEI `text` element in document
    /// order (or the element's own text when it has no paragraphs) and
    /// collapses all whitespace runs.
    pub fn transcription(&self) -> Result<String> {
        let text_element = self
            .select_first("text")
            .ok_or(LetterError::TranscriptionNotFound)?;

        let paragraph = Selector::parse("p").expect("static selector");
        let paragraphs: Vec<String> = text_element
            .select(&paragraph)
            .map(|p| p.text().collect::<String>())
            .collect();

        let raw = if paragraphs.is_empty() {
            text_element.text().collect::<String>()
        } else {
            paragraphs.join(" ")
        };

        Ok(collapse_whitespace(&raw))
    }

    fn select_first(&self, selector: &str) -> Option<scraper::ElementRef<'_>> {
        let selector = Selector::parse(selector).ok()?;
        self.document.select(&selector).next()
    }
}
