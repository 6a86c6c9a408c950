//! TEI letter parsing and named-entity annotation.
//!
//! Takes the raw TEI/XML a digital library serves for a manuscript letter
//! and turns it into usable text and structure: the letter's title, its
//! transcription, and - through a pluggable NER tagger - an ordered list
//! of named entities with an HTML visualization.
//!
//! # Usage
//!
//! ```rust,ignore
//! use letters::{Letter, NamedEntityDocument};
//! use letters::testing::MockNer;
//!
//! let letter = Letter::new(&tei_xml);
//! let transcription = letter.transcription()?;
//!
//! let mut doc = NamedEntityDocument::with_cleaned_text(&transcription, tagger);
//! for entity in doc.entities().await? {
//!     println!("{} [{}]", entity.text, entity.label);
//! }
//! ```
//!
//! # Modules
//!
//! - [`letter`] - TEI traversal and whitespace policy
//! - [`ner`] - annotation types, the `Ner` collaborator trait, lazy memoized
//!   computation, and HTML rendering
//! - [`text`] - pure normalizers, including scribal-abbreviation expansion
//! - [`testing`] - mock tagger for tests

pub mod error;
pub mod letter;
pub mod ner;
pub mod testing;
pub mod text;

pub use error::{LetterError, NerError, NerResult, Result};
pub use letter::Letter;
pub use ner::{EntitySpan, Iob, NamedEntityDocument, Ner, NerDoc, TaggedToken};
pub use text::clean_text;
