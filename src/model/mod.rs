//! Document model types.
//!
//! Glyphs and pages are the input side: what a PDF source hands to the
//! outline engine. Lines and candidates are intermediate. Outline entries and
//! [`DocumentResult`] are what gets emitted per document.

mod document;
mod glyph;
mod outline;

pub use document::{
    DocumentContent, DocumentResult, PageContent, PLACEHOLDER_TITLE, UNTITLED_DOCUMENT,
};
pub use glyph::{Glyph, Line};
pub use outline::{BookmarkNode, HeadingCandidate, HeadingLevel, OutlineEntry};
