//! Document-level types.

use super::{BookmarkNode, Glyph, OutlineEntry};
use serde::{Deserialize, Serialize};

/// Title emitted when no metadata or content heuristic yields one.
pub const UNTITLED_DOCUMENT: &str = "Untitled Document";

/// Title of the placeholder record emitted for documents that failed outright.
pub const PLACEHOLDER_TITLE: &str = "Document";

/// The summary emitted for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Best-guess document title, never empty
    pub title: String,

    /// Ordered heading outline
    pub outline: Vec<OutlineEntry>,
}

impl DocumentResult {
    /// Create a new result.
    pub fn new(title: impl Into<String>, outline: Vec<OutlineEntry>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// The minimal valid record for a document that could not be processed.
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_TITLE, Vec::new())
    }

    /// Whether this is the placeholder record.
    pub fn is_placeholder(&self) -> bool {
        self.title == PLACEHOLDER_TITLE && self.outline.is_empty()
    }
}

/// One page of extracted content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points
    pub width: f32,

    /// Glyphs in content-stream order
    pub glyphs: Vec<Glyph>,
}

impl PageContent {
    /// Create a new page.
    pub fn new(number: u32, width: f32, glyphs: Vec<Glyph>) -> Self {
        Self {
            number,
            width,
            glyphs,
        }
    }
}

/// Everything the outline engine reads from a document, extracted once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentContent {
    /// Title from the document information dictionary, untrimmed
    pub metadata_title: Option<String>,

    /// Embedded bookmark forest
    pub bookmarks: Vec<BookmarkNode>,

    /// Pages in document order
    pub pages: Vec<PageContent>,
}

impl DocumentContent {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// The first page, if any.
    pub fn first_page(&self) -> Option<&PageContent> {
        self.pages.first()
    }

    /// Total glyphs across all pages.
    pub fn glyph_count(&self) -> usize {
        self.pages.iter().map(|p| p.glyphs.len()).sum()
    }

    /// Iterate over every glyph in document order.
    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> {
        self.pages.iter().flat_map(|p| p.glyphs.iter())
    }
}
