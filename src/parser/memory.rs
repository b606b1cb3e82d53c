//! In-memory [`PdfSource`] for callers that already hold positioned glyphs.

use std::collections::HashSet;

use super::backend::{PdfSource, DEFAULT_PAGE_WIDTH};
use crate::error::{Error, Result};
use crate::model::{BookmarkNode, DocumentContent, Glyph, PageContent};

/// A document assembled from pages, a title and bookmarks held in memory.
///
/// # Example
///
/// ```
/// use pdftoc::model::Glyph;
/// use pdftoc::parser::{MemorySource, PdfSource};
///
/// let source = MemorySource::new()
///     .with_title("Field Guide")
///     .with_page(vec![Glyph::new('A', 72.0, 700.0, 12.0, 1)]);
/// assert_eq!(source.page_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    title: Option<String>,
    bookmarks: Vec<BookmarkNode>,
    pages: Vec<PageContent>,
    unreadable: HashSet<u32>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the metadata title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the bookmark forest.
    pub fn with_bookmarks(mut self, bookmarks: Vec<BookmarkNode>) -> Self {
        self.bookmarks = bookmarks;
        self
    }

    /// Append a US Letter page. Glyph page numbers are rewritten to match.
    pub fn with_page(self, glyphs: Vec<Glyph>) -> Self {
        self.with_sized_page(DEFAULT_PAGE_WIDTH, glyphs)
    }

    /// Append a page of the given width.
    pub fn with_sized_page(mut self, width: f32, mut glyphs: Vec<Glyph>) -> Self {
        let number = self.pages.len() as u32 + 1;
        for glyph in &mut glyphs {
            glyph.page = number;
        }
        self.pages.push(PageContent::new(number, width, glyphs));
        self
    }

    /// Mark a page whose content cannot be read.
    pub fn with_unreadable_page(mut self, page: u32) -> Self {
        self.unreadable.insert(page);
        self
    }

    fn page(&self, page: u32) -> Option<&PageContent> {
        page.checked_sub(1).and_then(|i| self.pages.get(i as usize))
    }
}

impl From<DocumentContent> for MemorySource {
    fn from(content: DocumentContent) -> Self {
        Self {
            title: content.metadata_title,
            bookmarks: content.bookmarks,
            pages: content.pages,
            unreadable: HashSet::new(),
        }
    }
}

impl PdfSource for MemorySource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_width(&self, page: u32) -> f32 {
        self.page(page).map_or(DEFAULT_PAGE_WIDTH, |p| p.width)
    }

    fn page_glyphs(&self, page: u32) -> Result<Vec<Glyph>> {
        if self.unreadable.contains(&page) {
            return Err(Error::ContentUnextractable(format!(
                "page {} is unreadable",
                page
            )));
        }
        self.page(page)
            .map(|p| p.glyphs.clone())
            .ok_or_else(|| Error::ContentUnextractable(format!("no page {}", page)))
    }

    fn metadata_title(&self) -> Result<Option<String>> {
        Ok(self.title.clone())
    }

    fn bookmarks(&self) -> Result<Vec<BookmarkNode>> {
        Ok(self.bookmarks.clone())
    }
}
