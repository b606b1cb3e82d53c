//! PDF parsing module.
//!
//! Everything the outline engine needs from a document is pulled out once,
//! through a [`PdfSource`], into an immutable [`DocumentContent`] snapshot.

mod backend;
mod glyphs;
mod memory;
mod options;

pub use backend::{decode_text_simple, LopdfSource, PdfSource, DEFAULT_PAGE_WIDTH};
pub use glyphs::{extract_page_glyphs, FontMetrics, GlyphInterpreter, Matrix};
pub use memory::MemorySource;
pub use options::{ErrorMode, ParseOptions};

use crate::error::{Error, Result};
use crate::model::{DocumentContent, PageContent};

/// Extract the per-document snapshot from a source.
///
/// A document with no pages is an error. Metadata and bookmark failures are
/// logged and treated as absent. A page whose glyphs cannot be read is empty
/// in [`ErrorMode::Lenient`] and fails the whole document in
/// [`ErrorMode::Strict`].
pub fn extract_content<S: PdfSource + ?Sized>(
    source: &S,
    options: &ParseOptions,
) -> Result<DocumentContent> {
    let page_count = source.page_count();
    if page_count == 0 {
        return Err(Error::ContentUnextractable("document has no pages".into()));
    }

    let metadata_title = source.metadata_title().unwrap_or_else(|e| {
        log::warn!("Ignoring metadata: {}", e);
        None
    });

    let bookmarks = source.bookmarks().unwrap_or_else(|e| {
        log::warn!("Ignoring bookmarks: {}", e);
        Vec::new()
    });

    let mut pages = Vec::with_capacity(page_count as usize);
    for number in 1..=page_count {
        let glyphs = match source.page_glyphs(number) {
            Ok(glyphs) => glyphs,
            Err(e) => match options.error_mode {
                ErrorMode::Strict => return Err(e),
                ErrorMode::Lenient => {
                    log::warn!("Skipping page {}: {}", number, e);
                    Vec::new()
                }
            },
        };
        pages.push(PageContent::new(number, source.page_width(number), glyphs));
    }

    log::debug!(
        "Extracted {} pages, {} bookmarks, metadata title {:?}",
        pages.len(),
        bookmarks.len(),
        metadata_title
    );

    Ok(DocumentContent {
        metadata_title,
        bookmarks,
        pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Glyph;

    #[test]
    fn test_empty_document_is_error() {
        let result = extract_content(&MemorySource::new(), &ParseOptions::default());
        assert!(matches!(result, Err(Error::ContentUnextractable(_))));
    }

    #[test]
    fn test_lenient_skips_unreadable_page() {
        let source = MemorySource::new()
            .with_page(vec![Glyph::new('a', 0.0, 0.0, 10.0, 1)])
            .with_page(vec![Glyph::new('b', 0.0, 0.0, 10.0, 2)])
            .with_unreadable_page(1);

        let content = extract_content(&source, &ParseOptions::new().lenient()).unwrap();
        assert_eq!(content.pages.len(), 2);
        assert!(content.pages[0].glyphs.is_empty());
        assert_eq!(content.pages[1].glyphs.len(), 1);
    }

    #[test]
    fn test_strict_fails_on_unreadable_page() {
        let source = MemorySource::new()
            .with_page(Vec::new())
            .with_unreadable_page(1);
        assert!(extract_content(&source, &ParseOptions::new().strict()).is_err());
    }
}
