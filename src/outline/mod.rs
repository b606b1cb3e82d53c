//! Title and outline inference.
//!
//! Works on a [`DocumentContent`] snapshot and never fails: every document
//! yields a non-empty title and a (possibly empty) outline.
//!
//! The outline comes from the embedded bookmark tree when it has usable
//! entries. Otherwise it is inferred in two passes over the glyphs: the first
//! computes the document-wide average font size, the second reconstructs lines
//! page by page, keeps those the [`HeadingClassifier`] accepts, deduplicates
//! them, and ranks their font sizes into H1..H3.

mod bookmarks;
mod classify;
mod hierarchy;
mod lines;
mod resolver;
mod title;

pub use bookmarks::{flatten_bookmarks, MIN_BOOKMARK_CHARS, UNRESOLVED_PAGE};
pub use classify::{
    HeadingClassifier, HeadingContext, HeadingRule, RulePredicate, LARGE_FONT_RATIO,
    MAX_BODY_HEADING_CHARS, MAX_HEADING_CHARS, MIN_HEADING_CHARS,
};
pub use hierarchy::FontSizeHierarchy;
pub use lines::{dominant_font_size, reconstruct_lines, LineGrouping};
pub use resolver::{
    assign_levels, average_font_size, dedup_candidates, sort_candidates, OutlineResolver,
};
pub use title::{
    first_line_title, largest_font_title, metadata_title, TitleResolver, MAX_TITLE_CHARS,
    MIN_TITLE_CHARS,
};

use crate::model::{DocumentContent, DocumentResult};
use crate::parser::ParseOptions;

/// Resolve title and outline of one document snapshot.
pub fn summarize_content(content: &DocumentContent, options: &ParseOptions) -> DocumentResult {
    summarize_content_with(content, options, HeadingClassifier::new())
}

/// Like [`summarize_content`], classifying headings with `classifier`.
pub fn summarize_content_with(
    content: &DocumentContent,
    options: &ParseOptions,
    classifier: HeadingClassifier,
) -> DocumentResult {
    let title = TitleResolver::new()
        .with_line_grouping(options.line_grouping)
        .resolve(content);
    let outline = OutlineResolver::new()
        .with_classifier(classifier)
        .with_line_grouping(options.line_grouping)
        .resolve(content);

    log::debug!("Resolved '{}' with {} outline entries", title, outline.len());
    DocumentResult::new(title, outline)
}
