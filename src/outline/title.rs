//! Title resolution.

use super::lines::{reconstruct_lines, LineGrouping};
use crate::model::{DocumentContent, PageContent, UNTITLED_DOCUMENT};

/// Shortest acceptable content-derived title, in characters.
pub const MIN_TITLE_CHARS: usize = 6;

/// Longest acceptable content-derived title, in characters.
pub const MAX_TITLE_CHARS: usize = 149;

/// Picks a document title, falling back through progressively weaker sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleResolver {
    grouping: LineGrouping,
}

impl TitleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line grouping used by the first-line fallback.
    pub fn with_line_grouping(mut self, grouping: LineGrouping) -> Self {
        self.grouping = grouping;
        self
    }

    /// Resolve the title. Never empty.
    pub fn resolve(&self, content: &DocumentContent) -> String {
        let first_page = content.first_page();

        metadata_title(content)
            .or_else(|| first_page.and_then(largest_font_title))
            .or_else(|| first_page.and_then(|page| first_line_title(page, self.grouping)))
            .unwrap_or_else(|| {
                log::debug!("No usable title, using '{}'", UNTITLED_DOCUMENT);
                UNTITLED_DOCUMENT.to_string()
            })
    }
}

/// The metadata title, trimmed, if non-empty.
pub fn metadata_title(content: &DocumentContent) -> Option<String> {
    let title = content.metadata_title.as_deref()?.trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// Text set in the largest font on the page.
///
/// Glyphs of the largest size are concatenated in content order; the first
/// line of that text with an acceptable length wins.
pub fn largest_font_title(page: &PageContent) -> Option<String> {
    let largest = page
        .glyphs
        .iter()
        .map(|g| g.font_size)
        .filter(|size| size.is_finite())
        .max_by(|a, b| a.total_cmp(b))?;

    let text: String = page
        .glyphs
        .iter()
        .filter(|g| g.font_size == largest)
        .map(|g| g.ch)
        .collect();

    text.lines()
        .map(str::trim)
        .find(|line| is_title_length(line))
        .map(str::to_string)
}

/// The first reconstructed line on the page with an acceptable length.
pub fn first_line_title(page: &PageContent, grouping: LineGrouping) -> Option<String> {
    reconstruct_lines(page, grouping)
        .into_iter()
        .map(|line| line.text)
        .find(|text| is_title_length(text))
}

fn is_title_length(text: &str) -> bool {
    (MIN_TITLE_CHARS..=MAX_TITLE_CHARS).contains(&text.trim().chars().count())
}
