//! Outline resolution: bookmarks first, content analysis otherwise.

use std::cmp::Ordering;
use std::collections::HashSet;

use super::bookmarks::flatten_bookmarks;
use super::classify::{HeadingClassifier, HeadingContext};
use super::hierarchy::FontSizeHierarchy;
use super::lines::{reconstruct_lines, LineGrouping};
use crate::model::{DocumentContent, HeadingCandidate, OutlineEntry, PageContent};

/// Candidates whose normalized text has this many characters or fewer are dropped.
const MIN_DEDUP_KEY_CHARS: usize = 2;

/// Builds the outline of one document.
#[derive(Debug, Clone, Default)]
pub struct OutlineResolver {
    classifier: HeadingClassifier,
    grouping: LineGrouping,
}

impl OutlineResolver {
    /// Resolver with the built-in heading rules and exact line grouping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom heading classifier.
    pub fn with_classifier(mut self, classifier: HeadingClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Set the line grouping strategy.
    pub fn with_line_grouping(mut self, grouping: LineGrouping) -> Self {
        self.grouping = grouping;
        self
    }

    /// Resolve the outline: the flattened bookmark tree if it has entries,
    /// otherwise headings inferred from the page content.
    pub fn resolve(&self, content: &DocumentContent) -> Vec<OutlineEntry> {
        let from_bookmarks = flatten_bookmarks(&content.bookmarks);
        if !from_bookmarks.is_empty() {
            log::debug!("Using {} bookmark entries as outline", from_bookmarks.len());
            return from_bookmarks;
        }
        self.content_outline(&content.pages)
    }

    /// Infer an outline from glyphs alone.
    pub fn content_outline(&self, pages: &[PageContent]) -> Vec<OutlineEntry> {
        let Some(average) = average_font_size(pages) else {
            log::debug!("No sized glyphs, outline is empty");
            return Vec::new();
        };

        let candidates = self.collect_candidates(pages, average);
        let found = candidates.len();
        let unique = dedup_candidates(candidates);
        log::debug!(
            "Heading candidates: {} found, {} after dedup (average font size {:.2})",
            found,
            unique.len(),
            average
        );

        assign_levels(sort_candidates(unique))
    }

    /// Classify every line of every page, in reading order.
    pub fn collect_candidates(&self, pages: &[PageContent], average: f32) -> Vec<HeadingCandidate> {
        let mut candidates = Vec::new();

        for page in pages {
            let ctx = HeadingContext {
                average_font_size: average,
                page_width: page.width,
            };

            for line in reconstruct_lines(page, self.grouping) {
                if let Some(rule) = self.classifier.matching_rule(&line, &ctx) {
                    log::trace!(
                        "Page {}: '{}' accepted by {}",
                        page.number,
                        line.text,
                        rule.name()
                    );
                    candidates.push(HeadingCandidate {
                        text: line.text,
                        page: page.number,
                        font_size: line.dominant_font_size,
                    });
                }
            }
        }

        candidates
    }
}

/// Mean of all positive glyph font sizes across the document.
pub fn average_font_size(pages: &[PageContent]) -> Option<f32> {
    let (sum, count) = pages
        .iter()
        .flat_map(|p| p.glyphs.iter())
        .filter(|g| g.font_size > 0.0)
        .fold((0.0f64, 0usize), |(sum, count), g| {
            (sum + f64::from(g.font_size), count + 1)
        });

    if count == 0 {
        None
    } else {
        Some((sum / count as f64) as f32)
    }
}

/// Keep the first candidate for each case-insensitive, trimmed text.
pub fn dedup_candidates(candidates: Vec<HeadingCandidate>) -> Vec<HeadingCandidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| {
            let key = candidate.text.trim().to_lowercase();
            key.chars().count() > MIN_DEDUP_KEY_CHARS && seen.insert(key)
        })
        .collect()
}

/// Stable sort by page ascending, then font size descending.
pub fn sort_candidates(mut candidates: Vec<HeadingCandidate>) -> Vec<HeadingCandidate> {
    candidates.sort_by(|a, b| {
        a.page.cmp(&b.page).then_with(|| {
            b.font_size
                .partial_cmp(&a.font_size)
                .unwrap_or(Ordering::Equal)
        })
    });
    candidates
}

/// Rank the candidates' font sizes and turn them into outline entries.
pub fn assign_levels(candidates: Vec<HeadingCandidate>) -> Vec<OutlineEntry> {
    let hierarchy = FontSizeHierarchy::from_sizes(candidates.iter().map(|c| c.font_size));
    candidates
        .into_iter()
        .map(|c| OutlineEntry::new(hierarchy.level_of(c.font_size), c.text, c.page))
        .collect()
}
