//! Line reconstruction from positioned glyphs.
//!
//! Glyphs on a page are grouped by baseline, ordered left to right, and
//! returned top to bottom. PDF user space has its origin at the bottom-left,
//! so "top to bottom" means descending `y`.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::model::{Glyph, Line, PageContent};

/// How glyph baselines are grouped into lines.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LineGrouping {
    /// Glyphs belong to the same line only if their `y0` values are equal.
    ///
    /// Sub-point jitter in `y0` splits one visual line into several.
    #[default]
    Exact,
    /// Glyphs belong to the same line if `round(y0 / epsilon)` is equal.
    Tolerance(f32),
}

impl LineGrouping {
    /// Bucket key and representative baseline for a `y0` value.
    fn bucket(self, y: f32) -> (i64, f32) {
        match self {
            LineGrouping::Tolerance(eps) if eps > 0.0 && eps.is_finite() => {
                let bucket = (y / eps).round();
                (bucket as i64, bucket * eps)
            }
            _ => {
                // 0.0 and -0.0 compare equal, so they must share a key
                let y = if y == 0.0 { 0.0 } else { y };
                (i64::from(y.to_bits()), y)
            }
        }
    }
}

/// Reconstruct the text lines of one page, top to bottom.
///
/// Lines whose text is empty after trimming are dropped.
pub fn reconstruct_lines(page: &PageContent, grouping: LineGrouping) -> Vec<Line> {
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut groups: Vec<(f32, Vec<Glyph>)> = Vec::new();

    for glyph in &page.glyphs {
        let (key, y) = grouping.bucket(glyph.y0);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push((y, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(*glyph);
    }

    groups.sort_by(|a, b| b.0.total_cmp(&a.0));

    groups
        .into_iter()
        .filter_map(|(y, mut glyphs)| {
            glyphs.sort_by(|a, b| a.x0.partial_cmp(&b.x0).unwrap_or(Ordering::Equal));

            let raw: String = glyphs.iter().map(|g| g.ch).collect();
            let text = raw.trim();
            if text.is_empty() {
                return None;
            }

            Some(Line {
                page: page.number,
                y,
                text: text.to_string(),
                dominant_font_size: dominant_font_size(&glyphs)?,
            })
        })
        .collect()
}

/// The most frequent font size among `glyphs`; ties go to the size seen first.
pub fn dominant_font_size(glyphs: &[Glyph]) -> Option<f32> {
    let mut counts: Vec<(f32, usize)> = Vec::new();
    for glyph in glyphs {
        match counts.iter_mut().find(|(size, _)| *size == glyph.font_size) {
            Some((_, count)) => *count += 1,
            None => counts.push((glyph.font_size, 1)),
        }
    }

    let mut best: Option<(f32, usize)> = None;
    for (size, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((size, count));
        }
    }
    best.map(|(size, _)| size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyphs_for(text: &str, x: f32, y: f32, size: f32) -> Vec<Glyph> {
        text.chars()
            .enumerate()
            .map(|(i, ch)| Glyph::new(ch, x + i as f32 * size * 0.5, y, size, 1))
            .collect()
    }

    fn page(glyphs: Vec<Glyph>) -> PageContent {
        PageContent::new(1, 612.0, glyphs)
    }

    #[test]
    fn test_lines_top_to_bottom() {
        let mut glyphs = glyphs_for("Body text", 72.0, 600.0, 10.0);
        glyphs.extend(glyphs_for("Heading", 72.0, 700.0, 18.0));

        let lines = reconstruct_lines(&page(glyphs), LineGrouping::Exact);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Heading");
        assert_eq!(lines[0].dominant_font_size, 18.0);
        assert_eq!(lines[1].text, "Body text");
        assert_eq!(lines[1].page, 1);
    }

    #[test]
    fn test_glyphs_ordered_by_x() {
        // "World" emitted before "Hello " in the content stream
        let mut glyphs = glyphs_for("World", 102.0, 500.0, 12.0);
        glyphs.extend(glyphs_for("Hello ", 66.0, 500.0, 12.0));

        let lines = reconstruct_lines(&page(glyphs), LineGrouping::Exact);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Hello World");
    }

    #[test]
    fn test_whitespace_only_lines_dropped() {
        let mut glyphs = glyphs_for("   ", 72.0, 650.0, 12.0);
        glyphs.extend(glyphs_for("  Kept  ", 72.0, 640.0, 12.0));

        let lines = reconstruct_lines(&page(glyphs), LineGrouping::Exact);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Kept");
    }

    #[test]
    fn test_exact_grouping_splits_jittered_baselines() {
        let mut glyphs = glyphs_for("Split", 72.0, 700.0, 12.0);
        glyphs.extend(glyphs_for("Line", 110.0, 700.2, 12.0));

        let exact = reconstruct_lines(&page(glyphs.clone()), LineGrouping::Exact);
        assert_eq!(exact.len(), 2);
        assert_eq!(exact[0].text, "Line");

        let bucketed = reconstruct_lines(&page(glyphs), LineGrouping::Tolerance(1.0));
        assert_eq!(bucketed.len(), 1);
        assert_eq!(bucketed[0].text, "SplitLine");
    }

    #[test]
    fn test_invalid_tolerance_falls_back_to_exact() {
        let mut glyphs = glyphs_for("A", 72.0, 700.0, 12.0);
        glyphs.extend(glyphs_for("B", 90.0, 700.1, 12.0));

        let lines = reconstruct_lines(&page(glyphs), LineGrouping::Tolerance(0.0));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_dominant_font_size_majority() {
        let mut glyphs = glyphs_for("ab", 0.0, 0.0, 10.0);
        glyphs.extend(glyphs_for("cde", 20.0, 0.0, 14.0));
        assert_eq!(dominant_font_size(&glyphs), Some(14.0));
    }

    #[test]
    fn test_dominant_font_size_tie_prefers_first_seen() {
        let mut glyphs = glyphs_for("ab", 0.0, 0.0, 16.0);
        glyphs.extend(glyphs_for("cd", 20.0, 0.0, 11.0));
        assert_eq!(dominant_font_size(&glyphs), Some(16.0));
        assert_eq!(dominant_font_size(&[]), None);
    }

    #[test]
    fn test_empty_page() {
        assert!(reconstruct_lines(&page(Vec::new()), LineGrouping::Exact).is_empty());
    }
}
