//! Flattening of document-embedded bookmark trees.

use crate::model::{BookmarkNode, HeadingLevel, OutlineEntry};

/// Bookmarks with this many characters or fewer are skipped (their children are not).
pub const MIN_BOOKMARK_CHARS: usize = 2;

/// Page used when a bookmark destination could not be resolved.
pub const UNRESOLVED_PAGE: u32 = 1;

/// Flatten a bookmark forest into outline entries, pre-order.
///
/// Top-level bookmarks are H1, their children H2, and everything deeper H3.
pub fn flatten_bookmarks(forest: &[BookmarkNode]) -> Vec<OutlineEntry> {
    let mut entries = Vec::new();
    let mut stack: Vec<(&BookmarkNode, usize)> = forest.iter().rev().map(|n| (n, 1)).collect();

    while let Some((node, depth)) = stack.pop() {
        let title = node.title.trim();
        if title.chars().count() > MIN_BOOKMARK_CHARS {
            entries.push(OutlineEntry::new(
                HeadingLevel::from_depth(depth),
                title,
                node.page.unwrap_or(UNRESOLVED_PAGE),
            ));
        }
        stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }

    entries
}
