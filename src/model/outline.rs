//! Outline types: heading levels, candidates, entries and bookmark trees.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Inferred nesting depth of a heading.
///
/// Serializes as `"H1"`, `"H2"` or `"H3"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top level
    H1,
    /// Second level
    H2,
    /// Third level and anything deeper
    H3,
}

impl HeadingLevel {
    /// Map a 1-based depth to a level, clamping into H1..=H3.
    pub fn from_depth(depth: usize) -> Self {
        match depth {
            0 | 1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }

    /// The 1-based depth of this level.
    pub fn depth(self) -> usize {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.depth())
    }
}

/// A line accepted by the heading classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    /// Trimmed, non-empty heading text
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// Dominant font size of the source line
    pub font_size: f32,
}

/// One entry of the final outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level
    pub level: HeadingLevel,
    /// Heading text
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new outline entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// A node of a document-embedded bookmark tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkNode {
    /// Bookmark title as stored in the document
    pub title: String,
    /// Destination page (1-indexed); `None` when the destination could not be resolved
    pub page: Option<u32>,
    /// Child bookmarks in document order
    pub children: Vec<BookmarkNode>,
}

impl BookmarkNode {
    /// Create a new bookmark without children.
    pub fn new(title: impl Into<String>, page: Option<u32>) -> Self {
        Self {
            title: title.into(),
            page,
            children: Vec::new(),
        }
    }

    /// Add a child bookmark.
    pub fn with_child(mut self, child: BookmarkNode) -> Self {
        self.children.push(child);
        self
    }

    /// Count this node and all its descendants.
    pub fn total_nodes(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(BookmarkNode::total_nodes)
            .sum::<usize>()
    }
}
