//! Font-size hierarchy: distinct heading sizes ranked into levels.

use crate::model::HeadingLevel;

/// Distinct heading font sizes, largest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontSizeHierarchy {
    sizes: Vec<f32>,
}

impl FontSizeHierarchy {
    /// Build the hierarchy from every accepted heading's font size.
    pub fn from_sizes<I: IntoIterator<Item = f32>>(sizes: I) -> Self {
        let mut sizes: Vec<f32> = sizes.into_iter().collect();
        sizes.sort_by(|a, b| b.total_cmp(a));
        sizes.dedup_by(|a, b| a == b);
        Self { sizes }
    }

    /// Distinct sizes, descending.
    pub fn distinct_sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// 0-based rank of `size`, largest first.
    pub fn rank_of(&self, size: f32) -> Option<usize> {
        self.sizes.iter().position(|s| *s == size)
    }

    /// Level for a heading of the given size.
    ///
    /// With at most one distinct size everything is H1. Ranks beyond the
    /// third collapse into H3, as does a size the hierarchy has never seen.
    pub fn level_of(&self, size: f32) -> HeadingLevel {
        if self.sizes.len() <= 1 {
            return HeadingLevel::H1;
        }
        match self.rank_of(size) {
            Some(rank) => HeadingLevel::from_depth(rank + 1),
            None => HeadingLevel::H3,
        }
    }
}
