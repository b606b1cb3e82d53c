//! Positioned glyphs and reconstructed text lines.

use serde::{Deserialize, Serialize};

/// A single rendered character with its position and size.
///
/// Coordinates are in PDF user space: origin at the bottom-left of the page,
/// `y0` growing upwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    /// The character
    pub ch: char,
    /// Left edge
    pub x0: f32,
    /// Baseline
    pub y0: f32,
    /// Effective font size in points
    pub font_size: f32,
    /// Page number (1-indexed)
    pub page: u32,
}

impl Glyph {
    /// Create a new glyph.
    pub fn new(ch: char, x0: f32, y0: f32, font_size: f32, page: u32) -> Self {
        Self {
            ch,
            x0,
            y0,
            font_size,
            page,
        }
    }
}

/// A horizontal run of glyphs sharing a baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Page number (1-indexed)
    pub page: u32,
    /// Baseline of the line
    pub y: f32,
    /// Trimmed text, glyphs ordered left to right
    pub text: String,
    /// Most frequent glyph font size on the line
    pub dominant_font_size: f32,
}
