//! Parsing options and configuration.

use crate::outline::LineGrouping;

/// Options for extracting and summarizing PDF documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// How glyphs are grouped into lines
    pub line_grouping: LineGrouping,

    /// Whether batch runs process documents in parallel
    pub parallel: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip pages whose content cannot be read).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable strict mode (any unreadable page fails the document).
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Set the line grouping strategy.
    pub fn with_line_grouping(mut self, grouping: LineGrouping) -> Self {
        self.line_grouping = grouping;
        self
    }

    /// Group glyphs whose baselines round to the same multiple of `epsilon`.
    pub fn with_line_tolerance(mut self, epsilon: f32) -> Self {
        self.line_grouping = LineGrouping::Tolerance(epsilon);
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            line_grouping: LineGrouping::Exact,
            parallel: true,
        }
    }
}

/// Error handling mode during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the document on any page error
    Strict,
    /// Skip unreadable pages and continue
    #[default]
    Lenient,
}
