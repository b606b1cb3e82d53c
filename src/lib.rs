//! # pdftoc
//!
//! Infer a document title and a three-level heading outline from PDF files.
//!
//! Embedded bookmarks are used when present. Otherwise headings are found
//! from the text itself: glyphs are grouped into lines, lines are classified
//! by lexical cues and relative font size, and the distinct heading sizes are
//! ranked into H1, H2 and H3.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdftoc::{render, summarize_file};
//!
//! fn main() -> pdftoc::Result<()> {
//!     let result = summarize_file("document.pdf")?;
//!     println!("{}", render::to_json(&result, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Batch processing
//!
//! ```no_run
//! use pdftoc::batch::{process_dir, BatchOptions};
//!
//! let report = process_dir(&BatchOptions::new("input", "output"))?;
//! println!("{} of {} summarized", report.summarized(), report.len());
//! # Ok::<(), pdftoc::Error>(())
//! ```

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use batch::{BatchEntry, BatchOptions, BatchOutcome, BatchReport};
pub use detect::{detect_version_from_bytes, detect_version_from_path, is_pdf_bytes};
pub use error::{Error, Result};
pub use model::{
    BookmarkNode, DocumentContent, DocumentResult, Glyph, HeadingLevel, Line, OutlineEntry,
    PageContent,
};
pub use outline::{
    summarize_content, summarize_content_with, HeadingClassifier, HeadingRule, LineGrouping,
    OutlineResolver, TitleResolver,
};
pub use parser::{ErrorMode, LopdfSource, MemorySource, ParseOptions, PdfSource};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Summarize a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdftoc::summarize_file;
///
/// let result = summarize_file("document.pdf").unwrap();
/// println!("{}: {} headings", result.title, result.outline.len());
/// ```
pub fn summarize_file<P: AsRef<Path>>(path: P) -> Result<DocumentResult> {
    summarize_file_with_options(path, ParseOptions::default())
}

/// Summarize a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdftoc::{summarize_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().strict().with_line_tolerance(0.5);
/// let result = summarize_file_with_options("document.pdf", options).unwrap();
/// ```
pub fn summarize_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<DocumentResult> {
    let source = LopdfSource::load_file(path)?;
    summarize_source(&source, &options)
}

/// Summarize a PDF held in memory.
pub fn summarize_bytes(data: &[u8]) -> Result<DocumentResult> {
    summarize_bytes_with_options(data, ParseOptions::default())
}

/// Summarize a PDF held in memory with custom options.
pub fn summarize_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<DocumentResult> {
    let source = LopdfSource::load_bytes(data)?;
    summarize_source(&source, &options)
}

/// Summarize a PDF read from `reader`.
///
/// # Example
///
/// ```no_run
/// use pdftoc::summarize_reader;
/// use std::fs::File;
///
/// let file = File::open("document.pdf").unwrap();
/// let result = summarize_reader(file).unwrap();
/// ```
pub fn summarize_reader<R: Read>(reader: R) -> Result<DocumentResult> {
    let source = LopdfSource::load_reader(reader)?;
    summarize_source(&source, &ParseOptions::default())
}

/// Summarize any [`PdfSource`].
pub fn summarize_source<S: PdfSource + ?Sized>(
    source: &S,
    options: &ParseOptions,
) -> Result<DocumentResult> {
    let content = parser::extract_content(source, options)?;
    Ok(summarize_content(&content, options))
}

/// Summarize a PDF file, never failing.
///
/// Any error, including a panic while parsing, yields the placeholder record
/// `{"title": "Document", "outline": []}`.
pub fn process_file<P: AsRef<Path>>(path: P, options: ParseOptions) -> DocumentResult {
    let path = path.as_ref();
    batch::summarize_contained(path, options).unwrap_or_else(|e| {
        log::warn!("{}: {}, using placeholder", path.display(), e);
        DocumentResult::placeholder()
    })
}

/// Builder for summarizing documents with custom heading rules.
///
/// # Example
///
/// ```no_run
/// use pdftoc::{HeadingRule, Summarizer};
///
/// let result = Summarizer::new()
///     .strict()
///     .with_rule(HeadingRule::pattern("appendix", r"^Appendix [A-Z]")?)
///     .summarize_file("document.pdf")?;
/// # Ok::<(), pdftoc::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Summarizer {
    options: ParseOptions,
    classifier: HeadingClassifier,
}

impl Summarizer {
    /// Create a summarizer with default options and the built-in rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the parse options.
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Enable strict mode.
    pub fn strict(mut self) -> Self {
        self.options = self.options.strict();
        self
    }

    /// Group lines by baseline tolerance instead of exact equality.
    pub fn with_line_tolerance(mut self, epsilon: f32) -> Self {
        self.options = self.options.with_line_tolerance(epsilon);
        self
    }

    /// Replace the heading classifier.
    pub fn with_classifier(mut self, classifier: HeadingClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Append a heading rule after the built-in ones.
    pub fn with_rule(mut self, rule: HeadingRule) -> Self {
        self.classifier = self.classifier.with_rule(rule);
        self
    }

    /// Summarize a PDF file.
    pub fn summarize_file<P: AsRef<Path>>(&self, path: P) -> Result<DocumentResult> {
        self.summarize_source(&LopdfSource::load_file(path)?)
    }

    /// Summarize a PDF held in memory.
    pub fn summarize_bytes(&self, data: &[u8]) -> Result<DocumentResult> {
        self.summarize_source(&LopdfSource::load_bytes(data)?)
    }

    /// Summarize any [`PdfSource`].
    pub fn summarize_source<S: PdfSource + ?Sized>(&self, source: &S) -> Result<DocumentResult> {
        let content = parser::extract_content(source, &self.options)?;
        Ok(self.summarize_content(&content))
    }

    /// Summarize an already-extracted snapshot.
    pub fn summarize_content(&self, content: &DocumentContent) -> DocumentResult {
        outline::summarize_content_with(content, &self.options, self.classifier.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading_source() -> MemorySource {
        let glyphs = "appendix notes"
            .chars()
            .enumerate()
            .map(|(i, ch)| Glyph::new(ch, 72.0 + i as f32 * 5.0, 700.0, 10.0, 1))
            .collect();
        MemorySource::new().with_page(glyphs)
    }

    #[test]
    fn test_process_file_missing_is_placeholder() {
        let result = process_file("/definitely/not/here.pdf", ParseOptions::default());
        assert!(result.is_placeholder());
    }

    #[test]
    fn test_summarize_bytes_rejects_non_pdf() {
        assert!(matches!(
            summarize_bytes(b"hello"),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_summarizer_custom_rule() {
        fn starts_with_appendix(line: &Line, _: &outline::HeadingContext) -> bool {
            line.text.starts_with("appendix")
        }

        let source = heading_source();
        let plain = Summarizer::new().summarize_source(&source).unwrap();
        assert!(plain.outline.is_empty());

        let custom = Summarizer::new()
            .with_rule(HeadingRule::custom("appendix", starts_with_appendix))
            .summarize_source(&source)
            .unwrap();
        assert_eq!(
            custom.outline,
            vec![OutlineEntry::new(HeadingLevel::H1, "appendix notes", 1)]
        );
    }
}
