//! Integration tests for title and outline inference over in-memory documents.

use pdftoc::model::{BookmarkNode, Glyph, HeadingLevel, OutlineEntry, UNTITLED_DOCUMENT};
use pdftoc::{summarize_source, Error, MemorySource, ParseOptions};

/// Lay out `text` left to right on one baseline.
fn text(glyphs: &mut Vec<Glyph>, s: &str, y: f32, size: f32) {
    glyphs.extend(
        s.chars()
            .enumerate()
            .map(|(i, ch)| Glyph::new(ch, 72.0 + i as f32 * size * 0.5, y, size, 1)),
    );
}

const BODY: &str = "the quick brown fox jumps over the lazy dog again and again";

fn entry(level: HeadingLevel, text: &str, page: u32) -> OutlineEntry {
    OutlineEntry::new(level, text, page)
}

fn report_source() -> MemorySource {
    let mut page1 = Vec::new();
    text(&mut page1, "1 Introduction", 700.0, 18.0);
    text(&mut page1, BODY, 680.0, 10.0);
    text(&mut page1, "1.1 Scope", 660.0, 14.0);
    text(&mut page1, BODY, 640.0, 10.0);

    let mut page2 = Vec::new();
    text(&mut page2, "2 Methods", 700.0, 18.0);
    text(&mut page2, "2.1.1 Sampling Details", 680.0, 12.0);
    text(&mut page2, BODY, 660.0, 10.0);

    MemorySource::new().with_page(page1).with_page(page2)
}

#[test]
fn test_content_outline_levels_by_font_size() {
    let result = summarize_source(&report_source(), &ParseOptions::default()).unwrap();

    assert_eq!(result.title, "1 Introduction");
    assert_eq!(
        result.outline,
        vec![
            entry(HeadingLevel::H1, "1 Introduction", 1),
            entry(HeadingLevel::H2, "1.1 Scope", 1),
            entry(HeadingLevel::H1, "2 Methods", 2),
            entry(HeadingLevel::H3, "2.1.1 Sampling Details", 2),
        ]
    );
}

#[test]
fn test_metadata_title_takes_priority() {
    let source = report_source().with_title("  Field Study Report ");
    let result = summarize_source(&source, &ParseOptions::default()).unwrap();
    assert_eq!(result.title, "Field Study Report");
}

#[test]
fn test_blank_metadata_title_falls_through() {
    let source = report_source().with_title("   ");
    let result = summarize_source(&source, &ParseOptions::default()).unwrap();
    assert_eq!(result.title, "1 Introduction");
}

#[test]
fn test_bookmarks_replace_content_outline() {
    let source = report_source().with_bookmarks(vec![
        BookmarkNode::new("Overview", Some(1))
            .with_child(BookmarkNode::new("Background", Some(1)))
            .with_child(BookmarkNode::new("Goals", None)),
        BookmarkNode::new("Results", Some(2)),
    ]);

    let result = summarize_source(&source, &ParseOptions::default()).unwrap();
    assert_eq!(
        result.outline,
        vec![
            entry(HeadingLevel::H1, "Overview", 1),
            entry(HeadingLevel::H2, "Background", 1),
            entry(HeadingLevel::H2, "Goals", 1),
            entry(HeadingLevel::H1, "Results", 2),
        ]
    );
}

#[test]
fn test_repeated_running_header_kept_once() {
    let mut page1 = Vec::new();
    text(&mut page1, "Annual Report", 760.0, 10.0);
    text(&mut page1, BODY, 700.0, 10.0);
    let mut page2 = Vec::new();
    text(&mut page2, "ANNUAL REPORT", 760.0, 10.0);
    text(&mut page2, BODY, 700.0, 10.0);

    let source = MemorySource::new().with_page(page1).with_page(page2);
    let result = summarize_source(&source, &ParseOptions::default()).unwrap();

    assert_eq!(
        result.outline,
        vec![entry(HeadingLevel::H1, "Annual Report", 1)]
    );
}

#[test]
fn test_larger_heading_sorts_first_within_page() {
    let mut page = Vec::new();
    text(&mut page, "2.1 Minor Point", 700.0, 12.0);
    text(&mut page, BODY, 680.0, 10.0);
    text(&mut page, "1 Major Point", 600.0, 20.0);
    text(&mut page, BODY, 580.0, 10.0);

    let source = MemorySource::new().with_page(page);
    let result = summarize_source(&source, &ParseOptions::default()).unwrap();

    assert_eq!(
        result.outline,
        vec![
            entry(HeadingLevel::H1, "1 Major Point", 1),
            entry(HeadingLevel::H2, "2.1 Minor Point", 1),
        ]
    );
}

#[test]
fn test_fourth_size_collapses_into_h3() {
    let mut page = Vec::new();
    text(&mut page, "1 Part", 740.0, 24.0);
    text(&mut page, "1.1 Chapter", 720.0, 20.0);
    text(&mut page, "1.1.1 Section", 700.0, 16.0);
    text(&mut page, "1.1.1.1 Clause", 680.0, 13.0);
    text(&mut page, BODY, 660.0, 10.0);

    let source = MemorySource::new().with_page(page);
    let result = summarize_source(&source, &ParseOptions::default()).unwrap();

    let levels: Vec<_> = result.outline.iter().map(|e| e.level).collect();
    assert_eq!(
        levels,
        vec![
            HeadingLevel::H1,
            HeadingLevel::H2,
            HeadingLevel::H3,
            HeadingLevel::H3
        ]
    );
}

#[test]
fn test_jittered_baseline_needs_tolerance() {
    let mut page = Vec::new();
    text(&mut page, "Executive ", 700.0, 10.0);
    page.extend(
        "Summary"
            .chars()
            .enumerate()
            .map(|(i, ch)| Glyph::new(ch, 200.0 + i as f32 * 5.0, 700.2, 10.0, 1)),
    );
    text(&mut page, BODY, 650.0, 10.0);
    let source = MemorySource::new().with_page(page);

    let exact = summarize_source(&source, &ParseOptions::default()).unwrap();
    assert!(exact.outline.is_empty());

    let tolerant =
        summarize_source(&source, &ParseOptions::new().with_line_tolerance(1.0)).unwrap();
    assert_eq!(
        tolerant.outline,
        vec![entry(HeadingLevel::H1, "Executive Summary", 1)]
    );
}

#[test]
fn test_glyphless_document_is_untitled() {
    let source = MemorySource::new().with_page(Vec::new());
    let result = summarize_source(&source, &ParseOptions::default()).unwrap();

    assert_eq!(result.title, UNTITLED_DOCUMENT);
    assert!(result.outline.is_empty());
    assert!(!result.is_placeholder());
}

#[test]
fn test_document_without_pages_fails() {
    let result = summarize_source(&MemorySource::new(), &ParseOptions::default());
    assert!(matches!(result, Err(Error::ContentUnextractable(_))));
}

#[test]
fn test_unreadable_page_lenient_and_strict() {
    let mut page2 = Vec::new();
    text(&mut page2, "2 Methods", 700.0, 18.0);
    text(&mut page2, BODY, 680.0, 10.0);
    let source = MemorySource::new()
        .with_page(Vec::new())
        .with_page(page2)
        .with_unreadable_page(1);

    let lenient = summarize_source(&source, &ParseOptions::default()).unwrap();
    assert_eq!(
        lenient.outline,
        vec![entry(HeadingLevel::H1, "2 Methods", 2)]
    );

    let strict = summarize_source(&source, &ParseOptions::new().strict());
    assert!(strict.is_err());
}

#[test]
fn test_long_body_line_is_not_heading() {
    let mut page = Vec::new();
    let long = format!("Results And Discussion {}", "x".repeat(90));
    text(&mut page, &long, 700.0, 10.0);
    text(&mut page, BODY, 680.0, 10.0);

    let source = MemorySource::new().with_page(page);
    let result = summarize_source(&source, &ParseOptions::default()).unwrap();
    assert!(result.outline.is_empty());
}

#[test]
fn test_case_insensitive_duplicate_keeps_earliest_page() {
    let mut source = MemorySource::new();
    for number in 1..=5 {
        let mut page = Vec::new();
        match number {
            2 => text(&mut page, "Introduction", 700.0, 16.0),
            5 => text(&mut page, "introduction ", 700.0, 16.0),
            _ => {}
        }
        text(&mut page, BODY, 650.0, 10.0);
        text(&mut page, BODY, 630.0, 10.0);
        source = source.with_page(page);
    }

    let result = summarize_source(&source, &ParseOptions::default()).unwrap();
    assert_eq!(
        result.outline,
        vec![entry(HeadingLevel::H1, "Introduction", 2)]
    );
}

#[test]
fn test_summary_is_deterministic() {
    let source = report_source().with_title("Annual Report 2024");
    let first = summarize_source(&source, &ParseOptions::default()).unwrap();
    let second = summarize_source(&source, &ParseOptions::default()).unwrap();

    assert_eq!(first.title, "Annual Report 2024");
    assert_eq!(first.outline.len(), 4);
    assert_eq!(first, second);
}
