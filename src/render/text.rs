//! Plain-text table of contents.

use crate::model::DocumentResult;

/// Column at which page numbers end.
const TOC_WIDTH: usize = 72;

/// Fewest leader dots between heading text and page number.
const MIN_LEADER: usize = 3;

/// Render a document result as a plain-text table of contents.
///
/// The title comes first, underlined, then one line per entry indented two
/// spaces per level below H1, with the page number right-aligned after a dot
/// leader.
pub fn to_toc(result: &DocumentResult) -> String {
    let mut output = String::new();
    output.push_str(&result.title);
    output.push('\n');
    output.push_str(&"=".repeat(result.title.chars().count()));
    output.push('\n');

    if result.outline.is_empty() {
        output.push_str("(no headings)\n");
        return output;
    }

    for entry in &result.outline {
        let indent = "  ".repeat(entry.level.depth() - 1);
        let page = entry.page.to_string();
        let used = indent.len() + entry.text.chars().count() + page.len() + 2;
        let dots = TOC_WIDTH.saturating_sub(used).max(MIN_LEADER);

        output.push_str(&indent);
        output.push_str(&entry.text);
        output.push(' ');
        output.push_str(&".".repeat(dots));
        output.push(' ');
        output.push_str(&page);
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, OutlineEntry};

    #[test]
    fn test_to_toc() {
        let result = DocumentResult::new(
            "Guide",
            vec![
                OutlineEntry::new(HeadingLevel::H1, "Intro", 1),
                OutlineEntry::new(HeadingLevel::H3, "Detail", 12),
            ],
        );

        let toc = to_toc(&result);
        let lines: Vec<&str> = toc.lines().collect();
        assert_eq!(lines[0], "Guide");
        assert_eq!(lines[1], "=====");
        assert!(lines[2].starts_with("Intro ..."));
        assert!(lines[2].ends_with(" 1"));
        assert!(lines[3].starts_with("    Detail ..."));
        assert!(lines[3].ends_with(" 12"));
        assert_eq!(lines[2].chars().count(), TOC_WIDTH);
        assert_eq!(lines[3].chars().count(), TOC_WIDTH);
    }

    #[test]
    fn test_long_heading_keeps_minimum_leader() {
        let text = "x".repeat(100);
        let result = DocumentResult::new("T", vec![OutlineEntry::new(HeadingLevel::H1, &text, 3)]);
        let toc = to_toc(&result);
        assert!(toc.contains(&format!("{} ... 3", text)));
    }

    #[test]
    fn test_empty_outline() {
        let toc = to_toc(&DocumentResult::new("Untitled Document", Vec::new()));
        assert!(toc.ends_with("(no headings)\n"));
    }
}
