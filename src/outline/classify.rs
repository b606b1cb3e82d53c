//! Heading classification.
//!
//! A line is a heading when it passes the length gate and at least one rule
//! of an ordered rule table matches. The built-in table combines lexical cues
//! (numbering, casing) with a font-size-relative-to-document signal.

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::Line;

/// Shortest heading, in characters.
pub const MIN_HEADING_CHARS: usize = 3;

/// Longest heading, in characters.
pub const MAX_HEADING_CHARS: usize = 150;

/// Lines longer than this are body text unless they end with `:`.
pub const MAX_BODY_HEADING_CHARS: usize = 100;

/// Ratio over the document average font size that marks a line as a heading.
pub const LARGE_FONT_RATIO: f32 = 1.1;

/// Document-level facts a rule may consult.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingContext {
    /// Mean glyph font size across the whole document
    pub average_font_size: f32,
    /// Width of the page the line sits on
    pub page_width: f32,
}

/// Signature of a custom rule predicate.
pub type RulePredicate = fn(&Line, &HeadingContext) -> bool;

/// What a rule tests.
#[derive(Debug, Clone)]
enum RuleKind {
    /// The trimmed line text matches a regular expression.
    Pattern(Regex),
    /// The dominant font size exceeds `ratio × average_font_size`.
    FontSizeRatio(f32),
    /// Arbitrary predicate.
    Custom(RulePredicate),
}

/// One named entry of the rule table.
#[derive(Debug, Clone)]
pub struct HeadingRule {
    name: &'static str,
    kind: RuleKind,
}

impl HeadingRule {
    /// A rule matching the line text against `pattern`.
    pub fn pattern(name: &'static str, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| Error::Other(format!("invalid heading rule '{}': {}", name, e)))?;
        Ok(Self {
            name,
            kind: RuleKind::Pattern(regex),
        })
    }

    /// A rule matching lines whose font is `ratio` times the document average.
    pub fn font_size_ratio(name: &'static str, ratio: f32) -> Self {
        Self {
            name,
            kind: RuleKind::FontSizeRatio(ratio),
        }
    }

    /// A rule backed by an arbitrary predicate.
    pub fn custom(name: &'static str, predicate: RulePredicate) -> Self {
        Self {
            name,
            kind: RuleKind::Custom(predicate),
        }
    }

    /// Rule name, used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the rule matches `line`.
    pub fn matches(&self, line: &Line, ctx: &HeadingContext) -> bool {
        match &self.kind {
            RuleKind::Pattern(re) => re.is_match(line.text.trim()),
            RuleKind::FontSizeRatio(ratio) => {
                line.dominant_font_size > ctx.average_font_size * ratio
            }
            RuleKind::Custom(predicate) => predicate(line, ctx),
        }
    }
}

/// Built-in lexical rules, in evaluation order.
const BUILTIN_PATTERNS: &[(&str, &str)] = &[
    // "1 Introduction", "2. Scope"
    ("numbered-section", r"^\d+\.?\s+"),
    // "Executive Summary"
    ("title-case", r"^[A-Z][a-z]*\s+[A-Z]"),
    // "TABLE OF CONTENTS"
    ("all-caps", r"^[A-Z\s]+$"),
    // "2.1 Goals", "A.3"
    ("dotted-section", r"^\w+\.\d+"),
];

/// Decides whether a line is a heading.
#[derive(Debug, Clone)]
pub struct HeadingClassifier {
    rules: Vec<HeadingRule>,
}

impl HeadingClassifier {
    /// Classifier with the built-in rule table.
    pub fn new() -> Self {
        let mut rules: Vec<HeadingRule> = BUILTIN_PATTERNS
            .iter()
            .map(|&(name, pattern)| {
                HeadingRule::pattern(name, pattern).expect("built-in heading pattern compiles")
            })
            .collect();
        rules.push(HeadingRule::font_size_ratio("large-font", LARGE_FONT_RATIO));
        Self { rules }
    }

    /// Classifier with no rules: only custom rules added later can match.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule to the end of the table.
    pub fn with_rule(mut self, rule: HeadingRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// The rule table in evaluation order.
    pub fn rules(&self) -> &[HeadingRule] {
        &self.rules
    }

    /// Whether `line` is a heading.
    pub fn is_heading(&self, line: &Line, ctx: &HeadingContext) -> bool {
        self.matching_rule(line, ctx).is_some()
    }

    /// The first rule that accepts `line`, or `None` if the line is not a heading.
    pub fn matching_rule(&self, line: &Line, ctx: &HeadingContext) -> Option<&HeadingRule> {
        if !passes_length_gate(&line.text) {
            return None;
        }
        self.rules.iter().find(|rule| rule.matches(line, ctx))
    }
}

impl Default for HeadingClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Length limits every heading must satisfy before any rule is consulted.
fn passes_length_gate(text: &str) -> bool {
    let text = text.trim();
    let len = text.chars().count();
    if !(MIN_HEADING_CHARS..=MAX_HEADING_CHARS).contains(&len) {
        return false;
    }
    len <= MAX_BODY_HEADING_CHARS || text.ends_with(':')
}
