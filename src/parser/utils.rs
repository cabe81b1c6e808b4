//! Utility functions for markdown parsing.
//!
//! Shared helper functions used by the structure reader and the level
//! transformer, so both recognize exactly the same heading lines.

/// Strip inline markdown formatting (bold, italic, code, strikethrough) from text.
///
/// Heading text is stored stripped so selectors match what the user sees,
/// not the raw markup: the segment `bold title` matches `## **Bold** Title`.
///
/// Handles: `**bold**`, `__bold__`, `*italic*`, `_italic_` (with snake_case
/// protection), `` `code` ``, and `~~strikethrough~~`.
///
/// # Examples
///
/// ```
/// # use jot::parser::utils::strip_markdown_inline;
/// assert_eq!(strip_markdown_inline("**bold** text"), "bold text");
/// assert_eq!(strip_markdown_inline("`code` here"), "code here");
/// assert_eq!(strip_markdown_inline("snake_case_var"), "snake_case_var");
/// ```
pub fn strip_markdown_inline(text: &str) -> String {
    use regex::Regex;
    use std::sync::OnceLock;

    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    let patterns = PATTERNS.get_or_init(|| {
        vec![
            (Regex::new(r"~~(.+?)~~").unwrap(), "$1"),
            (Regex::new(r"\*\*(.+?)\*\*").unwrap(), "$1"),
            (Regex::new(r"__(.+?)__").unwrap(), "$1"),
            (Regex::new(r"`([^`]+)`").unwrap(), "$1"),
            (Regex::new(r"\*(.+?)\*").unwrap(), "$1"),
            (
                Regex::new(r"(^|[^a-zA-Z0-9])_([^_]+)_([^a-zA-Z0-9]|$)").unwrap(),
                "$1$2$3",
            ),
        ]
    });

    let mut result = text.to_string();
    for (pattern, replacement) in patterns {
        result = pattern.replace_all(&result, *replacement).to_string();
    }
    result
}

/// Extract the heading level from a raw line.
///
/// ATX-style only: a `#` run of 1-6 starting at column 0, followed by
/// whitespace. Indented and setext headings are not recognized.
///
/// # Examples
///
/// ```
/// # use jot::parser::utils::heading_level;
/// assert_eq!(heading_level("# Title"), Some(1));
/// assert_eq!(heading_level("## Section"), Some(2));
/// assert_eq!(heading_level("not a heading"), None);
/// assert_eq!(heading_level("#NoSpace"), None);
/// ```
pub fn heading_level(line: &str) -> Option<usize> {
    let mut level = 0;

    for ch in line.chars() {
        if ch == '#' {
            level += 1;
        } else if ch.is_whitespace() {
            return if level > 0 && level <= 6 {
                Some(level)
            } else {
                None
            };
        } else {
            break;
        }
    }

    None
}

/// Tracks fenced code blocks so `#` lines inside fences are never headings.
///
/// A fence opened with backticks only closes on backticks, and likewise for
/// tildes, matching how fenced blocks nest in practice.
#[derive(Debug, Default)]
pub struct FenceState {
    open: Option<char>,
}

impl FenceState {
    /// Feed one raw line. Returns `true` when the line opens, closes, or
    /// sits inside a fence and must not be scanned for a heading marker.
    pub fn observe(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        let marker = if trimmed.starts_with("```") {
            Some('`')
        } else if trimmed.starts_with("~~~") {
            Some('~')
        } else {
            None
        };

        match (self.open, marker) {
            (None, Some(m)) => {
                self.open = Some(m);
                true
            }
            (Some(open), Some(m)) if open == m => {
                self.open = None;
                true
            }
            (Some(_), _) => true,
            (None, None) => false,
        }
    }
}
