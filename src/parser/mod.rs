//! Markdown parsing and document structure extraction.
//!
//! This module scans markdown content into an ordered list of heading
//! nodes with exact byte spans. Offsets are computed by tracking
//! cumulative bytes per line, not by any higher-level AST, so that later
//! byte-level splicing is exact.

mod document;
pub mod utils;

pub use document::{Document, HeadingNode};

use crate::error::{RefileError, RefileResult};
use std::path::Path;
use utils::{FenceState, heading_level, strip_markdown_inline};

/// Parse a markdown file and extract its structure.
///
/// # Errors
///
/// Returns [`RefileError::Io`] with the path attached if the file cannot
/// be read.
pub fn parse_file(path: &Path) -> RefileResult<Document> {
    let content =
        std::fs::read_to_string(path).map_err(|source| RefileError::io(path, source))?;
    Ok(parse_markdown(&content))
}

/// Parse markdown content and extract headings with byte offsets.
///
/// Recognizes ATX headings only (a `#` run of 1-6 at line start followed
/// by whitespace); setext headings are not headings here. Lines inside
/// fenced code blocks are skipped. Parsing the same content twice yields
/// identical node sequences.
pub fn parse_markdown(content: &str) -> Document {
    let mut headings = Vec::new();
    let mut offset = 0;
    let mut fences = FenceState::default();

    for (i, line) in content.split_inclusive('\n').enumerate() {
        if !fences.observe(line) {
            if let Some(level) = heading_level(line) {
                let text = strip_markdown_inline(line[level..].trim())
                    .trim()
                    .to_string();
                headings.push(HeadingNode {
                    level,
                    text,
                    start_offset: offset,
                    end_offset: offset + line.len(),
                    line_number: i + 1,
                });
            }
        }
        offset += line.len();
    }

    Document::new(content.to_string(), headings)
}
