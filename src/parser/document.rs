//! Document model: a flat, offset-bearing heading list.
//!
//! Headings are kept as an ordered array with level and byte-span fields
//! rather than a nested tree; hierarchy is inferred from level and offset
//! ordering, which keeps byte-exact splicing simple.

use serde::Serialize;

/// One ATX heading in a parsed document.
///
/// Nodes are never mutated after creation; a new parse produces new nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingNode {
    /// Heading level (1-6).
    pub level: usize,
    /// Trimmed heading content with inline markdown stripped.
    pub text: String,
    /// Byte offset of the start of the heading line.
    pub start_offset: usize,
    /// Byte offset just past the heading line's terminating newline.
    pub end_offset: usize,
    /// 1-indexed line number in the source file.
    pub line_number: usize,
}

/// A parsed markdown document: raw content plus its ordered heading list.
///
/// Non-heading content is not modeled as nodes; it is addressed implicitly
/// via the span between two headings.
#[derive(Debug, Clone)]
pub struct Document {
    /// Raw file content.
    pub content: String,
    /// Headings in document order.
    pub headings: Vec<HeadingNode>,
}

impl Document {
    pub fn new(content: String, headings: Vec<HeadingNode>) -> Self {
        Self { content, headings }
    }

    /// End of the subtree rooted at heading `index`: the start of the next
    /// heading at the same or a shallower level, or end of file.
    pub fn subtree_end(&self, index: usize) -> usize {
        let level = self.headings[index].level;
        self.headings[index + 1..]
            .iter()
            .find(|h| h.level <= level)
            .map_or(self.content.len(), |h| h.start_offset)
    }

    /// Index of the nearest ancestor heading of `index`, if any.
    pub fn parent_of(&self, index: usize) -> Option<usize> {
        let level = self.headings[index].level;
        self.headings[..index].iter().rposition(|h| h.level < level)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse_markdown;

    #[test]
    fn test_subtree_end_stops_at_sibling() {
        let doc = parse_markdown("# A\nbody\n## B\nmore\n# C\nend\n");
        // Subtree of "A" runs until "# C".
        assert_eq!(doc.subtree_end(0), doc.headings[2].start_offset);
        // Subtree of "B" also ends at "# C" (shallower level).
        assert_eq!(doc.subtree_end(1), doc.headings[2].start_offset);
        // Last subtree runs to end of file.
        assert_eq!(doc.subtree_end(2), doc.content.len());
    }

    #[test]
    fn test_parent_of_skips_deeper_siblings() {
        let doc = parse_markdown("# A\n### deep\n## B\n### C\n");
        assert_eq!(doc.parent_of(0), None);
        assert_eq!(doc.parent_of(1), Some(0));
        assert_eq!(doc.parent_of(2), Some(0));
        assert_eq!(doc.parent_of(3), Some(2));
    }
}
