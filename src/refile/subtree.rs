//! Subtree extraction: byte-exact, no re-serialization.

use crate::parser::Document;

/// A heading plus everything nested under it, as verbatim bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtree {
    /// Text of the root heading.
    pub heading: String,
    /// Level of the root heading.
    pub level: usize,
    /// Raw bytes from the heading line through the last descendant line.
    pub content: String,
    pub start_offset: usize,
    /// Start of the next heading at the same or a shallower level, or end
    /// of file.
    pub end_offset: usize,
}

/// Extract the subtree rooted at heading `index`.
///
/// Bytes are copied verbatim — no re-parsing or re-serialization of inner
/// content — so code blocks, tables, and literal whitespace survive
/// untouched.
pub fn extract(doc: &Document, index: usize) -> Subtree {
    let node = &doc.headings[index];
    let end = doc.subtree_end(index);
    Subtree {
        heading: node.text.clone(),
        level: node.level,
        content: doc.content[node.start_offset..end].to_string(),
        start_offset: node.start_offset,
        end_offset: end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_markdown;

    const DOC: &str = "# One\nalpha\n## Inner\nbeta\n# Two\ngamma\n";

    #[test]
    fn test_extract_includes_nested_headings() {
        let doc = parse_markdown(DOC);
        let sub = extract(&doc, 0);
        assert_eq!(sub.heading, "One");
        assert_eq!(sub.content, "# One\nalpha\n## Inner\nbeta\n");
    }

    #[test]
    fn test_extract_runs_to_end_of_file() {
        let doc = parse_markdown(DOC);
        let sub = extract(&doc, 2);
        assert_eq!(sub.content, "# Two\ngamma\n");
        assert_eq!(sub.end_offset, DOC.len());
    }

    #[test]
    fn test_extraction_is_lossless() {
        let doc = parse_markdown(DOC);
        for index in 0..doc.headings.len() {
            let sub = extract(&doc, index);
            let rebuilt = format!(
                "{}{}{}",
                &DOC[..sub.start_offset],
                sub.content,
                &DOC[sub.end_offset..]
            );
            assert_eq!(rebuilt, DOC);
        }
    }

    #[test]
    fn test_code_fence_content_is_preserved_verbatim() {
        let md = "# Top\n```\n# not a heading\n\ttabs\t \n```\n# Next\n";
        let doc = parse_markdown(md);
        let sub = extract(&doc, 0);
        assert_eq!(sub.content, "# Top\n```\n# not a heading\n\ttabs\t \n```\n");
    }
}
