//! Byte-offset to subtree lookup.
//!
//! Lets editor integrations refile "whatever the cursor is in" without the
//! user writing a selector at all.

use crate::error::{RefileError, RefileResult};
use crate::parser::Document;

/// Find the heading whose subtree contains `offset`, preferring the
/// deepest enclosing heading.
///
/// Returns an index into the document's heading list.
///
/// # Errors
///
/// [`RefileError::OffsetOutOfRange`] when the offset precedes the first
/// heading or exceeds the file length.
pub fn locate(doc: &Document, offset: usize) -> RefileResult<usize> {
    let len = doc.content.len();
    if offset > len {
        return Err(RefileError::OffsetOutOfRange { offset, len });
    }
    // A cursor at end-of-file still sits in the last subtree.
    let effective = offset.min(len.saturating_sub(1));

    let mut best: Option<usize> = None;
    for (index, node) in doc.headings.iter().enumerate() {
        if node.start_offset > effective {
            break;
        }
        if effective < doc.subtree_end(index)
            && best.is_none_or(|b| doc.headings[b].level <= node.level)
        {
            best = Some(index);
        }
    }

    best.ok_or(RefileError::OffsetOutOfRange { offset, len })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_markdown;

    const DOC: &str = "preamble\n# One\nalpha\n## Inner\nbeta\n# Two\ngamma\n";

    #[test]
    fn test_locates_deepest_enclosing_subtree() {
        let doc = parse_markdown(DOC);
        let beta = DOC.find("beta").unwrap();
        assert_eq!(locate(&doc, beta).unwrap(), 1);
        let alpha = DOC.find("alpha").unwrap();
        assert_eq!(locate(&doc, alpha).unwrap(), 0);
    }

    #[test]
    fn test_heading_line_belongs_to_its_own_subtree() {
        let doc = parse_markdown(DOC);
        let two = DOC.find("# Two").unwrap();
        assert_eq!(locate(&doc, two).unwrap(), 2);
    }

    #[test]
    fn test_end_of_file_is_in_last_subtree() {
        let doc = parse_markdown(DOC);
        assert_eq!(locate(&doc, DOC.len()).unwrap(), 2);
    }

    #[test]
    fn test_offset_before_first_heading_is_out_of_range() {
        let doc = parse_markdown(DOC);
        assert!(matches!(
            locate(&doc, 3),
            Err(RefileError::OffsetOutOfRange { .. })
        ));
    }

    #[test]
    fn test_offset_past_file_length_is_out_of_range() {
        let doc = parse_markdown(DOC);
        assert!(matches!(
            locate(&doc, DOC.len() + 1),
            Err(RefileError::OffsetOutOfRange { .. })
        ));
    }
}
