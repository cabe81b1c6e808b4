//! Heading matching: the unit of ambiguity detection.

use crate::parser::Document;

/// One candidate heading found while resolving a selector segment.
///
/// A list of these with more than one entry, for a single segment under
/// hierarchical constraints, constitutes an ambiguity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingMatch {
    /// Index into the document's heading list.
    pub index: usize,
    /// 1-indexed source line of the heading.
    pub line_number: usize,
}

/// Find every heading matching `segment`.
///
/// A heading matches when:
///
/// - its level equals `expected_level`, or `expected_level` is `None`
///   ("any"), which is permitted only when the whole selector has exactly
///   one segment;
/// - its text contains `segment` case-insensitively — contains-matching
///   trades strict precision for low-friction everyday use;
/// - it starts at or after `after_offset`, which restricts the search to
///   descendants of the previously matched heading and keeps path
///   selectors meaning tree positions instead of whole-file greps.
pub fn find_matches(
    doc: &Document,
    segment: &str,
    expected_level: Option<usize>,
    after_offset: usize,
) -> Vec<HeadingMatch> {
    let needle = segment.to_lowercase();
    doc.headings
        .iter()
        .enumerate()
        .filter(|(_, h)| expected_level.is_none_or(|level| h.level == level))
        .filter(|(_, h)| h.start_offset >= after_offset)
        .filter(|(_, h)| h.text.to_lowercase().contains(&needle))
        .map(|(index, h)| HeadingMatch {
            index,
            line_number: h.line_number,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_markdown;

    const DOC: &str = "# Work\n## Projects\n### Frontend\n## Project Alpha\n# Personal\n## Projects\n";

    #[test]
    fn test_match_is_case_insensitive_contains() {
        let doc = parse_markdown(DOC);
        let matches = find_matches(&doc, "FRONT", Some(3), 0);
        assert_eq!(matches.len(), 1);
        assert_eq!(doc.headings[matches[0].index].text, "Frontend");
    }

    #[test]
    fn test_level_restricts_matches() {
        let doc = parse_markdown(DOC);
        assert_eq!(find_matches(&doc, "work", Some(1), 0).len(), 1);
        assert_eq!(find_matches(&doc, "work", Some(2), 0).len(), 0);
    }

    #[test]
    fn test_any_level_matches_across_depths() {
        let doc = parse_markdown(DOC);
        // "project" appears at level 2 three times
        assert_eq!(find_matches(&doc, "project", None, 0).len(), 3);
    }

    #[test]
    fn test_after_offset_excludes_earlier_branches() {
        let doc = parse_markdown(DOC);
        let personal = &doc.headings[4];
        let matches = find_matches(&doc, "projects", Some(2), personal.end_offset);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].line_number, 6);
    }
}
