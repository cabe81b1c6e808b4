//! Insertion planning and missing-hierarchy synthesis.

use super::navigate::PathResolution;
use crate::error::{RefileError, RefileResult};
use crate::parser::Document;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// Final plan for splicing content into a destination document.
///
/// Consumed exactly once by the splice step, then discarded.
#[derive(Debug, Clone, Serialize)]
pub struct DestinationTarget {
    pub file: PathBuf,
    /// Byte offset at which new content is spliced in.
    pub insert_offset: usize,
    /// Level the moved content's top heading will take.
    pub target_level: usize,
    /// Headings to synthesize ahead of the content, shallowest first.
    pub create_segments: Vec<String>,
    pub prepend: bool,
}

/// Compute where, and at what level, new content lands in `doc`.
///
/// When the path exists, the insertion point is the start (prepend: just
/// past the matched heading's own line) or end (append, the default) of
/// that heading's subtree span, and content goes one level deeper than the
/// heading. When segments are missing, insertion happens at the
/// navigator's anchor and the content level continues the sequence below
/// the headings that will be created. A whole-file path appends at end of
/// file or prepends at the top.
pub fn plan_insertion(
    doc: &Document,
    resolution: &PathResolution,
    file: PathBuf,
    prepend: bool,
) -> DestinationTarget {
    let (insert_offset, target_level) = if resolution.path_exists {
        match resolution.found.last() {
            Some(last) => {
                let node = &doc.headings[last.index];
                let offset = if prepend {
                    node.end_offset
                } else {
                    doc.subtree_end(last.index)
                };
                (offset, node.level + 1)
            }
            None => {
                let offset = if prepend { 0 } else { doc.content.len() };
                (offset, resolution.target_level)
            }
        }
    } else {
        (
            resolution.anchor_offset,
            resolution.target_level + resolution.missing_segments.len(),
        )
    };

    debug!(
        file = %file.display(),
        insert_offset,
        target_level,
        create = resolution.missing_segments.len(),
        "planned insertion"
    );

    DestinationTarget {
        file,
        insert_offset,
        target_level,
        create_segments: resolution.missing_segments.clone(),
        prepend,
    }
}

/// Emit one ATX heading line per missing segment, at consecutive levels
/// starting at `start_level`, using the raw segment text as the title.
/// Segments are user-authored; no case transformation is applied.
///
/// # Errors
///
/// [`RefileError::LevelOverflow`] when a synthesized heading would sit
/// deeper than level 6.
pub fn build_missing_hierarchy(segments: &[String], start_level: usize) -> RefileResult<String> {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        let level = start_level + i;
        if level > 6 {
            return Err(RefileError::LevelOverflow {
                heading: segment.clone(),
                level: level as isize,
            });
        }
        out.push_str(&"#".repeat(level));
        out.push(' ');
        out.push_str(segment);
        out.push_str("\n\n");
    }
    Ok(out)
}

/// Splice `block` (synthesized hierarchy plus transformed content) into
/// `content` at `insert_offset`.
///
/// The result is `before + block + after`, with separation normalized so a
/// heading never lands glued to the previous line: the bytes before the
/// insertion always end in a newline, and one blank line separates
/// existing content from the new block.
pub fn splice(content: &str, insert_offset: usize, block: &str) -> String {
    let (before, after) = content.split_at(insert_offset);
    let mut out = String::with_capacity(content.len() + block.len() + 2);

    out.push_str(before);
    if !before.is_empty() && !before.ends_with('\n') {
        out.push('\n');
    }
    if !out.is_empty() && !out.ends_with("\n\n") {
        out.push('\n');
    }
    out.push_str(block);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(after);
    out
}

/// Remove a byte span from `content`.
pub fn remove_span(content: &str, start: usize, end: usize) -> String {
    let mut out = String::with_capacity(content.len() - (end - start));
    out.push_str(&content[..start]);
    out.push_str(&content[end..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_markdown;
    use crate::refile::navigate::navigate;
    use crate::selector::Selector;

    fn resolve(md: &str, selector: &str) -> (crate::parser::Document, PathResolution) {
        let doc = parse_markdown(md);
        let res = navigate(&doc, &Selector::parse(selector).unwrap()).unwrap();
        (doc, res)
    }

    #[test]
    fn test_append_targets_end_of_subtree() {
        let (doc, res) = resolve("# A\nbody\n## child\n# B\n", "#a");
        let target = plan_insertion(&doc, &res, PathBuf::from("n.md"), false);
        assert_eq!(target.insert_offset, doc.headings[2].start_offset);
        assert_eq!(target.target_level, 2);
        assert!(target.create_segments.is_empty());
    }

    #[test]
    fn test_prepend_targets_end_of_heading_line() {
        let (doc, res) = resolve("# A\nbody\n# B\n", "#a");
        let target = plan_insertion(&doc, &res, PathBuf::from("n.md"), true);
        assert_eq!(target.insert_offset, doc.headings[0].end_offset);
    }

    #[test]
    fn test_whole_file_append_and_prepend() {
        let (doc, res) = resolve("# A\nbody\n", "n.md");
        let append = plan_insertion(&doc, &res, PathBuf::from("n.md"), false);
        assert_eq!(append.insert_offset, doc.content.len());
        assert_eq!(append.target_level, 1);
        let prepend = plan_insertion(&doc, &res, PathBuf::from("n.md"), true);
        assert_eq!(prepend.insert_offset, 0);
    }

    #[test]
    fn test_missing_segments_anchor_under_deepest_match() {
        let (doc, res) = resolve("# A\nbody\n", "#a/b/c");
        let target = plan_insertion(&doc, &res, PathBuf::from("n.md"), false);
        assert_eq!(target.insert_offset, doc.headings[0].end_offset);
        // b at level 2, c at level 3, content below c at level 4
        assert_eq!(target.create_segments, vec!["b", "c"]);
        assert_eq!(target.target_level, 4);
    }

    #[test]
    fn test_build_missing_hierarchy_levels() {
        let out =
            build_missing_hierarchy(&["b".to_string(), "c".to_string()], 2).unwrap();
        assert_eq!(out, "## b\n\n### c\n\n");
    }

    #[test]
    fn test_build_missing_hierarchy_keeps_raw_segment_text() {
        let out = build_missing_hierarchy(&["Read Later".to_string()], 1).unwrap();
        assert_eq!(out, "# Read Later\n\n");
    }

    #[test]
    fn test_build_missing_hierarchy_overflow() {
        let err =
            build_missing_hierarchy(&["x".to_string(), "y".to_string()], 6).unwrap_err();
        assert!(matches!(err, RefileError::LevelOverflow { level: 7, .. }));
    }

    #[test]
    fn test_splice_inserts_blank_line_separator() {
        let out = splice("# Projects\n", 11, "## Meeting Notes\nbody\n");
        assert_eq!(out, "# Projects\n\n## Meeting Notes\nbody\n");
    }

    #[test]
    fn test_splice_repairs_missing_final_newline() {
        let out = splice("# Projects", 10, "## New\n");
        assert_eq!(out, "# Projects\n\n## New\n");
    }

    #[test]
    fn test_splice_at_start_adds_nothing_before() {
        let out = splice("# Rest\n", 0, "# First\n\n");
        assert_eq!(out, "# First\n\n# Rest\n");
    }

    #[test]
    fn test_remove_span() {
        assert_eq!(remove_span("abcdef", 2, 4), "abef");
        assert_eq!(remove_span("abcdef", 0, 6), "");
    }
}
