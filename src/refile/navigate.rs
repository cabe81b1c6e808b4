//! Path navigation: drives the matcher segment by segment.

use super::matcher::{self, HeadingMatch};
use crate::error::{Candidate, RefileError, RefileResult};
use crate::parser::{Document, HeadingNode};
use crate::selector::Selector;
use tracing::debug;

/// Result of walking a selector's segments through a document.
#[derive(Debug, Clone)]
pub struct PathResolution {
    /// Matches for the selector prefix that resolved, in segment order.
    pub found: Vec<HeadingMatch>,
    /// Selector suffix with no matching headings.
    pub missing_segments: Vec<String>,
    /// Byte position just past the deepest matched heading's line (end of
    /// file when nothing matched): where the next level is searched for or
    /// inserted.
    pub anchor_offset: usize,
    /// Level the next new heading should use.
    pub target_level: usize,
    /// True iff `missing_segments` is empty.
    pub path_exists: bool,
}

impl PathResolution {
    /// The deepest matched heading, if any segment resolved.
    pub fn last_node<'a>(&self, doc: &'a Document) -> Option<&'a HeadingNode> {
        self.found.last().map(|m| &doc.headings[m.index])
    }
}

/// Resolve `selector` against `doc`.
///
/// Segment `i` is matched at level `skip_levels + i + 1`, except that a
/// selector with exactly one segment matches at any level. Each match
/// advances the search bound past the matched heading's line, so later
/// segments only see descendants.
///
/// Partial resolution is not an error here: destination selectors are
/// expected to resolve partially, with the caller consuming
/// `missing_segments`. Source selectors go through [`navigate_source`].
///
/// # Errors
///
/// [`RefileError::AmbiguousSelector`] when a segment matches more than one
/// heading. There is no silent first-match fallback: a wrong refile moves
/// content somewhere hard to notice, so the caller must disambiguate.
pub fn navigate(doc: &Document, selector: &Selector) -> RefileResult<PathResolution> {
    let single_segment = selector.segments.len() == 1;
    let mut found: Vec<HeadingMatch> = Vec::new();
    let mut missing_segments = Vec::new();
    let mut after_offset = 0;

    for (i, segment) in selector.segments.iter().enumerate() {
        let expected_level = if single_segment {
            None
        } else {
            Some(selector.skip_levels + i + 1)
        };
        let matches = matcher::find_matches(doc, segment, expected_level, after_offset);
        debug!(
            segment,
            level = ?expected_level,
            hits = matches.len(),
            "resolved segment"
        );

        match matches.as_slice() {
            [] => {
                missing_segments = selector.segments[i..].to_vec();
                break;
            }
            [only] => {
                after_offset = doc.headings[only.index].end_offset;
                found.push(*only);
            }
            _ => {
                return Err(RefileError::AmbiguousSelector {
                    segment: segment.clone(),
                    candidates: matches
                        .iter()
                        .map(|m| Candidate {
                            text: doc.headings[m.index].text.clone(),
                            line: m.line_number,
                        })
                        .collect(),
                });
            }
        }
    }

    let (anchor_offset, target_level) = match found.last() {
        Some(last) => {
            let node = &doc.headings[last.index];
            (node.end_offset, node.level + 1)
        }
        None => (doc.content.len(), selector.skip_levels + 1),
    };

    Ok(PathResolution {
        path_exists: missing_segments.is_empty(),
        found,
        missing_segments,
        anchor_offset,
        target_level,
    })
}

/// Resolve a source selector, which must match completely.
///
/// # Errors
///
/// [`RefileError::SubtreeNotFound`] carrying the longest matched prefix,
/// so the user can correct the remaining segments.
pub fn navigate_source(doc: &Document, selector: &Selector) -> RefileResult<PathResolution> {
    let resolution = navigate(doc, selector)?;
    if !resolution.path_exists {
        return Err(RefileError::SubtreeNotFound {
            selector: selector.to_string(),
            matched_prefix: selector.segments[..resolution.found.len()].to_vec(),
        });
    }
    Ok(resolution)
}
