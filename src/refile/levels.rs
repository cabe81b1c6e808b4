//! Heading level rewriting for extracted subtrees.

use super::subtree::Subtree;
use crate::error::{RefileError, RefileResult};
use crate::parser::utils::{FenceState, heading_level};

/// Rewrite the subtree's headings so its root sits at `target_level`,
/// shifting every nested heading by the same delta.
///
/// Uses the same heading recognizer as the structure reader, including
/// fence awareness, so only real headings are rewritten. A shift that
/// would leave the 1-6 range is a [`RefileError::LevelOverflow`], never a
/// silent clamp: collapsing distinct heading levels corrupts hierarchy.
pub fn transform(subtree: &Subtree, target_level: usize) -> RefileResult<String> {
    let delta = target_level as isize - subtree.level as isize;
    if delta == 0 {
        return Ok(subtree.content.clone());
    }

    let mut out = String::with_capacity(subtree.content.len());
    let mut fences = FenceState::default();

    for line in subtree.content.split_inclusive('\n') {
        if fences.observe(line) {
            out.push_str(line);
            continue;
        }
        match heading_level(line) {
            Some(level) => {
                let shifted = level as isize + delta;
                if !(1..=6).contains(&shifted) {
                    return Err(RefileError::LevelOverflow {
                        heading: line[level..].trim().to_string(),
                        level: shifted,
                    });
                }
                out.push_str(&"#".repeat(shifted as usize));
                out.push_str(&line[level..]);
            }
            None => out.push_str(line),
        }
    }

    Ok(out)
}
