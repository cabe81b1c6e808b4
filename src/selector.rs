//! Selector parsing.
//!
//! A selector names a heading by path, e.g. `notes.md#projects/frontend`.
//! Grammar:
//!
//! ```text
//! selector := [file] ["#" path]
//! path     := {"/"} segment {"/" segment}
//! ```
//!
//! Leading `/` repetitions before the first segment become skip-levels,
//! which tolerate documents whose hierarchy starts deeper than level 1.
//! Segment text is matched case-insensitively later, at match time; no
//! folding or trimming happens here.

use crate::error::{RefileError, RefileResult};
use std::fmt;
use std::path::PathBuf;

/// A parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// File the path applies to. Empty in destination-only inspection
    /// contexts, where the caller supplies the file.
    pub file: Option<PathBuf>,
    /// Ordered, non-empty path segments.
    pub segments: Vec<String>,
    /// Count of leading path separators before the first segment.
    pub skip_levels: usize,
}

impl Selector {
    /// Parse a textual selector.
    ///
    /// # Errors
    ///
    /// [`RefileError::MalformedSelector`] on a second `#`, an empty segment
    /// after the skip slashes, or a selector naming neither file nor path.
    pub fn parse(input: &str) -> RefileResult<Self> {
        let (file_part, path_part) = match input.find('#') {
            Some(idx) => (&input[..idx], Some(&input[idx + 1..])),
            None => (input, None),
        };

        if path_part.is_some_and(|p| p.contains('#')) {
            return Err(malformed(input, "more than one '#'"));
        }

        let file = (!file_part.is_empty()).then(|| PathBuf::from(file_part));
        let mut segments = Vec::new();
        let mut skip_levels = 0;

        if let Some(path) = path_part.filter(|p| !p.is_empty()) {
            let mut parts = path.split('/').peekable();
            while parts.peek() == Some(&"") {
                parts.next();
                skip_levels += 1;
            }
            for part in parts {
                if part.is_empty() {
                    return Err(malformed(input, "empty path segment"));
                }
                segments.push(part.to_string());
            }
            if segments.is_empty() {
                return Err(malformed(input, "path has no segments"));
            }
        }

        if file.is_none() && segments.is_empty() {
            return Err(malformed(input, "selector names neither file nor path"));
        }

        Ok(Selector {
            file,
            segments,
            skip_levels,
        })
    }

    /// True for selectors addressing a whole file rather than a subtree.
    pub fn is_whole_file(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}", file.display())?;
        }
        if self.segments.is_empty() {
            return Ok(());
        }
        write!(f, "#")?;
        for _ in 0..self.skip_levels {
            write!(f, "/")?;
        }
        write!(f, "{}", self.segments.join("/"))
    }
}

fn malformed(input: &str, reason: &str) -> RefileError {
    RefileError::MalformedSelector {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Selector {
        Selector::parse(input).unwrap()
    }

    #[test]
    fn test_parse_file_and_path() {
        let sel = parse("notes.md#projects/frontend");
        assert_eq!(sel.file, Some(PathBuf::from("notes.md")));
        assert_eq!(sel.segments, vec!["projects", "frontend"]);
        assert_eq!(sel.skip_levels, 0);
    }

    #[test]
    fn test_parse_whole_file() {
        let sel = parse("notes.md");
        assert_eq!(sel.file, Some(PathBuf::from("notes.md")));
        assert!(sel.is_whole_file());
    }

    #[test]
    fn test_parse_skip_levels() {
        let sel = parse("notes.md#//foo/bar");
        assert_eq!(sel.skip_levels, 2);
        assert_eq!(sel.segments, vec!["foo", "bar"]);
    }

    #[test]
    fn test_parse_path_without_file() {
        let sel = parse("#inbox");
        assert_eq!(sel.file, None);
        assert_eq!(sel.segments, vec!["inbox"]);
    }

    #[test]
    fn test_segments_are_not_folded_or_trimmed() {
        let sel = parse("n.md#Project Alpha/  padded  ");
        assert_eq!(sel.segments, vec!["Project Alpha", "  padded  "]);
    }

    #[test]
    fn test_malformed_empty_segment() {
        assert!(matches!(
            Selector::parse("notes.md#a//b"),
            Err(RefileError::MalformedSelector { .. })
        ));
        assert!(matches!(
            Selector::parse("notes.md#a/"),
            Err(RefileError::MalformedSelector { .. })
        ));
    }

    #[test]
    fn test_malformed_double_hash() {
        assert!(matches!(
            Selector::parse("notes.md#a#b"),
            Err(RefileError::MalformedSelector { .. })
        ));
    }

    #[test]
    fn test_malformed_empty_selector() {
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse("#").is_err());
        assert!(Selector::parse("#///").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for input in ["notes.md#projects/frontend", "notes.md#//foo/bar", "a.md"] {
            assert_eq!(parse(input).to_string(), input);
        }
    }
}
