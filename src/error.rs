//! Error types for the refile and navigation engine.
//!
//! Every variant is terminal: it stems from the document's content or the
//! user's selector, never from a transient condition, so nothing is retried.
//! The engine returns these structured errors to its caller; the CLI layer
//! formats them and chooses the process exit code.

use std::fmt;
use std::path::{Path, PathBuf};

/// Result type for engine operations.
pub type RefileResult<T> = Result<T, RefileError>;

/// One heading reported as a candidate by an ambiguity error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Full heading text.
    pub text: String,
    /// 1-indexed source line number.
    pub line: usize,
}

/// Errors from selector parsing, navigation, and refiling.
#[derive(Debug)]
pub enum RefileError {
    /// Selector syntax is invalid.
    MalformedSelector { input: String, reason: String },
    /// A source selector must fully resolve but did not.
    SubtreeNotFound {
        selector: String,
        matched_prefix: Vec<String>,
    },
    /// More than one heading matches a segment at the expected level.
    AmbiguousSelector {
        segment: String,
        candidates: Vec<Candidate>,
    },
    /// A level transformation would push a heading outside 1-6.
    LevelOverflow { heading: String, level: isize },
    /// Offset-based targeting given a byte position outside any subtree.
    OffsetOutOfRange { offset: usize, len: usize },
    /// The destination anchor lies inside the subtree being moved.
    DestinationInsideSource { heading: String },
    /// A pre-refile hook forbade the operation before any write.
    HookAborted { reason: String },
    /// Filesystem error, with the offending path attached.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl RefileError {
    /// Attach a path to a raw I/O error.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        RefileError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for RefileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefileError::MalformedSelector { input, reason } => {
                write!(f, "malformed selector '{}': {}", input, reason)
            }
            RefileError::SubtreeNotFound {
                selector,
                matched_prefix,
            } => {
                write!(f, "no subtree matches '{}'", selector)?;
                if !matched_prefix.is_empty() {
                    write!(f, " (matched as far as '{}')", matched_prefix.join("/"))?;
                }
                Ok(())
            }
            RefileError::AmbiguousSelector {
                segment,
                candidates,
            } => {
                writeln!(f, "segment '{}' matches more than one heading:", segment)?;
                for candidate in candidates {
                    writeln!(f, "  line {}: {}", candidate.line, candidate.text)?;
                }
                write!(
                    f,
                    "nest one more segment or use a longer substring to disambiguate"
                )
            }
            RefileError::LevelOverflow { heading, level } => {
                write!(
                    f,
                    "cannot shift '{}' to level {}; heading levels must stay within 1-6",
                    heading, level
                )
            }
            RefileError::OffsetOutOfRange { offset, len } => {
                write!(
                    f,
                    "byte offset {} is outside every subtree (file is {} bytes)",
                    offset, len
                )
            }
            RefileError::DestinationInsideSource { heading } => {
                write!(
                    f,
                    "destination lies inside the subtree being moved ('{}')",
                    heading
                )
            }
            RefileError::HookAborted { reason } => {
                write!(f, "refile aborted by hook: {}", reason)
            }
            RefileError::Io { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for RefileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RefileError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_message_lists_every_candidate() {
        let err = RefileError::AmbiguousSelector {
            segment: "proj".to_string(),
            candidates: vec![
                Candidate {
                    text: "Projects".to_string(),
                    line: 3,
                },
                Candidate {
                    text: "Project Alpha".to_string(),
                    line: 9,
                },
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("line 3: Projects"));
        assert!(msg.contains("line 9: Project Alpha"));
        assert!(msg.contains("disambiguate"));
    }

    #[test]
    fn test_not_found_message_carries_matched_prefix() {
        let err = RefileError::SubtreeNotFound {
            selector: "notes.md#work/missing".to_string(),
            matched_prefix: vec!["work".to_string()],
        };
        assert!(err.to_string().contains("matched as far as 'work'"));
    }
}
