//! Subtree refiling: locate, extract, transform, and splice.
//!
//! The engine resolves selectors against markdown files under a notes
//! root, extracts the addressed subtree byte-exactly, rewrites its heading
//! levels to fit the destination, synthesizes any missing destination
//! hierarchy, and splices the result in at a computed byte offset. All
//! work happens in memory; each touched file is written once, at the end.

pub mod levels;
pub mod locate;
pub mod matcher;
pub mod navigate;
pub mod plan;
pub mod subtree;

pub use matcher::HeadingMatch;
pub use navigate::PathResolution;
pub use plan::DestinationTarget;
pub use subtree::Subtree;

use crate::error::{RefileError, RefileResult};
use crate::hooks::{HookDecision, NoopHook, RefileHook, RefileOp};
use crate::parser::{self, Document};
use crate::peek::{self, SelectorEntry};
use crate::selector::Selector;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Outcome of a completed refile, for display or JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct RefileSummary {
    /// Text of the moved subtree's root heading.
    pub heading: String,
    pub source_file: PathBuf,
    pub dest_file: PathBuf,
    /// Level the heading took at the destination.
    pub level: usize,
    pub bytes_moved: usize,
    /// Destination headings synthesized on the way, shallowest first.
    pub created: Vec<String>,
}

/// The refile engine.
///
/// Owns the notes root directory that relative selector file names resolve
/// against, and the hook consulted before and after each move. Every
/// operation re-parses the relevant files from disk; there is no persisted
/// index or cache.
pub struct Refiler {
    root: PathBuf,
    hook: Box<dyn RefileHook>,
}

impl Refiler {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            hook: Box::new(NoopHook),
        }
    }

    /// Install a pre/post refile hook.
    pub fn with_hook(mut self, hook: Box<dyn RefileHook>) -> Self {
        self.hook = hook;
        self
    }

    fn resolve_path(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.root.join(file)
        }
    }

    /// Validate a destination selector and compute the insertion plan
    /// without touching any file. Used by callers that append text to a
    /// configured destination (capture, archive) before doing so.
    pub fn resolve_destination(
        &self,
        selector: &str,
        prepend: bool,
    ) -> RefileResult<DestinationTarget> {
        let sel = Selector::parse(selector)?;
        let Some(file) = sel.file.clone() else {
            return Err(RefileError::MalformedSelector {
                input: selector.to_string(),
                reason: "destination selector needs a file".to_string(),
            });
        };
        let path = self.resolve_path(&file);
        let doc = parser::parse_file(&path)?;
        let resolution = navigate::navigate(&doc, &sel)?;
        Ok(plan::plan_insertion(&doc, &resolution, path, prepend))
    }

    /// Move the subtree addressed by `source` under `dest`.
    ///
    /// The source selector must fully resolve; the destination may resolve
    /// partially, in which case the missing hierarchy is created. When the
    /// destination selector has no file part, the move stays within the
    /// source file.
    pub fn refile(
        &self,
        source: &str,
        dest: &str,
        prepend: bool,
    ) -> RefileResult<RefileSummary> {
        let source_sel = Selector::parse(source)?;
        let Some(source_file) = source_sel.file.clone() else {
            return Err(RefileError::MalformedSelector {
                input: source.to_string(),
                reason: "source selector needs a file".to_string(),
            });
        };
        let source_path = self.resolve_path(&source_file);
        let source_doc = parser::parse_file(&source_path)?;
        let resolution = navigate::navigate_source(&source_doc, &source_sel)?;
        let Some(last) = resolution.found.last() else {
            return Err(RefileError::MalformedSelector {
                input: source.to_string(),
                reason: "source selector needs a heading path".to_string(),
            });
        };
        let sub = subtree::extract(&source_doc, last.index);
        self.move_subtree(source_path, source_doc, sub, dest, prepend)
    }

    /// Move the subtree containing `byte_offset` in `file` under `dest`.
    /// Entry point for editor integrations.
    pub fn refile_by_offset(
        &self,
        file: &str,
        byte_offset: usize,
        dest: &str,
        prepend: bool,
    ) -> RefileResult<RefileSummary> {
        let source_path = self.resolve_path(Path::new(file));
        let source_doc = parser::parse_file(&source_path)?;
        let index = locate::locate(&source_doc, byte_offset)?;
        let sub = subtree::extract(&source_doc, index);
        self.move_subtree(source_path, source_doc, sub, dest, prepend)
    }

    /// Extract one subtree read-only, for display.
    pub fn peek(&self, selector: &str) -> RefileResult<Subtree> {
        let sel = Selector::parse(selector)?;
        let Some(file) = sel.file.clone() else {
            return Err(RefileError::MalformedSelector {
                input: selector.to_string(),
                reason: "peek selector needs a file".to_string(),
            });
        };
        let doc = parser::parse_file(&self.resolve_path(&file))?;
        let resolution = navigate::navigate_source(&doc, &sel)?;
        match resolution.found.last() {
            Some(last) => Ok(subtree::extract(&doc, last.index)),
            None => Err(RefileError::MalformedSelector {
                input: selector.to_string(),
                reason: "peek selector needs a heading path".to_string(),
            }),
        }
    }

    /// One guaranteed-unambiguous selector per heading in `file`.
    pub fn list_selectors(&self, file: &str, short: bool) -> RefileResult<Vec<SelectorEntry>> {
        let doc = parser::parse_file(&self.resolve_path(Path::new(file)))?;
        Ok(peek::synthesize_all(&doc, file, short))
    }

    fn move_subtree(
        &self,
        source_path: PathBuf,
        source_doc: Document,
        sub: Subtree,
        dest: &str,
        prepend: bool,
    ) -> RefileResult<RefileSummary> {
        let dest_sel = Selector::parse(dest)?;
        let dest_path = match &dest_sel.file {
            Some(file) => self.resolve_path(file),
            None => source_path.clone(),
        };
        let same_file = dest_path == source_path;
        let dest_doc = if same_file {
            source_doc.clone()
        } else {
            parser::parse_file(&dest_path)?
        };

        let resolution = navigate::navigate(&dest_doc, &dest_sel)?;
        let target = plan::plan_insertion(&dest_doc, &resolution, dest_path.clone(), prepend);

        if same_file {
            // The anchor heading and the insertion point must both sit
            // outside the span being moved; otherwise the destination
            // disappears along with the source.
            let anchor_inside = resolution.last_node(&dest_doc).is_some_and(|node| {
                node.start_offset >= sub.start_offset && node.start_offset < sub.end_offset
            });
            let insert_inside = target.insert_offset > sub.start_offset
                && target.insert_offset < sub.end_offset;
            if anchor_inside || insert_inside {
                return Err(RefileError::DestinationInsideSource {
                    heading: sub.heading.clone(),
                });
            }
        }

        let transformed = levels::transform(&sub, target.target_level)?;
        let start_level = target.target_level - target.create_segments.len();
        let hierarchy = plan::build_missing_hierarchy(&target.create_segments, start_level)?;
        let block = format!("{hierarchy}{transformed}");

        let op = RefileOp {
            source_file: source_path.clone(),
            dest_file: dest_path.clone(),
            heading: sub.heading.clone(),
            level: target.target_level,
            prepend,
        };
        if let HookDecision::Abort(reason) = self.hook.before(&op) {
            return Err(RefileError::HookAborted { reason });
        }

        if same_file {
            let removed =
                plan::remove_span(&source_doc.content, sub.start_offset, sub.end_offset);
            // The removal shrank the buffer; an insertion point at or past
            // the removed span shifts left by the moved length.
            let mut insert_offset = target.insert_offset;
            if insert_offset >= sub.end_offset {
                insert_offset -= sub.content.len();
            }
            let merged = plan::splice(&removed, insert_offset, &block);
            write_atomic(&dest_path, &merged)?;
        } else {
            // Destination first: a failure between the two writes leaves
            // the subtree duplicated, never lost.
            let spliced = plan::splice(&dest_doc.content, target.insert_offset, &block);
            write_atomic(&dest_path, &spliced)?;
            let removed =
                plan::remove_span(&source_doc.content, sub.start_offset, sub.end_offset);
            write_atomic(&source_path, &removed)?;
        }

        info!(
            heading = %sub.heading,
            source = %source_path.display(),
            dest = %dest_path.display(),
            level = target.target_level,
            "refiled subtree"
        );

        let summary = RefileSummary {
            heading: sub.heading,
            source_file: source_path,
            dest_file: dest_path,
            level: target.target_level,
            bytes_moved: sub.content.len(),
            created: target.create_segments,
        };
        self.hook.after(&summary);
        Ok(summary)
    }
}

/// Write `content` to `path` atomically: write a sibling temp file, then
/// persist it over the target.
fn write_atomic(path: &Path, content: &str) -> RefileResult<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut tmp =
        tempfile::NamedTempFile::new_in(dir).map_err(|e| RefileError::io(path, e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| RefileError::io(path, e))?;
    tmp.persist(path).map_err(|e| RefileError::io(path, e.error))?;
    Ok(())
}
