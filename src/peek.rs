//! Table-of-contents generation and short-selector synthesis.
//!
//! Shares the matching core with refiling: every synthesized selector is
//! verified by re-running the path navigator and checking it lands on
//! exactly the intended heading, so a printed selector is guaranteed to
//! resolve without ambiguity.

use crate::parser::Document;
use crate::refile::navigate;
use crate::selector::Selector;
use serde::Serialize;
use tracing::trace;

/// One TOC entry: a selector that resolves to its heading.
#[derive(Debug, Clone, Serialize)]
pub struct SelectorEntry {
    pub selector: String,
    pub heading: String,
    pub level: usize,
    pub line: usize,
    /// False when no minimal or compressed form was unambiguous and the
    /// entry fell back to full segment text.
    pub optimal: bool,
}

/// Single-letter abbreviations for headings that recur across note files.
const WORD_LETTERS: &[(&str, &str)] = &[
    ("archive", "a"),
    ("backlog", "b"),
    ("done", "d"),
    ("ideas", "i"),
    ("inbox", "i"),
    ("journal", "j"),
    ("meetings", "m"),
    ("notes", "n"),
    ("projects", "p"),
    ("someday", "s"),
    ("tasks", "t"),
    ("todo", "t"),
];

/// Synthesize one selector per heading in document order.
pub fn synthesize_all(doc: &Document, file: &str, short: bool) -> Vec<SelectorEntry> {
    (0..doc.headings.len())
        .map(|index| synthesize(doc, file, index, short))
        .collect()
}

fn synthesize(doc: &Document, file: &str, index: usize, short: bool) -> SelectorEntry {
    let node = &doc.headings[index];
    let chain = ancestor_chain(doc, index);

    // Grow a suffix of the ancestor chain until the navigator resolves it
    // to this heading alone. A single segment matches at any level; longer
    // paths are level-anchored, so the suffix must have consecutive levels
    // (expressed via skip-levels when the document starts deep).
    let mut segments = vec![node.text.clone()];
    let mut skip_levels = 0;
    let mut optimal = false;
    for k in 1..=chain.len() {
        let suffix = &chain[chain.len() - k..];
        let first_level = doc.headings[suffix[0]].level;
        let consecutive = suffix
            .iter()
            .enumerate()
            .all(|(i, &h)| doc.headings[h].level == first_level + i);
        if k > 1 && !consecutive {
            break;
        }

        segments = suffix
            .iter()
            .map(|&h| doc.headings[h].text.clone())
            .collect();
        skip_levels = if k == 1 { 0 } else { first_level - 1 };
        if resolves_to(doc, &segments, skip_levels, index) {
            optimal = true;
            break;
        }
    }

    if short && optimal {
        for i in 0..segments.len() {
            let full = std::mem::take(&mut segments[i]);
            let mut compressed = false;
            for candidate in compressions(&full) {
                segments[i] = candidate;
                if resolves_to(doc, &segments, skip_levels, index) {
                    compressed = true;
                    break;
                }
            }
            if !compressed {
                segments[i] = full;
                optimal = false;
            }
        }
    }

    trace!(heading = %node.text, ?segments, skip_levels, optimal, "synthesized selector");

    SelectorEntry {
        selector: selector_string(file, &segments, skip_levels),
        heading: node.text.clone(),
        level: node.level,
        line: node.line_number,
        optimal,
    }
}

/// Indices of the heading's ancestors, shallowest first, ending at the
/// heading itself.
fn ancestor_chain(doc: &Document, index: usize) -> Vec<usize> {
    let mut chain = vec![index];
    let mut current = index;
    while let Some(parent) = doc.parent_of(current) {
        chain.push(parent);
        current = parent;
    }
    chain.reverse();
    chain
}

/// True when `segments` with `skip_levels` navigates to exactly the
/// heading at `index`.
fn resolves_to(doc: &Document, segments: &[String], skip_levels: usize, index: usize) -> bool {
    let selector = Selector {
        file: None,
        segments: segments.to_vec(),
        skip_levels,
    };
    match navigate::navigate(doc, &selector) {
        Ok(res) => res.path_exists && res.found.last().is_some_and(|m| m.index == index),
        Err(_) => false,
    }
}

/// Compressed candidates for one segment, shortest first: known-word
/// single letter, first letters of words, consonant compression. Each
/// candidate is only accepted after the navigator confirms it still lands
/// on the right heading.
fn compressions(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    let mut out: Vec<String> = Vec::new();

    if let [word] = words.as_slice() {
        if let Some((_, letter)) = WORD_LETTERS.iter().find(|(w, _)| w == word) {
            out.push((*letter).to_string());
        }
    }
    if words.len() > 1 {
        out.push(words.iter().filter_map(|w| w.chars().next()).collect());
    }
    let consonants: String = lower
        .chars()
        .enumerate()
        .filter(|&(i, c)| i == 0 || !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
        .map(|(_, c)| c)
        .collect();
    out.push(consonants);

    out.retain(|c| !c.is_empty() && c.len() < lower.len());
    out.sort_by_key(String::len);
    out.dedup();
    out
}

fn selector_string(file: &str, segments: &[String], skip_levels: usize) -> String {
    let mut out = String::from(file);
    out.push('#');
    for _ in 0..skip_levels {
        out.push('/');
    }
    out.push_str(&segments.join("/"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_markdown;

    fn entries(md: &str, short: bool) -> Vec<SelectorEntry> {
        synthesize_all(&parse_markdown(md), "n.md", short)
    }

    /// Every selector flagged optimal must parse and navigate back to the
    /// heading it was generated for.
    fn assert_entries_resolve(md: &str, entries: &[SelectorEntry]) {
        let doc = parse_markdown(md);
        for (index, entry) in entries.iter().enumerate().filter(|(_, e)| e.optimal) {
            let sel = Selector::parse(&entry.selector).unwrap();
            let res = navigate::navigate(&doc, &sel).unwrap();
            assert!(res.path_exists, "selector {} did not resolve", entry.selector);
            assert_eq!(
                res.found.last().unwrap().index,
                index,
                "selector {} resolved to the wrong heading",
                entry.selector
            );
        }
    }

    #[test]
    fn test_unique_headings_get_single_segment_selectors() {
        let md = "# Work\n## Projects\n### Frontend\n";
        let list = entries(md, false);
        assert_eq!(list[2].selector, "n.md#Frontend");
        assert!(list[2].optimal);
        assert_entries_resolve(md, &list);
    }

    #[test]
    fn test_duplicate_headings_disambiguate_by_parent_where_possible() {
        let md = "# Work\n## Reading\n# Personal\n## Reading\n";
        let list = entries(md, false);
        // The later duplicate is unique below its parent's heading line.
        assert_eq!(list[3].selector, "n.md#Personal/Reading");
        assert!(list[3].optimal);
        // The earlier one is not: the search bound is a lower bound, so
        // the later branch still matches under "Work". Flagged instead of
        // silently resolving.
        assert_eq!(list[1].selector, "n.md#Work/Reading");
        assert!(!list[1].optimal);
        assert_entries_resolve(md, &list);
    }

    #[test]
    fn test_deep_document_uses_skip_levels() {
        // No level-1 headings: the two-segment path needs a skip marker.
        let md = "## Work\n### Reading\n## Personal\n### Reading\n";
        let list = entries(md, false);
        assert_eq!(list[3].selector, "n.md#/Personal/Reading");
        assert!(list[3].optimal);
        assert_entries_resolve(md, &list);
    }

    #[test]
    fn test_level_gap_falls_back_to_full_text() {
        // "Deep" sits two levels under its ancestor, so no level-anchored
        // path can reach it; the duplicate makes the single segment
        // ambiguous as well.
        let md = "# A\n### Deep\n# B\n### Deep\n";
        let list = entries(md, false);
        assert!(!list[1].optimal);
        assert!(!list[3].optimal);
    }

    #[test]
    fn test_short_mode_compresses_known_words() {
        let md = "# Projects\nbody\n# Archive\nmore\n";
        let list = entries(md, true);
        assert_eq!(list[0].selector, "n.md#p");
        assert_eq!(list[1].selector, "n.md#a");
        assert!(list[0].optimal);
        assert_entries_resolve(md, &list);
    }

    #[test]
    fn test_short_mode_rejects_ambiguous_compressions() {
        // "p" also matches "Piano", so "Projects" needs a longer form.
        let md = "# Projects\n# Piano\n";
        let list = entries(md, true);
        assert_ne!(list[0].selector, "n.md#p");
        assert_entries_resolve(md, &list);
    }

    #[test]
    fn test_short_mode_consonant_compression() {
        // Vowel removal leaves "id", a prefix of the heading, so the
        // navigator still finds it; "Other" does not contain "id".
        let md = "# Idea\n# Other\n";
        let list = entries(md, true);
        assert_eq!(list[0].selector, "n.md#id");
        assert!(list[0].optimal);
        assert_entries_resolve(md, &list);
    }

    #[test]
    fn test_short_mode_first_letters_of_words() {
        let md = "# Sprint Planning\n# Review\n";
        let list = entries(md, true);
        assert_eq!(list[0].selector, "n.md#sp");
        assert_entries_resolve(md, &list);
    }

    #[test]
    fn test_short_mode_flags_incompressible_entries() {
        // Single word, not in the word table, all consonants already: no
        // compressed candidate exists.
        let md = "# xyz\n";
        let list = entries(md, true);
        assert_eq!(list[0].selector, "n.md#xyz");
        assert!(!list[0].optimal);
    }

    #[test]
    fn test_compressions_are_shortest_first() {
        let forms = compressions("Meeting Notes");
        assert_eq!(forms[0], "mn");
        assert!(forms.contains(&"mtng nts".to_string()));
    }
}
