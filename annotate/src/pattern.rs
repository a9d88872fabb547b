//! Term pattern compilation.
//!
//! Builds one matching pattern from the whole dictionary: every source form
//! escaped for literal matching, joined with alternation, word-bounded on
//! both sides, compiled case-insensitively. Alternatives are ordered by
//! descending source-form length — the regex engine prefers the earliest
//! alternative at each position, so longest-first ordering is what makes
//! `TaskSet` match as one term instead of `Task` plus trailing text.

use std::collections::HashMap;
use std::ops::Range;

use regex::{Regex, RegexBuilder};

use glossa_terms::TermDictionary;

/// The compiled term pattern plus the lookup table that maps a matched
/// slice (lowercased) back to its term id.
///
/// Immutable after compilation; safe to share across threads and document
/// passes.
#[derive(Debug)]
pub struct TermPattern {
    /// `None` for an empty dictionary: every scan yields zero matches and
    /// the annotator becomes a pass-through.
    regex: Option<Regex>,
    /// Lowercased source form → term id.
    lookup: HashMap<String, String>,
    /// Source forms in alternation order. Kept for the lint suite, which
    /// asserts the longest-first invariant independently.
    ordered_sources: Vec<String>,
}

impl TermPattern {
    /// Compiles the pattern for a validated dictionary.
    ///
    /// Ordering is deterministic: descending source-form length, ties
    /// broken by term id. When two ids share a source form
    /// (case-insensitive), the lookup keeps the first in that order.
    ///
    /// # Errors
    ///
    /// Returns a [`regex::Error`] if the assembled pattern fails to
    /// compile (e.g. it exceeds the engine's size limit).
    pub fn compile(dict: &TermDictionary) -> Result<Self, regex::Error> {
        let mut entries: Vec<(&str, &str)> = dict
            .iter()
            .map(|(id, record)| (id.as_str(), record.source.as_str()))
            .collect();
        entries.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then(a.0.cmp(b.0)));

        let mut lookup = HashMap::with_capacity(entries.len());
        for (id, source) in &entries {
            lookup
                .entry(source.to_lowercase())
                .or_insert_with(|| (*id).to_string());
        }
        let ordered_sources: Vec<String> =
            entries.iter().map(|(_, source)| (*source).to_string()).collect();

        if entries.is_empty() {
            return Ok(Self {
                regex: None,
                lookup,
                ordered_sources,
            });
        }

        let alternation = entries
            .iter()
            .map(|(_, source)| regex::escape(source))
            .collect::<Vec<_>>()
            .join("|");
        // ASCII word boundaries: CJK characters count as word characters
        // under Unicode \b, which would stop `用户User` from matching. The
        // glossary's source forms are English, so ASCII \w is the right
        // notion of "word" here.
        let regex = RegexBuilder::new(&format!(r"(?-u:\b)(?:{})(?-u:\b)", alternation))
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            regex: Some(regex),
            lookup,
            ordered_sources,
        })
    }

    /// True if the pattern was compiled from an empty dictionary.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.regex.is_none()
    }

    /// Source forms in alternation order (longest first).
    #[must_use]
    pub fn ordered_sources(&self) -> &[String] {
        &self.ordered_sources
    }

    /// Non-overlapping match ranges, left to right. Once a match consumes
    /// a range, scanning resumes at its end.
    #[must_use]
    pub fn match_ranges(&self, text: &str) -> Vec<Range<usize>> {
        match &self.regex {
            Some(regex) => regex.find_iter(text).map(|m| m.range()).collect(),
            None => Vec::new(),
        }
    }

    /// Resolves a matched slice back to its term id, case-insensitively.
    #[must_use]
    pub fn resolve(&self, matched: &str) -> Option<&str> {
        self.lookup.get(&matched.to_lowercase()).map(String::as_str)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dict(terms: serde_json::Value) -> TermDictionary {
        glossa_terms::validate(&json!({
            "version": "1.0.0",
            "lastUpdated": "2026-08-01",
            "terms": terms,
        }))
        .expect("valid fixture")
    }

    fn term(display: &str, source: &str) -> serde_json::Value {
        json!({
            "display": display,
            "source": source,
            "definition": "def",
            "category": "core",
            "related": []
        })
    }

    #[test]
    fn longest_source_form_sorts_first() {
        let pattern = TermPattern::compile(&dict(json!({
            "task": term("任务", "Task"),
            "task-set": term("任务集", "TaskSet"),
            "user": term("用户", "User"),
        })))
        .expect("compiles");
        assert_eq!(pattern.ordered_sources(), ["TaskSet", "Task", "User"]);
    }

    #[test]
    fn equal_lengths_tie_break_by_id() {
        let pattern = TermPattern::compile(&dict(json!({
            "zeta": term("乙", "Wasp"),
            "alpha": term("甲", "Bird"),
        })))
        .expect("compiles");
        assert_eq!(pattern.ordered_sources(), ["Bird", "Wasp"]);
    }

    #[test]
    fn maximal_munch_prefers_enclosing_term() {
        let pattern = TermPattern::compile(&dict(json!({
            "task": term("任务", "Task"),
            "task-set": term("任务集", "TaskSet"),
        })))
        .expect("compiles");
        let ranges = pattern.match_ranges("TaskSet");
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0], 0..7);
        assert_eq!(pattern.resolve("TaskSet"), Some("task-set"));
    }

    #[test]
    fn matching_is_case_insensitive_and_word_bounded() {
        let pattern =
            TermPattern::compile(&dict(json!({ "user": term("用户", "User") }))).expect("compiles");
        assert_eq!(pattern.match_ranges("user User USER").len(), 3);
        // Trailing letters break the word boundary.
        assert!(pattern.match_ranges("users").is_empty());
        assert_eq!(pattern.resolve("USER"), Some("user"));
    }

    #[test]
    fn source_forms_are_escaped_literally() {
        let pattern = TermPattern::compile(&dict(json!({
            "locust-io": term("蝗虫", "Locust.io"),
        })))
        .expect("compiles");
        assert_eq!(pattern.match_ranges("see Locust.io docs").len(), 1);
        // Unescaped, the dot would match any character.
        assert!(pattern.match_ranges("see LocustXio docs").is_empty());
    }

    #[test]
    fn terms_adjacent_to_cjk_text_still_match() {
        let pattern =
            TermPattern::compile(&dict(json!({ "user": term("用户", "User") }))).expect("compiles");
        // No spaces between CJK prose and the embedded English term.
        assert_eq!(pattern.match_ranges("每个User代表一个访问者").len(), 1);
    }

    #[test]
    fn empty_dictionary_is_noop() {
        let pattern = TermPattern::compile(&dict(json!({}))).expect("compiles");
        assert!(pattern.is_noop());
        assert!(pattern.match_ranges("any User text").is_empty());
    }
}
