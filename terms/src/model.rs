//! Glossary data model types.
//!
//! A [`TermDictionary`] maps stable term ids to [`TermRecord`]s. Records are
//! built once by [`validate`](crate::validate::validate) and never mutated
//! afterwards; the dictionary is safely shareable across threads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One glossary entry: a source-language phrase, its localized rendering,
/// and the metadata shown in tooltips and the glossary index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRecord {
    /// The localized (Chinese) form rendered in output.
    pub display: String,
    /// The original-language (English) form matched against prose.
    /// Matched case-insensitively and word-bounded.
    pub source: String,
    /// Human-readable explanation of the term.
    pub definition: String,
    /// Grouping label (e.g. `"core"`, `"web-ui"`).
    pub category: String,
    /// Ids of related terms. Every id must exist in the dictionary.
    pub related: Vec<String>,
}

impl TermRecord {
    /// Formats the record as `"中文(English)"`, the convention used for
    /// first occurrences and the glossary index.
    #[must_use]
    pub fn bilingual(&self) -> String {
        format!("{}({})", self.display, self.source)
    }
}

/// The validated glossary: id → record, plus document metadata.
///
/// `BTreeMap` keeps iteration order deterministic, which in turn keeps the
/// compiled term pattern and all generated artifacts reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermDictionary {
    /// Glossary document version string.
    pub version: String,
    /// Date the glossary was last edited, as written in the source document.
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    /// All term records, keyed by stable id.
    pub terms: BTreeMap<String, TermRecord>,
}

impl TermDictionary {
    /// Looks up a record by term id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TermRecord> {
        self.terms.get(id)
    }

    /// Returns true if the given id exists in the dictionary.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.terms.contains_key(id)
    }

    /// Number of terms in the dictionary.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if the dictionary has no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterates over `(id, record)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TermRecord)> {
        self.terms.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(display: &str, source: &str) -> TermRecord {
        TermRecord {
            display: display.to_string(),
            source: source.to_string(),
            definition: "def".to_string(),
            category: "core".to_string(),
            related: Vec::new(),
        }
    }

    #[test]
    fn bilingual_format() {
        assert_eq!(record("用户", "User").bilingual(), "用户(User)");
    }

    #[test]
    fn iteration_is_id_ordered() {
        let mut terms = BTreeMap::new();
        terms.insert("task".to_string(), record("任务", "Task"));
        terms.insert("agent".to_string(), record("代理", "Agent"));
        let dict = TermDictionary {
            version: "1.0.0".to_string(),
            last_updated: "2026-08-01".to_string(),
            terms,
        };
        let ids: Vec<&String> = dict.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["agent", "task"]);
    }
}
