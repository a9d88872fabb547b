//! Read-only query helpers over a validated [`TermDictionary`].

use std::collections::BTreeSet;

use crate::model::{TermDictionary, TermRecord};

impl TermDictionary {
    /// Returns the localized display form for a source-language phrase,
    /// matched case-insensitively.
    #[must_use]
    pub fn display_for_source(&self, source: &str) -> Option<&str> {
        let wanted = source.to_lowercase();
        self.iter()
            .find(|(_, record)| record.source.to_lowercase() == wanted)
            .map(|(_, record)| record.display.as_str())
    }

    /// Case-insensitive substring search over display form, source form,
    /// and definition. Results come back in id order.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<(&str, &TermRecord)> {
        let needle = query.to_lowercase();
        self.iter()
            .filter(|(_, record)| {
                record.display.to_lowercase().contains(&needle)
                    || record.source.to_lowercase().contains(&needle)
                    || record.definition.to_lowercase().contains(&needle)
            })
            .map(|(id, record)| (id.as_str(), record))
            .collect()
    }

    /// All terms in the given category, in id order.
    #[must_use]
    pub fn terms_in_category(&self, category: &str) -> Vec<(&str, &TermRecord)> {
        self.iter()
            .filter(|(_, record)| record.category == category)
            .map(|(id, record)| (id.as_str(), record))
            .collect()
    }

    /// All distinct categories, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.iter()
            .map(|(_, record)| record.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dict() -> TermDictionary {
        crate::validate::validate(&json!({
            "version": "1.0.0",
            "lastUpdated": "2026-08-01",
            "terms": {
                "user": {
                    "display": "用户",
                    "source": "User",
                    "definition": "A simulated visitor generating load.",
                    "category": "core",
                    "related": []
                },
                "spawn-rate": {
                    "display": "孵化速率",
                    "source": "spawn rate",
                    "definition": "How many users are started per second.",
                    "category": "web-ui",
                    "related": ["user"]
                }
            }
        }))
        .expect("valid fixture")
    }

    #[test]
    fn display_lookup_is_case_insensitive() {
        let dict = dict();
        assert_eq!(dict.display_for_source("USER"), Some("用户"));
        assert_eq!(dict.display_for_source("nobody"), None);
    }

    #[test]
    fn search_covers_all_text_fields() {
        let dict = dict();
        assert_eq!(dict.search("用户").len(), 1);
        assert_eq!(dict.search("spawn").len(), 1);
        // "visitor" only appears in the user definition.
        assert_eq!(dict.search("visitor").len(), 1);
        assert!(dict.search("zzz").is_empty());
    }

    #[test]
    fn categories_are_sorted_and_deduplicated() {
        assert_eq!(dict().categories(), ["core", "web-ui"]);
    }

    #[test]
    fn category_filter() {
        let dict = dict();
        let core = dict.terms_in_category("core");
        assert_eq!(core.len(), 1);
        assert_eq!(core[0].0, "user");
    }
}
