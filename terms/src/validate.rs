//! Glossary schema validation and advisory checks.
//!
//! [`validate`] is exhaustive: it walks the whole document once, collecting
//! every structural defect it can detect into a single [`SchemaError`]
//! rather than failing on the first. Each issue names the offending term id
//! and field so a glossary editor can fix the file in one round.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use anyhow::Context;
use serde_json::Value;

use crate::model::{TermDictionary, TermRecord};

/// The four string fields every term record must carry.
const STRING_FIELDS: [&str; 4] = ["display", "source", "definition", "category"];

/// A single structural defect found during glossary validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// Term id the defect belongs to, or `None` for document-level defects.
    pub term: Option<String>,
    /// Field the defect concerns, or `None` when it concerns a whole record
    /// or the document root.
    pub field: Option<String>,
    /// Description of what is wrong.
    pub problem: String,
}

impl SchemaIssue {
    fn document(field: Option<&str>, problem: impl Into<String>) -> Self {
        Self {
            term: None,
            field: field.map(str::to_string),
            problem: problem.into(),
        }
    }

    fn term(id: &str, field: Option<&str>, problem: impl Into<String>) -> Self {
        Self {
            term: Some(id.to_string()),
            field: field.map(str::to_string),
            problem: problem.into(),
        }
    }
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.term, &self.field) {
            (Some(term), Some(field)) => {
                write!(f, "term `{}`: field `{}`: {}", term, field, self.problem)
            }
            (Some(term), None) => write!(f, "term `{}`: {}", term, self.problem),
            (None, Some(field)) => write!(f, "field `{}`: {}", field, self.problem),
            (None, None) => write!(f, "{}", self.problem),
        }
    }
}

/// Fatal validation failure: the glossary document is structurally invalid.
///
/// Carries every defect found in one pass. The pipeline must not be
/// initialized from a document that produced this error.
#[derive(Debug, thiserror::Error)]
#[error("glossary schema validation failed with {} issue(s):\n{}", .issues.len(), format_issues(.issues))]
pub struct SchemaError {
    /// All defects found, in document order.
    pub issues: Vec<SchemaIssue>,
}

fn format_issues(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("  - {}", i))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validates a raw glossary document and builds the typed dictionary.
///
/// Pure function over the parsed JSON value; performs no I/O.
///
/// # Errors
///
/// Returns a [`SchemaError`] listing every structural defect when the root
/// is not an object, `version`/`lastUpdated`/`terms` are missing or of the
/// wrong type, or any term record is missing a field, has a blank string
/// field, or has a malformed `related` list.
pub fn validate(raw: &Value) -> Result<TermDictionary, SchemaError> {
    let mut issues: Vec<SchemaIssue> = Vec::new();

    let root = match raw.as_object() {
        Some(root) => root,
        None => {
            return Err(SchemaError {
                issues: vec![SchemaIssue::document(None, "glossary root must be an object")],
            });
        }
    };

    let version = require_document_string(root, "version", &mut issues);
    let last_updated = require_document_string(root, "lastUpdated", &mut issues);

    let mut terms: BTreeMap<String, TermRecord> = BTreeMap::new();
    match root.get("terms") {
        None => issues.push(SchemaIssue::document(
            Some("terms"),
            "missing required field",
        )),
        Some(Value::Object(entries)) => {
            for (id, entry) in entries {
                if let Some(record) = validate_record(id, entry, &mut issues) {
                    terms.insert(id.clone(), record);
                }
            }
        }
        Some(_) => issues.push(SchemaIssue::document(Some("terms"), "must be an object")),
    }

    match (version, last_updated, issues.is_empty()) {
        (Some(version), Some(last_updated), true) => Ok(TermDictionary {
            version,
            last_updated,
            terms,
        }),
        _ => Err(SchemaError { issues }),
    }
}

/// Validates one term record, pushing every defect found.
fn validate_record(id: &str, entry: &Value, issues: &mut Vec<SchemaIssue>) -> Option<TermRecord> {
    let obj = match entry.as_object() {
        Some(obj) => obj,
        None => {
            issues.push(SchemaIssue::term(id, None, "term record must be an object"));
            return None;
        }
    };

    let mut fields: BTreeMap<&str, String> = BTreeMap::new();
    for field in STRING_FIELDS {
        match obj.get(field) {
            None => issues.push(SchemaIssue::term(id, Some(field), "missing required field")),
            Some(Value::String(s)) if !s.trim().is_empty() => {
                fields.insert(field, s.clone());
            }
            Some(Value::String(_)) => {
                issues.push(SchemaIssue::term(id, Some(field), "must not be blank"));
            }
            Some(_) => issues.push(SchemaIssue::term(id, Some(field), "must be a string")),
        }
    }

    let related = match obj.get("related") {
        None => {
            issues.push(SchemaIssue::term(
                id,
                Some("related"),
                "missing required field",
            ));
            None
        }
        Some(Value::Array(items)) => {
            let mut related = Vec::with_capacity(items.len());
            let mut all_strings = true;
            for (index, item) in items.iter().enumerate() {
                match item.as_str() {
                    Some(s) => related.push(s.to_string()),
                    None => {
                        all_strings = false;
                        issues.push(SchemaIssue::term(
                            id,
                            Some("related"),
                            format!("entry {} must be a string", index),
                        ));
                    }
                }
            }
            all_strings.then_some(related)
        }
        Some(_) => {
            issues.push(SchemaIssue::term(id, Some("related"), "must be an array"));
            None
        }
    };

    match (
        fields.remove("display"),
        fields.remove("source"),
        fields.remove("definition"),
        fields.remove("category"),
        related,
    ) {
        (Some(display), Some(source), Some(definition), Some(category), Some(related)) => {
            Some(TermRecord {
                display,
                source,
                definition,
                category,
                related,
            })
        }
        _ => None,
    }
}

/// Validates a required document-level string field.
fn require_document_string(
    root: &serde_json::Map<String, Value>,
    field: &str,
    issues: &mut Vec<SchemaIssue>,
) -> Option<String> {
    match root.get(field) {
        None => {
            issues.push(SchemaIssue::document(Some(field), "missing required field"));
            None
        }
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::String(_)) => {
            issues.push(SchemaIssue::document(Some(field), "must not be blank"));
            None
        }
        Some(_) => {
            issues.push(SchemaIssue::document(Some(field), "must be a string"));
            None
        }
    }
}

/// Reads and validates a glossary file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or fails
/// schema validation.
pub fn load(path: &Path) -> anyhow::Result<TermDictionary> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read glossary: {}", path.display()))?;
    let raw: Value = serde_json::from_str(&source)
        .with_context(|| format!("Glossary is not valid JSON: {}", path.display()))?;
    validate(&raw).with_context(|| format!("Invalid glossary: {}", path.display()))
}

/// Checks referential integrity of `related` lists.
///
/// Returns one diagnostic per entry that names a nonexistent term id.
/// Advisory: a dictionary with dangling references still annotates
/// correctly, so this gates the build-time lint rather than the pipeline.
#[must_use]
pub fn check_references(dict: &TermDictionary) -> Vec<String> {
    let mut diagnostics = Vec::new();
    for (id, record) in dict.iter() {
        for related in &record.related {
            if !dict.contains(related) {
                diagnostics.push(format!(
                    "term `{}` references unknown term `{}`",
                    id, related
                ));
            }
        }
    }
    diagnostics
}

/// Checks translation consistency: the same source form (case-insensitive)
/// must always map to the same display form.
///
/// Returns lowercased source form → conflicting display forms, retaining
/// only source forms with more than one display form.
#[must_use]
pub fn check_consistency(dict: &TermDictionary) -> BTreeMap<String, BTreeSet<String>> {
    let mut by_source: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (_, record) in dict.iter() {
        by_source
            .entry(record.source.to_lowercase())
            .or_default()
            .insert(record.display.clone());
    }
    by_source.retain(|_, displays| displays.len() > 1);
    by_source
}
