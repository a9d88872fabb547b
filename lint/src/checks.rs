//! The individual glossary lint checks.

use serde_json::Value;

use glossa_annotate::TermPattern;
use glossa_terms::{check_consistency, check_references, validate, TermDictionary};

use crate::report::{CheckResult, LintReport};

/// Validates the raw glossary document against the schema.
///
/// A failure carries one detail line per structural defect. Returns the
/// validated dictionary on success so later checks can reuse it; schema
/// failure yields no dictionary — the dictionary-dependent checks must not
/// run against a partially-valid document.
#[must_use]
pub fn check_schema(raw: &Value) -> (LintReport, Option<TermDictionary>) {
    let mut report = LintReport::new();
    match validate(raw) {
        Ok(dict) => {
            report.push(CheckResult::pass(
                "glossary/schema",
                format!("{} term(s) validated", dict.len()),
            ));
            (report, Some(dict))
        }
        Err(err) => {
            let details = err.issues.iter().map(ToString::to_string).collect();
            report.push(CheckResult::fail_with_details(
                "glossary/schema",
                format!("schema validation failed with {} issue(s)", err.issues.len()),
                details,
            ));
            (report, None)
        }
    }
}

/// Compiles the term pattern and asserts the longest-first ordering that
/// maximal-munch matching depends on.
#[must_use]
pub fn check_pattern(dict: &TermDictionary) -> LintReport {
    let mut report = LintReport::new();

    let pattern = match TermPattern::compile(dict) {
        Ok(pattern) => pattern,
        Err(err) => {
            report.push(CheckResult::fail(
                "glossary/pattern",
                format!("term pattern failed to compile: {}", err),
            ));
            return report;
        }
    };

    let sources = pattern.ordered_sources();
    let out_of_order: Vec<String> = sources
        .windows(2)
        .filter(|pair| pair[0].len() < pair[1].len())
        .map(|pair| format!("`{}` sorted before longer `{}`", pair[0], pair[1]))
        .collect();

    if out_of_order.is_empty() {
        report.push(CheckResult::pass(
            "glossary/pattern",
            format!("pattern compiled; {} source form(s) longest-first", sources.len()),
        ));
    } else {
        report.push(CheckResult::fail_with_details(
            "glossary/pattern",
            "source forms are not ordered longest-first",
            out_of_order,
        ));
    }

    report
}

/// Flags `related` entries that reference nonexistent term ids. Advisory.
#[must_use]
pub fn check_referential_integrity(dict: &TermDictionary) -> LintReport {
    let mut report = LintReport::new();
    let diagnostics = check_references(dict);

    if diagnostics.is_empty() {
        report.push(CheckResult::pass(
            "glossary/references",
            "all related-term references resolve",
        ));
    } else {
        report.push(CheckResult::warn_with_details(
            "glossary/references",
            format!("{} dangling related-term reference(s)", diagnostics.len()),
            diagnostics,
        ));
    }

    report
}

/// Flags source forms translated inconsistently across the glossary.
/// Advisory.
#[must_use]
pub fn check_translation_consistency(dict: &TermDictionary) -> LintReport {
    let mut report = LintReport::new();
    let conflicts = check_consistency(dict);

    if conflicts.is_empty() {
        report.push(CheckResult::pass(
            "glossary/consistency",
            "every source form has a single display form",
        ));
    } else {
        let details = conflicts
            .iter()
            .map(|(source, displays)| {
                format!(
                    "`{}` renders as: {}",
                    source,
                    displays.iter().cloned().collect::<Vec<_>>().join(", ")
                )
            })
            .collect();
        report.push(CheckResult::warn_with_details(
            "glossary/consistency",
            format!("{} inconsistently translated source form(s)", conflicts.len()),
            details,
        ));
    }

    report
}

/// Runs all glossary checks in dependency order: schema first, then the
/// dictionary-dependent checks. A schema failure short-circuits the rest.
#[must_use]
pub fn run_all(raw: &Value) -> LintReport {
    let (mut report, dict) = check_schema(raw);

    if let Some(dict) = dict {
        report.extend(check_pattern(&dict));
        report.extend(check_referential_integrity(&dict));
        report.extend(check_translation_consistency(&dict));
    }

    report
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_raw() -> Value {
        json!({
            "version": "1.0.0",
            "lastUpdated": "2026-08-01",
            "terms": {
                "task": {
                    "display": "任务",
                    "source": "Task",
                    "definition": "One unit of simulated work.",
                    "category": "core",
                    "related": ["task-set"]
                },
                "task-set": {
                    "display": "任务集",
                    "source": "TaskSet",
                    "definition": "A weighted collection of tasks.",
                    "category": "core",
                    "related": ["task"]
                }
            }
        })
    }

    #[test]
    fn clean_glossary_passes_everything() {
        let report = run_all(&valid_raw());
        assert!(report.all_passed());
        assert_eq!(report.warning_count(), 0);
        assert_eq!(report.results.len(), 4);
    }

    #[test]
    fn schema_failure_short_circuits() {
        let report = run_all(&json!({ "version": "1.0.0" }));
        assert!(!report.all_passed());
        // Only the schema check ran.
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].check, "glossary/schema");
        assert!(!report.results[0].details.is_empty());
    }

    #[test]
    fn dangling_reference_is_a_warning_not_a_failure() {
        let mut raw = valid_raw();
        raw["terms"]["task"]["related"] = json!(["ghost"]);
        let report = run_all(&raw);
        assert!(report.all_passed());
        assert_eq!(report.warning_count(), 1);
        let warning = report
            .results
            .iter()
            .find(|r| r.check == "glossary/references")
            .expect("references result");
        assert!(warning.details[0].contains("ghost"));
    }

    #[test]
    fn inconsistent_translation_is_flagged() {
        let mut raw = valid_raw();
        raw["terms"]["task-alias"] = json!({
            "display": "工作",
            "source": "task",
            "definition": "Conflicting translation of Task.",
            "category": "core",
            "related": []
        });
        let report = run_all(&raw);
        assert!(report.all_passed());
        let warning = report
            .results
            .iter()
            .find(|r| r.check == "glossary/consistency")
            .expect("consistency result");
        assert!(warning.is_warning());
        assert!(warning.details[0].contains("task"));
    }

    #[test]
    fn pattern_check_reports_ordering() {
        let dict = glossa_terms::validate(&valid_raw()).expect("valid fixture");
        let report = check_pattern(&dict);
        assert!(report.all_passed());
        assert!(report.results[0].message.contains("longest-first"));
    }
}
