//! Build-time lint suite for the Glossa glossary.
//!
//! Gates the documentation build on glossary health: the schema must hold
//! (fatal), the compiled term pattern must preserve the longest-first
//! ordering (fatal), and related-term references and translation
//! consistency are reported as advisory warnings.
//!
//! # Entry Point
//!
//! ```
//! let raw = serde_json::json!({
//!     "version": "1.0.0",
//!     "lastUpdated": "2026-08-01",
//!     "terms": {}
//! });
//! let report = glossa_lint::run_all(&raw);
//! assert!(report.all_passed());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod checks;
pub mod report;

pub use checks::{
    check_pattern, check_referential_integrity, check_schema, check_translation_consistency,
    run_all,
};
pub use report::{CheckResult, LintReport, Severity};
