//! Bilingual glossary for the Glossa documentation toolkit.
//!
//! The `glossa-terms` crate owns the term dictionary that drives term
//! annotation across the localized manual: the data model, exhaustive
//! schema validation of the JSON source document, and the advisory checks
//! (referential integrity, translation consistency) consumed by the
//! build-time lint suite.
//!
//! The dictionary is loaded and validated once at startup and is read-only
//! thereafter; a document that fails validation never produces a partial
//! dictionary.
//!
//! # Entry Point
//!
//! ```
//! let raw = serde_json::json!({
//!     "version": "1.0.0",
//!     "lastUpdated": "2026-08-01",
//!     "terms": {
//!         "user": {
//!             "display": "用户",
//!             "source": "User",
//!             "definition": "A simulated visitor generating load.",
//!             "category": "core",
//!             "related": []
//!         }
//!     }
//! });
//! let dict = glossa_terms::validate(&raw).unwrap();
//! assert_eq!(dict.len(), 1);
//! assert_eq!(dict.display_for_source("user"), Some("用户"));
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod model;
pub mod query;
pub mod validate;

pub use model::{TermDictionary, TermRecord};
pub use validate::{check_consistency, check_references, load, validate, SchemaError, SchemaIssue};
