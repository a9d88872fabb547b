//! Term-annotation pipeline for the Glossa documentation toolkit.
//!
//! Scans prose for glossary term occurrences and rewrites the document
//! token stream to carry per-occurrence annotations, while passing code
//! spans, code blocks, link internals, and explicitly ignored regions
//! through untouched.
//!
//! The pipeline is assembled from four pieces, leaves first:
//!
//! 1. a validated [`TermDictionary`](glossa_terms::TermDictionary),
//! 2. the [`TermPattern`] compiled from it (longest source form first, so
//!    `TaskSet` always wins over `Task`),
//! 3. the [`ScanState`] region classifier tracking ignore directives and
//!    link nesting, and
//! 4. the [`TermAnnotator`] orchestrating one pass over a token sequence.
//!
//! All pipeline state is immutable after construction; the only mutable
//! pieces are the caller-supplied [`OccurrenceTracker`] and the per-pass
//! [`ScanState`], so documents may be annotated in parallel as long as
//! each pass gets its own tracker.
//!
//! # Entry Point
//!
//! ```
//! use glossa_annotate::{AnnotateOptions, OccurrenceTracker, TermAnnotator, Token};
//!
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
//! let annotator = TermAnnotator::new(dict, AnnotateOptions::default()).unwrap();
//!
//! let mut tracker = OccurrenceTracker::new();
//! let tokens = vec![Token::Text("A User appears.".to_string())];
//! let annotated = annotator.annotate_tokens(tokens, &mut tracker);
//! assert_eq!(annotated.len(), 3); // "A ", annotation, " appears."
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod annotator;
pub mod classify;
pub mod markdown;
pub mod pattern;
pub mod token;

pub use annotator::{AnnotateOptions, MatchSpan, OccurrenceTracker, TermAnnotator};
pub use classify::{IgnoreDirectives, ScanState};
pub use markdown::{annotate_markdown, escape_html};
pub use pattern::TermPattern;
pub use token::{TermAnnotation, Token};
