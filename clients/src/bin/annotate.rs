//! `glossa-annotate` — Annotates a directory of Markdown content.
//!
//! Validates the glossary (fatal on schema errors), then walks the content
//! directory and renders each `.md` file to annotated HTML, preserving the
//! directory layout. Also writes `search-index.json`, the glossary index
//! consumed by the site's client-side search.
//!
//! **Usage:**
//! ```text
//! glossa-annotate [--glossary <path>] [--content <dir>] [--out <dir>]
//!                 [--plain-occurrences] [--site-wide-first]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use walkdir::WalkDir;

use glossa_annotate::{annotate_markdown, AnnotateOptions, OccurrenceTracker, TermAnnotator};
use glossa_terms::TermDictionary;

/// Annotate Markdown content with glossary term tooltips.
#[derive(Parser)]
#[command(
    name = "glossa-annotate",
    about = "Annotate Markdown content with glossary term tooltips"
)]
struct Args {
    /// Path to the glossary JSON document.
    #[arg(long, default_value = "data/terms.json")]
    glossary: PathBuf,

    /// Directory of Markdown content to annotate.
    #[arg(long, default_value = "content")]
    content: PathBuf,

    /// Output directory for annotated HTML.
    #[arg(long, default_value = "public")]
    out: PathBuf,

    /// Do not mark first occurrences (every annotation renders the terse
    /// form).
    #[arg(long)]
    plain_occurrences: bool,

    /// Track first occurrences across the whole run instead of per
    /// document.
    #[arg(long)]
    site_wide_first: bool,
}

/// An entry in the JSON search index.
#[derive(Debug, Serialize)]
struct SearchEntry {
    /// Localized display form.
    label: String,
    /// `"中文(English)"` form shown in search results.
    bilingual: String,
    /// Term definition.
    description: String,
    /// Category label.
    kind: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let dict = glossa_terms::load(&args.glossary)?;
    let options = AnnotateOptions {
        mark_first_occurrence: !args.plain_occurrences,
        ..AnnotateOptions::default()
    };
    let annotator = TermAnnotator::new(dict, options)
        .map_err(|e| anyhow::anyhow!("Term pattern failed to compile: {}", e))?;

    let mut site_tracker = OccurrenceTracker::new();
    let mut page_count = 0usize;

    for entry in WalkDir::new(&args.content)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|x| x == "md").unwrap_or(false))
    {
        let path = entry.path();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;

        let mut page_tracker = OccurrenceTracker::new();
        let tracker = if args.site_wide_first {
            &mut site_tracker
        } else {
            &mut page_tracker
        };
        let html = annotate_markdown(&annotator, &source, tracker);

        let rel = path.strip_prefix(&args.content).unwrap_or(path);
        let out_path = args.out.join(rel).with_extension("html");
        write_file(&out_path, &html)?;
        page_count += 1;
    }

    let index_json = search_index_json(annotator.dictionary())?;
    write_file(&args.out.join("search-index.json"), &index_json)?;

    println!("Annotation complete.");
    println!("  Pages: {}", page_count);
    println!("  Terms: {}", annotator.dictionary().len());
    println!("  Out:   {}", args.out.display());

    Ok(())
}

/// Serializes the glossary as the site's search index.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
fn search_index_json(dict: &TermDictionary) -> Result<String> {
    let entries: Vec<SearchEntry> = dict
        .iter()
        .map(|(_, record)| SearchEntry {
            label: record.display.clone(),
            bilingual: record.bilingual(),
            description: record.definition.clone(),
            kind: record.category.clone(),
        })
        .collect();
    serde_json::to_string(&entries)
        .map_err(|e| anyhow::anyhow!("Failed to serialize search index: {}", e))
}

/// Writes a file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot
/// be written.
fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(())
}
