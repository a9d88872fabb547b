//! `glossa-lint` — Validates the glossary file before a documentation build.
//!
//! Runs the full lint suite: schema validation (fatal), term-pattern
//! ordering (fatal), related-term references and translation consistency
//! (advisory warnings).
//!
//! **Usage:**
//! ```text
//! glossa-lint [--glossary <path>] [--deny-warnings]
//! ```
//!
//! Exits non-zero if any check fails, or if any check warns under
//! `--deny-warnings`.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use glossa_lint::{run_all, Severity};

/// Validate the Glossa glossary file.
#[derive(Parser)]
#[command(name = "glossa-lint", about = "Validate the Glossa glossary file")]
struct Args {
    /// Path to the glossary JSON document.
    #[arg(long, default_value = "data/terms.json")]
    glossary: PathBuf,

    /// Treat warnings as failures.
    #[arg(long)]
    deny_warnings: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let source = std::fs::read_to_string(&args.glossary)
        .with_context(|| format!("Cannot read glossary: {}", args.glossary.display()))?;
    let raw: serde_json::Value = serde_json::from_str(&source)
        .with_context(|| format!("Glossary is not valid JSON: {}", args.glossary.display()))?;

    let report = run_all(&raw);

    println!("Glossa Glossary Lint Report");
    println!("===========================");
    println!();

    let mut passed = 0usize;
    let mut failed = 0usize;
    let mut warned = 0usize;

    for result in &report.results {
        let status = match result.severity {
            Severity::Pass => {
                passed += 1;
                "PASS"
            }
            Severity::Warning => {
                warned += 1;
                "WARN"
            }
            Severity::Failure => {
                failed += 1;
                "FAIL"
            }
        };
        println!("[{}] {}: {}", status, result.check, result.message);
        for detail in &result.details {
            println!("       {}", detail);
        }
    }

    println!();
    println!(
        "Summary: {} passed, {} warnings, {} failed",
        passed, warned, failed
    );

    if failed > 0 {
        eprintln!("Glossary lint FAILED: {} check(s) did not pass.", failed);
        process::exit(1);
    }
    if args.deny_warnings && warned > 0 {
        eprintln!(
            "Glossary lint FAILED: {} warning(s) with --deny-warnings.",
            warned
        );
        process::exit(1);
    }

    println!("Glossary lint PASSED.");
    Ok(())
}
