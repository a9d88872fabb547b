//! Lint report types: results, severity levels, and report aggregation.

/// Severity level of a lint check result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    /// The check passed.
    Pass,
    /// The check identified an advisory problem (non-blocking).
    Warning,
    /// The check failed (blocks the build).
    Failure,
}

/// A single lint check result.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Short identifier of the check that produced this result.
    pub check: String,
    /// Human-readable message describing the outcome.
    pub message: String,
    /// Severity of the result.
    pub severity: Severity,
    /// Optional additional detail lines.
    pub details: Vec<String>,
}

impl CheckResult {
    /// Creates a passing result.
    pub fn pass(check: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            message: message.into(),
            severity: Severity::Pass,
            details: Vec::new(),
        }
    }

    /// Creates a failure result.
    pub fn fail(check: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            message: message.into(),
            severity: Severity::Failure,
            details: Vec::new(),
        }
    }

    /// Creates a failure result with additional detail lines.
    pub fn fail_with_details(
        check: impl Into<String>,
        message: impl Into<String>,
        details: Vec<String>,
    ) -> Self {
        Self {
            check: check.into(),
            message: message.into(),
            severity: Severity::Failure,
            details,
        }
    }

    /// Creates a warning result.
    pub fn warn(check: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            message: message.into(),
            severity: Severity::Warning,
            details: Vec::new(),
        }
    }

    /// Creates a warning result with additional detail lines.
    pub fn warn_with_details(
        check: impl Into<String>,
        message: impl Into<String>,
        details: Vec<String>,
    ) -> Self {
        Self {
            check: check.into(),
            message: message.into(),
            severity: Severity::Warning,
            details,
        }
    }

    /// Returns true if this result represents a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.severity == Severity::Failure
    }

    /// Returns true if this result represents a warning.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

/// Aggregated lint report from all checks.
#[derive(Debug, Default)]
pub struct LintReport {
    /// All individual check results.
    pub results: Vec<CheckResult>,
}

impl LintReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a result to this report.
    pub fn push(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    /// Extends this report with results from another report.
    pub fn extend(&mut self, other: LintReport) {
        self.results.extend(other.results);
    }

    /// Returns the count of failed checks.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }

    /// Returns the count of warning checks.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_warning()).count()
    }

    /// Returns true if all checks passed (no failures; warnings allowed).
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failure_count() == 0
    }
}
