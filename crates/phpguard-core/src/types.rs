//! Core types for issues and run results.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// One finding reported by a rule.
///
/// Equality only looks at file, line and message; the producing rule is
/// bookkeeping for output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    file: PathBuf,
    line: usize,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl Issue {
    /// Creates an issue at a 1-based line of `file` (relative to the root).
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            message: message.into(),
            code: None,
            rule: None,
            help: None,
        }
    }

    /// Records the rule that produced this issue.
    #[must_use]
    pub fn with_rule(mut self, code: &str, rule: &str) -> Self {
        self.code = Some(code.to_string());
        self.rule = Some(rule.to_string());
        self
    }

    /// Adds a hint on how to fix the issue.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// File path relative to the analyzed root.
    #[must_use]
    pub fn file(&self) -> &std::path::Path {
        &self.file
    }

    /// 1-based line.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Code of the producing rule (e.g. "PG001").
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Name of the producing rule (e.g. "naming-convention").
    #[must_use]
    pub fn rule(&self) -> Option<&str> {
        self.rule.as_deref()
    }

    /// Fix hint.
    #[must_use]
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

impl PartialEq for Issue {
    fn eq(&self, other: &Self) -> bool {
        self.file == other.file && self.line == other.line && self.message == other.message
    }
}

impl Eq for Issue {}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}:{}] {}", self.file.display(), self.line, self.message)
    }
}

/// An [`Issue`] rendered through miette.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct IssueDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
}

impl From<&Issue> for IssueDiagnostic {
    fn from(issue: &Issue) -> Self {
        let message = match issue.code() {
            Some(code) => format!("[{code}] {issue}"),
            None => issue.to_string(),
        };
        Self {
            message,
            help: issue.help.clone(),
        }
    }
}

/// What one rule found over the whole file set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleOutcome {
    /// Rule name.
    pub rule: String,
    /// Rule code.
    pub code: String,
    /// True iff the rule reported no issues.
    pub passed: bool,
    /// Issues in discovery order, then line order.
    pub issues: Vec<Issue>,
    /// Number of files the rule analyzed.
    pub files_checked: usize,
    /// Files that could not be read, with the reason.
    pub errors: BTreeMap<PathBuf, String>,
    /// Wall time spent in the rule.
    #[serde(with = "duration_millis")]
    pub elapsed: Duration,
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Result of running every registered rule.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct LintResult {
    /// Per-rule outcomes in registration order.
    pub outcomes: Vec<RuleOutcome>,
}

impl LintResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff every rule passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    /// Sum of the files each rule analyzed.
    #[must_use]
    pub fn total_files(&self) -> usize {
        self.outcomes.iter().map(|o| o.files_checked).sum()
    }

    /// All issues, rule by rule.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.outcomes.iter().flat_map(|o| o.issues.iter())
    }

    /// Number of issues over all rules.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.issues.len()).sum()
    }

    /// Number of unreadable-file errors over all rules.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.errors.len()).sum()
    }

    /// Prints a summary report to stdout.
    pub fn print_report(&self) {
        print!("{}", self.format_report());
    }

    /// Formats the per-rule progress, issues and summary as text.
    #[must_use]
    pub fn format_report(&self) -> String {
        use std::fmt::Write;

        let mut report = String::new();
        for outcome in &self.outcomes {
            let status = if outcome.passed {
                "OK".to_string()
            } else {
                format!("{} issue(s)", outcome.issues.len())
            };
            let _ = writeln!(
                report,
                "{} {:<24} {} ({} ms)",
                outcome.code,
                outcome.rule,
                status,
                outcome.elapsed.as_millis()
            );
        }

        let issues: Vec<&Issue> = self.issues().collect();
        if !issues.is_empty() {
            let _ = writeln!(report);
            for issue in &issues {
                let _ = writeln!(report, "{issue}");
            }
        }

        let errors: Vec<(&PathBuf, &String)> =
            self.outcomes.iter().flat_map(|o| o.errors.iter()).collect();
        if !errors.is_empty() {
            let _ = writeln!(report, "\nErrors:");
            for (file, message) in errors {
                let _ = writeln!(report, "  {}: {message}", file.display());
            }
        }

        let _ = writeln!(
            report,
            "\n{} rule(s), {} file check(s), {} issue(s): {}",
            self.outcomes.len(),
            self.total_files(),
            issues.len(),
            if self.passed() { "PASSED" } else { "FAILED" }
        );
        report
    }
}
