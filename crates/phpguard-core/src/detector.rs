//! Running one rule over a set of files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, warn};

use crate::context::{relative_to, FileContext};
use crate::discovery::Discovery;
use crate::parser;
use crate::rule::RuleBox;
use crate::source::read_lines;
use crate::types::Issue;

/// Fatal failures that stop a run before any file is read.
#[derive(Debug, Error, Diagnostic)]
pub enum DetectError {
    /// The directory to analyze does not exist or is not a directory.
    #[error("Directory not found: {0}")]
    #[diagnostic(
        code(phpguard::detect::directory_not_found),
        help("pass an existing directory, e.g. `phpguard check src`")
    )]
    DirectoryNotFound(PathBuf),
}

/// A rule together with the state of its latest run.
///
/// Each call to [`Detector::detect`] or [`Detector::detect_files`] resets
/// the state, so running twice over the same input yields the same issues.
pub struct Detector {
    rule: RuleBox,
    issues: Vec<Issue>,
    files_checked: usize,
    errors: BTreeMap<PathBuf, String>,
}

impl Detector {
    /// Wraps a rule.
    #[must_use]
    pub fn new(rule: RuleBox) -> Self {
        Self {
            rule,
            issues: Vec::new(),
            files_checked: 0,
            errors: BTreeMap::new(),
        }
    }

    /// Rule name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.rule.name()
    }

    /// Rule code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.rule.code()
    }

    /// Rule description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        self.rule.description()
    }

    /// Discovers files under `root` and runs the rule over them.
    ///
    /// Returns true iff no issue was reported.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::DirectoryNotFound`] if `root` is not a
    /// directory. No file is touched in that case.
    pub fn detect(&mut self, root: &Path, discovery: &Discovery) -> Result<bool, DetectError> {
        if !root.is_dir() {
            return Err(DetectError::DirectoryNotFound(root.to_path_buf()));
        }
        let found = discovery.discover(root);
        let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        let passed = self.detect_files(&root, &found.files)?;
        for (path, message) in found.errors {
            self.errors.insert(relative_to(&path, &root), message);
        }
        Ok(passed)
    }

    /// Runs the rule over already-discovered files.
    ///
    /// Issue paths are relative to `root`. Files that cannot be read are
    /// recorded in [`Detector::errors`] and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::DirectoryNotFound`] if `root` is not a
    /// directory.
    pub fn detect_files(&mut self, root: &Path, files: &[PathBuf]) -> Result<bool, DetectError> {
        if !root.is_dir() {
            return Err(DetectError::DirectoryNotFound(root.to_path_buf()));
        }
        self.reset();

        for path in files {
            let relative = relative_to(path, root);
            let lines = match read_lines(path) {
                Ok(lines) => lines,
                Err(e) => {
                    warn!("{}: {e}", self.rule.name());
                    self.errors.insert(relative, e.to_string());
                    continue;
                }
            };

            let model = parser::parse(&lines);
            let ctx = FileContext::new(path, &lines, root);
            let mut issues = self.rule.check(&ctx, &model);
            issues.sort_by_key(Issue::line);
            debug!(
                "{} found {} issue(s) in {}",
                self.rule.name(),
                issues.len(),
                relative.display()
            );

            let (code, name) = (self.rule.code(), self.rule.name());
            self.issues
                .extend(issues.into_iter().map(|issue| issue.with_rule(code, name)));
            self.files_checked += 1;
        }

        Ok(self.issues.is_empty())
    }

    fn reset(&mut self) {
        self.issues.clear();
        self.files_checked = 0;
        self.errors.clear();
    }

    /// Issues from the latest run.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Files analyzed in the latest run.
    #[must_use]
    pub fn files(&self) -> usize {
        self.files_checked
    }

    /// Unreadable files from the latest run, keyed by relative path.
    #[must_use]
    pub fn errors(&self) -> &BTreeMap<PathBuf, String> {
        &self.errors
    }

    /// Consumes the detector, returning issues and errors of the last run.
    #[must_use]
    pub fn into_results(self) -> (Vec<Issue>, usize, BTreeMap<PathBuf, String>) {
        (self.issues, self.files_checked, self.errors)
    }
}

impl std::fmt::Debug for Detector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Detector")
            .field("rule", &self.rule.name())
            .field("issues", &self.issues.len())
            .field("files_checked", &self.files_checked)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceModel;
    use crate::rule::Rule;

    struct ClassCounter;

    impl Rule for ClassCounter {
        fn name(&self) -> &'static str {
            "class-counter"
        }
        fn code(&self) -> &'static str {
            "T001"
        }
        fn check(&self, ctx: &FileContext, model: &SourceModel) -> Vec<Issue> {
            model
                .classes
                .iter()
                .rev()
                .map(|c| ctx.issue(c.start_line(), c.name().to_string()))
                .collect()
        }
    }

    #[test]
    fn missing_root_is_fatal() {
        let mut detector = Detector::new(Box::new(ClassCounter));
        let err = detector
            .detect(Path::new("/definitely/not/here"), &Discovery::default())
            .unwrap_err();
        assert!(matches!(err, DetectError::DirectoryNotFound(_)));
        assert_eq!(detector.files(), 0);
    }

    #[test]
    fn records_issues_and_errors() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        std::fs::write(root.join("a.php"), "<?php\nclass A {}\nclass B {}\n").unwrap();
        std::fs::write(root.join("b.php"), "<?php\n").unwrap();

        let mut detector = Detector::new(Box::new(ClassCounter));
        let passed = detector.detect(&root, &Discovery::default()).unwrap();
        assert!(!passed);
        assert_eq!(detector.files(), 2);
        let rendered: Vec<String> = detector.issues().iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["[a.php:2] A", "[a.php:3] B"]);
        assert_eq!(detector.issues()[0].code(), Some("T001"));

        let files = vec![root.join("a.php"), root.join("gone.php")];
        let passed = detector.detect_files(&root, &files).unwrap();
        assert!(!passed);
        assert_eq!(detector.files(), 1);
        assert_eq!(detector.issues().len(), 2);
        assert!(detector.errors().contains_key(Path::new("gone.php")));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.php"), "<?php\nclass A {}\n").unwrap();

        let mut detector = Detector::new(Box::new(ClassCounter));
        detector.detect(dir.path(), &Discovery::default()).unwrap();
        let first = detector.issues().to_vec();
        detector.detect(dir.path(), &Discovery::default()).unwrap();
        assert_eq!(first, detector.issues());
        assert_eq!(detector.files(), 1);
    }
}
