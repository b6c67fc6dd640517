//! Core analyzer for orchestrating lint execution.

use crate::config::{Config, ConfigError};
use crate::detector::{DetectError, Detector};
use crate::discovery::Discovery;
use crate::rule::{Rule, RuleBox};
use crate::types::{LintResult, RuleOutcome};

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while building or running an analyzer.
#[derive(Debug, Error, Diagnostic)]
pub enum AnalyzerError {
    /// IO error resolving the root.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    /// Fatal precondition failure.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Detect(#[from] DetectError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    exclude_dirs: Vec<String>,
    respect_gitignore: Option<bool>,
    preload_gitignores: Option<bool>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules, keeping their order.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Adds an exclude glob pattern, relative to the root.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Adds a directory name that is never descended into.
    #[must_use]
    pub fn exclude_dir(mut self, name: impl Into<String>) -> Self {
        self.exclude_dirs.push(name.into());
        self
    }

    /// Sets whether `.gitignore` files are honored (default: true).
    #[must_use]
    pub fn respect_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = Some(respect);
        self
    }

    /// Sets whether nested `.gitignore` files are loaded up front
    /// (default: true).
    #[must_use]
    pub fn preload_gitignores(mut self, preload: bool) -> Self {
        self.preload_gitignores = Some(preload);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    ///
    /// Builder settings take precedence over the configuration's
    /// `[analyzer]` table; exclude patterns and directories are merged.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be resolved or an
    /// exclude pattern is not a valid glob.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self.root.unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut analyzer_config = config.analyzer.clone();
        analyzer_config.exclude.extend(self.exclude_patterns);
        for dir in self.exclude_dirs {
            if !analyzer_config.exclude_dirs.contains(&dir) {
                analyzer_config.exclude_dirs.push(dir);
            }
        }
        if let Some(respect) = self.respect_gitignore {
            analyzer_config.respect_gitignore = respect;
        }
        if let Some(preload) = self.preload_gitignores {
            analyzer_config.preload_gitignores = preload;
        }
        let discovery = analyzer_config.discovery()?;

        Ok(Analyzer {
            root,
            rules: self.rules,
            discovery,
            config,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    discovery: Discovery,
    config: Config,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the discovery settings in effect.
    #[must_use]
    pub fn discovery(&self) -> &Discovery {
        &self.discovery
    }

    /// Discovers files once, then runs every enabled rule over them in
    /// registration order.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::DirectoryNotFound`] (wrapped) if the root is
    /// not a directory. Unreadable files are not errors; they are reported
    /// in each [`RuleOutcome::errors`].
    pub fn analyze(self) -> Result<LintResult, AnalyzerError> {
        if !self.root.is_dir() {
            return Err(DetectError::DirectoryNotFound(self.root).into());
        }
        info!("Starting analysis at {}", self.root.display());

        let found = self.discovery.discover(&self.root);
        let root = self
            .root
            .canonicalize()
            .unwrap_or_else(|_| self.root.clone());
        info!("Found {} PHP file(s) to analyze", found.files.len());
        for (path, message) in &found.errors {
            warn!("Could not visit {}: {message}", path.display());
        }

        let mut result = LintResult::new();
        for rule in self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let mut detector = Detector::new(rule);
            let started = Instant::now();
            let passed = detector.detect_files(&root, &found.files)?;
            let elapsed = started.elapsed();

            let (rule, code) = (detector.name().to_string(), detector.code().to_string());
            let (issues, files_checked, errors) = detector.into_results();
            info!(
                "{code} {rule}: {} issue(s) in {} file(s) ({} ms)",
                issues.len(),
                files_checked,
                elapsed.as_millis()
            );

            result.outcomes.push(RuleOutcome {
                rule,
                code,
                passed,
                issues,
                files_checked,
                errors,
                elapsed,
            });
        }

        info!(
            "Analysis complete: {} issue(s), {}",
            result.issue_count(),
            if result.passed() { "passed" } else { "failed" }
        );
        Ok(result)
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("root", &self.root)
            .field("rules", &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>())
            .field("discovery", &self.discovery)
            .finish_non_exhaustive()
    }
}
