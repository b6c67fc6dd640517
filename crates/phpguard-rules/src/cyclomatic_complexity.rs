//! Rule to limit the cyclomatic complexity of functions and methods.
//!
//! Complexity starts at 1 and grows by one for every decision point found
//! in the body: `if`, `elseif`, `for`, `foreach`, `while`, `case`, `catch`,
//! `&&` / `||` followed by whitespace, and ternary operators. Comments and
//! string contents are ignored.
//!
//! # Configuration
//!
//! - `max_complexity`: Maximum complexity (default: 10)

use std::sync::LazyLock;

use phpguard_core::utils::{scan_body, static_regex};
use phpguard_core::{FileContext, Issue, Rule, RuleConfig, SourceModel};
use regex::Regex;

/// Rule code for cyclomatic-complexity.
pub const CODE: &str = "PG011";

/// Rule name for cyclomatic-complexity.
pub const NAME: &str = "cyclomatic-complexity";

static BRANCH_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    static_regex(r"(?i)\b(?:if|elseif|for|foreach|while|case|catch)\b")
});

static LOGICAL_OPERATOR: LazyLock<Regex> = LazyLock::new(|| static_regex(r"(?:&&|\|\|)\s"));

/// Null coalescing and null-safe access, which are not branches.
static NULL_OPERATOR: LazyLock<Regex> = LazyLock::new(|| static_regex(r"\?\?=?|\?->"));

static TERNARY: LazyLock<Regex> = LazyLock::new(|| static_regex(r"\?[^?]*?:"));

/// Limits cyclomatic complexity.
#[derive(Debug, Clone)]
pub struct CyclomaticComplexity {
    max_complexity: usize,
}

impl Default for CyclomaticComplexity {
    fn default() -> Self {
        Self::new()
    }
}

impl CyclomaticComplexity {
    /// Default maximum complexity.
    pub const DEFAULT_MAX: usize = 10;

    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_complexity: Self::DEFAULT_MAX,
        }
    }

    /// Creates a rule from its `[rules.cyclomatic-complexity]` table.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        Self::new().with_config(config)
    }

    /// Overrides the limit if `config` sets one.
    #[must_use]
    pub fn with_config(self, config: &RuleConfig) -> Self {
        let current = self.max_complexity;
        self.max_complexity(config.get_usize("max_complexity", current))
    }

    /// Sets the maximum complexity.
    #[must_use]
    pub fn max_complexity(mut self, max: usize) -> Self {
        self.max_complexity = max;
        self
    }
}

/// Complexity of the function declared on the 1-based line `declaration`.
#[must_use]
pub fn complexity(lines: &[String], declaration: usize) -> usize {
    let Some(start) = declaration.checked_sub(1) else {
        return 1;
    };
    let body = scan_body(lines, start);

    1 + body
        .code
        .iter()
        .map(|(_, code)| {
            let code = NULL_OPERATOR.replace_all(code, " ");
            BRANCH_KEYWORD.find_iter(&code).count()
                + LOGICAL_OPERATOR.find_iter(&code).count()
                + TERNARY.find_iter(&code).count()
        })
        .sum::<usize>()
}

impl Rule for CyclomaticComplexity {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Limits the cyclomatic complexity of functions"
    }

    fn check(&self, ctx: &FileContext, model: &SourceModel) -> Vec<Issue> {
        model
            .functions
            .iter()
            .filter_map(|function| {
                let value = complexity(ctx.lines, function.line());
                (value > self.max_complexity).then(|| {
                    ctx.issue(
                        function.line(),
                        format!(
                            "Function \"{}\" has cyclomatic complexity of {value}. (max: {})",
                            function.qualified_name(),
                            self.max_complexity
                        ),
                    )
                })
            })
            .collect()
    }
}
