//! Rule checking basic PSR-12 layout.
//!
//! # Detected Patterns
//!
//! - File not starting with `<?php`
//! - `declare(strict_types=1)` present but not on line 2 or 3
//! - Tabs in indentation, or indentation not a multiple of 4 spaces
//! - Lines longer than the configured limit (trailing whitespace ignored)
//!
//! # Configuration
//!
//! - `max_line_length`: Maximum characters per line (default: 120)

use phpguard_core::{FileContext, Issue, Rule, RuleConfig, SourceModel};

/// Rule code for psr12-compliance.
pub const CODE: &str = "PG004";

/// Rule name for psr12-compliance.
pub const NAME: &str = "psr12-compliance";

/// Lines searched for the strict types declaration.
const DECLARE_SEARCH_LINES: usize = 5;

/// Configuration for the PSR-12 checks.
#[derive(Debug, Clone)]
pub struct Psr12ComplianceConfig {
    /// Maximum characters per line.
    pub max_line_length: usize,
}

impl Default for Psr12ComplianceConfig {
    fn default() -> Self {
        Self {
            max_line_length: 120,
        }
    }
}

/// Checks file layout, indentation and line length.
#[derive(Debug, Clone, Default)]
pub struct Psr12Compliance {
    config: Psr12ComplianceConfig,
}

impl Psr12Compliance {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a rule from its `[rules.psr12-compliance]` table.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        Self::new().with_config(config)
    }

    /// Overrides the limit if `config` sets one.
    #[must_use]
    pub fn with_config(self, config: &RuleConfig) -> Self {
        let current = self.config.max_line_length;
        self.max_line_length(config.get_usize("max_line_length", current))
    }

    /// Sets the maximum line length.
    #[must_use]
    pub fn max_line_length(mut self, max: usize) -> Self {
        self.config.max_line_length = max;
        self
    }

    fn check_file_structure(&self, ctx: &FileContext, model: &SourceModel, issues: &mut Vec<Issue>) {
        if ctx
            .lines
            .first()
            .is_some_and(|first| !first.trim().starts_with("<?php"))
        {
            issues.push(ctx.issue(1, "File must start with <?php tag."));
        }

        if !model.strict_types {
            return;
        }
        let declared_at = ctx
            .lines
            .iter()
            .take(DECLARE_SEARCH_LINES)
            .position(|line| line.contains("declare(strict_types=1)"));
        if let Some(idx) = declared_at.filter(|&idx| idx > 2) {
            issues.push(ctx.issue(idx + 1, "declare(strict_types=1) must be on line 2 or 3."));
        }
    }

    fn check_line(&self, ctx: &FileContext, number: usize, line: &str, issues: &mut Vec<Issue>) {
        if line.trim().is_empty() {
            return;
        }

        let indent: &str = &line[..line.len() - line.trim_start().len()];
        if indent.contains('\t') {
            issues.push(ctx.issue(number, "Indentation must use spaces, not tabs."));
        }
        if indent.chars().count() % 4 != 0 {
            issues.push(ctx.issue(number, "Indentation must be in multiples of 4 spaces."));
        }

        let length = line.trim_end().chars().count();
        if length > self.config.max_line_length {
            issues.push(ctx.issue(
                number,
                format!(
                    "Line exceeds {} characters. ({length} characters)",
                    self.config.max_line_length
                ),
            ));
        }
    }
}

impl Rule for Psr12Compliance {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Checks PSR-12 file layout, indentation and line length"
    }

    fn check(&self, ctx: &FileContext, model: &SourceModel) -> Vec<Issue> {
        let mut issues = Vec::new();
        self.check_file_structure(ctx, model, &mut issues);
        for (idx, line) in ctx.lines.iter().enumerate() {
            self.check_line(ctx, idx + 1, line, &mut issues);
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{check_code, rendered};

    fn check(code: &str) -> Vec<Issue> {
        check_code(&Psr12Compliance::new(), code)
    }

    #[test]
    fn test_compliant_file() {
        let issues = check(
            "<?php\n\ndeclare(strict_types=1);\n\nclass A\n{\n    public function f(): void\n    {\n        return;\n    }\n}\n",
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_file_structure() {
        let issues = check("\n<?php\n\n\ndeclare(strict_types=1);\n");
        assert_eq!(
            rendered(&issues),
            [
                "[test.php:1] File must start with <?php tag.",
                "[test.php:5] declare(strict_types=1) must be on line 2 or 3.",
            ]
        );
    }

    #[test]
    fn test_indentation() {
        let issues = check("<?php\n\tfoo();\n  bar();\n        baz();\n");
        assert_eq!(
            rendered(&issues),
            [
                "[test.php:2] Indentation must use spaces, not tabs.",
                "[test.php:2] Indentation must be in multiples of 4 spaces.",
                "[test.php:3] Indentation must be in multiples of 4 spaces.",
            ]
        );
    }

    #[test]
    fn test_line_length_is_configurable() {
        let long = format!("<?php\n$x = '{}';\n", "a".repeat(20));
        assert!(check(&long).is_empty());

        let rule = Psr12Compliance::new().max_line_length(20);
        let issues = check_code(&rule, &long);
        assert_eq!(
            rendered(&issues),
            ["[test.php:2] Line exceeds 20 characters. (28 characters)"]
        );
    }
}
