//! Rule to limit the length of classes and methods.
//!
//! A class spans from its declaration to its closing brace. A method is
//! measured by an independent brace scan from its declaration line, counting
//! only non-blank lines. Unterminated classes are not measured.
//!
//! # Configuration
//!
//! - `max_class_length`: Maximum lines in a class (default: 500)
//! - `max_method_length`: Maximum non-blank lines in a method (default: 50)

use phpguard_core::utils::scan_body;
use phpguard_core::{FileContext, Issue, Rule, RuleConfig, SourceModel};

/// Rule code for class-length.
pub const CODE: &str = "PG010";

/// Rule name for class-length.
pub const NAME: &str = "class-length";

/// Configuration for class and method length limits.
#[derive(Debug, Clone)]
pub struct ClassLengthConfig {
    /// Maximum lines in a class.
    pub max_class_length: usize,
    /// Maximum non-blank lines in a method.
    pub max_method_length: usize,
}

impl Default for ClassLengthConfig {
    fn default() -> Self {
        Self {
            max_class_length: 500,
            max_method_length: 50,
        }
    }
}

/// Limits class and method length.
#[derive(Debug, Clone, Default)]
pub struct ClassLength {
    config: ClassLengthConfig,
}

impl ClassLength {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a rule from its `[rules.class-length]` table.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        Self::new().with_config(config)
    }

    /// Overrides the limits present in `config`, keeping the others.
    #[must_use]
    pub fn with_config(self, config: &RuleConfig) -> Self {
        let (class, method) = (self.config.max_class_length, self.config.max_method_length);
        self.max_class_length(config.get_usize("max_class_length", class))
            .max_method_length(config.get_usize("max_method_length", method))
    }

    /// Sets the maximum class length.
    #[must_use]
    pub fn max_class_length(mut self, max: usize) -> Self {
        self.config.max_class_length = max;
        self
    }

    /// Sets the maximum method length.
    #[must_use]
    pub fn max_method_length(mut self, max: usize) -> Self {
        self.config.max_method_length = max;
        self
    }

    /// Returns the configured limits.
    #[must_use]
    pub fn config(&self) -> &ClassLengthConfig {
        &self.config
    }
}

/// Non-blank lines from a method's declaration to its closing brace.
fn method_length(lines: &[String], declaration: usize) -> usize {
    let Some(start) = declaration.checked_sub(1) else {
        return 0;
    };
    let body = scan_body(lines, start);
    lines
        .get(body.start..=body.end)
        .unwrap_or_default()
        .iter()
        .filter(|line| !line.trim().is_empty())
        .count()
}

impl Rule for ClassLength {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Limits the length of classes and methods"
    }

    fn check(&self, ctx: &FileContext, model: &SourceModel) -> Vec<Issue> {
        let mut issues = Vec::new();

        for class in &model.classes {
            let Some(length) = class.line_count() else {
                continue;
            };
            if length <= self.config.max_class_length {
                continue;
            }
            issues.push(ctx.issue(
                class.start_line(),
                format!(
                    "Class \"{}\" is too long. ({length} lines, max: {})",
                    class.name(),
                    self.config.max_class_length
                ),
            ));
        }

        for method in model.functions.iter().filter(|f| f.is_method()) {
            let length = method_length(ctx.lines, method.line());
            if length <= self.config.max_method_length {
                continue;
            }
            issues.push(ctx.issue(
                method.line(),
                format!(
                    "Method \"{}\" is too long. ({length} lines, max: {})",
                    method.qualified_name(),
                    self.config.max_method_length
                ),
            ));
        }

        issues
    }
}
