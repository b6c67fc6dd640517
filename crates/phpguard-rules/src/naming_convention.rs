//! Rule enforcing naming conventions for declarations.
//!
//! # Detected Patterns
//!
//! - Classes, interfaces, traits and enums not in `PascalCase`
//! - Functions and methods not in `camelCase` (magic `__` methods are exempt)
//! - Properties not in `camelCase`

use phpguard_core::utils::naming::{to_camel_case, to_pascal_case};
use phpguard_core::utils::{is_camel_case, is_pascal_case};
use phpguard_core::{FileContext, Issue, Rule, SourceModel};

/// Rule code for naming-convention.
pub const CODE: &str = "PG001";

/// Rule name for naming-convention.
pub const NAME: &str = "naming-convention";

/// Checks class, function, method and property names.
#[derive(Debug, Clone, Default)]
pub struct NamingConvention;

impl NamingConvention {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NamingConvention {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Classes in PascalCase; functions, methods and properties in camelCase"
    }

    fn check(&self, ctx: &FileContext, model: &SourceModel) -> Vec<Issue> {
        let mut issues = Vec::new();

        for class in &model.classes {
            if is_pascal_case(class.name()) {
                continue;
            }
            issues.push(
                ctx.issue(
                    class.start_line(),
                    format!("Class \"{}\" should be in PascalCase.", class.name()),
                )
                .with_help(format!("rename to `{}`", to_pascal_case(class.name()))),
            );
        }

        for function in &model.functions {
            if function.is_magic() || is_camel_case(function.name()) {
                continue;
            }
            let kind = if function.is_method() { "Method" } else { "Function" };
            issues.push(
                ctx.issue(
                    function.line(),
                    format!(
                        "{kind} \"{}\" should be in camelCase.",
                        function.qualified_name()
                    ),
                )
                .with_help(format!("rename to `{}`", to_camel_case(function.name()))),
            );
        }

        for property in &model.properties {
            if is_camel_case(property.name()) {
                continue;
            }
            issues.push(
                ctx.issue(
                    property.line(),
                    format!(
                        "Property \"{}::${}\" should be in camelCase.",
                        property.class_name(),
                        property.name()
                    ),
                )
                .with_help(format!("rename to `${}`", to_camel_case(property.name()))),
            );
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{check_code, rendered};

    fn check(code: &str) -> Vec<Issue> {
        check_code(&NamingConvention::new(), code)
    }

    #[test]
    fn test_lower_camel_class() {
        let issues = check("<?php\nclass fooBar {}\n");
        assert_eq!(
            rendered(&issues),
            ["[test.php:2] Class \"fooBar\" should be in PascalCase."]
        );
        assert_eq!(issues[0].help(), Some("rename to `FooBar`"));
    }

    #[test]
    fn test_functions_methods_properties() {
        let issues = check(
            r"<?php
class UserRepository
{
    private int $user_count = 0;
    protected $cache;

    public function __construct() {}

    public function find_all(): array {}

    public function findOne(): ?User {}
}

function do_something() {}
",
        );
        assert_eq!(
            rendered(&issues),
            [
                "[test.php:4] Property \"UserRepository::$user_count\" should be in camelCase.",
                "[test.php:9] Method \"UserRepository::find_all\" should be in camelCase.",
                "[test.php:14] Function \"do_something\" should be in camelCase.",
            ]
        );
    }

    #[test]
    fn test_clean_file() {
        let issues = check("<?php\ninterface Shape {}\nenum Suit {}\nfunction area() {}\n");
        assert!(issues.is_empty());
    }
}
