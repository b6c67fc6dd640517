//! Rule requiring a namespace in files that declare classes.

use phpguard_core::{FileContext, Issue, Rule, SourceModel};

/// Rule code for namespace-declaration.
pub const CODE: &str = "PG013";

/// Rule name for namespace-declaration.
pub const NAME: &str = "namespace-declaration";

/// Requires `namespace` when a class, interface, trait or enum is declared.
#[derive(Debug, Clone, Default)]
pub struct NamespaceDeclaration;

impl NamespaceDeclaration {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NamespaceDeclaration {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Files declaring classes must declare a namespace"
    }

    fn check(&self, ctx: &FileContext, model: &SourceModel) -> Vec<Issue> {
        if model.classes.is_empty() || model.namespace.is_some() {
            return Vec::new();
        }
        vec![ctx.issue(1, "Missing namespace declaration.")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{check_code, rendered};

    #[test]
    fn test_namespace_rules() {
        let rule = NamespaceDeclaration::new();
        assert_eq!(
            rendered(&check_code(&rule, "<?php\nclass A {}\n")),
            ["[test.php:1] Missing namespace declaration."]
        );
        assert!(check_code(&rule, "<?php\nnamespace App;\nclass A {}\n").is_empty());
        assert!(check_code(&rule, "<?php\nfunction helper() {}\n").is_empty());
    }
}
