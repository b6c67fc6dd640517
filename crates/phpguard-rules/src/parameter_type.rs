//! Rule requiring type declarations on parameters.

use phpguard_core::{FileContext, Issue, Rule, SourceModel};

/// Rule code for parameter-type.
pub const CODE: &str = "PG030";

/// Rule name for parameter-type.
pub const NAME: &str = "parameter-type";

/// Reports parameters declared without a type.
#[derive(Debug, Clone, Default)]
pub struct ParameterType;

impl ParameterType {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ParameterType {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Parameters must declare a type"
    }

    fn check(&self, ctx: &FileContext, model: &SourceModel) -> Vec<Issue> {
        model
            .functions
            .iter()
            .flat_map(|function| {
                function
                    .parameters()
                    .iter()
                    .filter(|(_, param)| param.declared_type().is_none())
                    .map(move |(name, _)| {
                        ctx.issue(
                            function.line(),
                            format!(
                                "Missing type declaration for parameter \"${name}\" in {} \"{}\".",
                                function.kind_label(),
                                function.qualified_name()
                            ),
                        )
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{check_code, rendered};

    #[test]
    fn test_untyped_parameters() {
        let issues = check_code(
            &ParameterType::new(),
            "<?php\nfunction f(int $a, $b, ?string $c = null, &$d, ...$rest) {}\n",
        );
        assert_eq!(
            rendered(&issues),
            [
                "[test.php:2] Missing type declaration for parameter \"$b\" in function \"f\".",
                "[test.php:2] Missing type declaration for parameter \"$d\" in function \"f\".",
                "[test.php:2] Missing type declaration for parameter \"$rest\" in function \"f\".",
            ]
        );
    }

    #[test]
    fn test_promoted_constructor_parameters() {
        let issues = check_code(
            &ParameterType::new(),
            "<?php\nclass P\n{\n    public function __construct(\n        private readonly int $x,\n        protected $y,\n    ) {}\n}\n",
        );
        assert_eq!(
            rendered(&issues),
            ["[test.php:4] Missing type declaration for parameter \"$y\" in method \"P::__construct\"."]
        );
    }
}
