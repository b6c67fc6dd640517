//! Rule requiring doc blocks on classes, functions and properties.

use phpguard_core::{FileContext, Issue, Rule, SourceModel};

/// Rule code for missing-docblock.
pub const CODE: &str = "PG020";

/// Rule name for missing-docblock.
pub const NAME: &str = "missing-docblock";

/// Reports declarations without a `/** ... */` block right above them.
#[derive(Debug, Clone, Default)]
pub struct MissingDocblock;

impl MissingDocblock {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for MissingDocblock {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Classes, functions and properties must have a PHPDoc block"
    }

    fn check(&self, ctx: &FileContext, model: &SourceModel) -> Vec<Issue> {
        let classes = model
            .classes
            .iter()
            .filter(|c| c.doc().is_none())
            .map(|c| {
                ctx.issue(
                    c.start_line(),
                    format!("Missing PHPDoc for {} \"{}\".", c.kind().keyword(), c.name()),
                )
            });

        let functions = model.functions.iter().filter(|f| f.doc().is_none()).map(|f| {
            ctx.issue(
                f.line(),
                format!(
                    "Missing PHPDoc for {} \"{}\".",
                    f.kind_label(),
                    f.qualified_name()
                ),
            )
        });

        let properties = model.properties.iter().filter(|p| p.doc().is_none()).map(|p| {
            ctx.issue(
                p.line(),
                format!(
                    "Missing PHPDoc for property \"{}::${}\".",
                    p.class_name(),
                    p.name()
                ),
            )
        });

        classes.chain(functions).chain(properties).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{check_code, rendered};

    #[test]
    fn test_reports_each_kind() {
        let issues = check_code(
            &MissingDocblock::new(),
            r"<?php
namespace App;

class Order
{
    /** @var int */
    private int $id;

    private string $note;

    /**
     * Total in cents.
     */
    #[Pure]
    public function total(): int {}

    public function cancel(): void {}
}

interface Payable {}
",
        );
        assert_eq!(
            rendered(&issues),
            [
                "[test.php:4] Missing PHPDoc for class \"Order\".",
                "[test.php:9] Missing PHPDoc for property \"Order::$note\".",
                "[test.php:17] Missing PHPDoc for method \"Order::cancel\".",
                "[test.php:20] Missing PHPDoc for interface \"Payable\".",
            ]
        );
    }

    #[test]
    fn test_inline_attribute_members_are_checked() {
        let issues = check_code(
            &MissingDocblock::new(),
            "<?php\n/** Cart. */\nclass Cart\n{\n    #[Inject] private Session $session;\n    #[Pure] public function size(): int {}\n}\n",
        );
        assert_eq!(
            rendered(&issues),
            [
                "[test.php:5] Missing PHPDoc for property \"Cart::$session\".",
                "[test.php:6] Missing PHPDoc for method \"Cart::size\".",
            ]
        );
    }

    #[test]
    fn test_regular_comment_is_not_a_docblock() {
        let issues = check_code(
            &MissingDocblock::new(),
            "<?php\n/* plain */\nfunction f() {}\n// line\nfunction g() {}\n",
        );
        assert_eq!(issues.len(), 2);
    }
}
