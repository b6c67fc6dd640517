//! Rule reporting `use` imports that are never referenced.
//!
//! An import counts as used when its effective name (alias, or last
//! segment) appears as a whole word in code after the last import line.
//! Comments do not count; string literals do, so `'User'`-style references
//! in service maps keep their import alive.

use phpguard_core::utils::Scrubber;
use phpguard_core::{FileContext, Issue, Rule, SourceModel};
use regex::Regex;

/// Rule code for unused-imports.
pub const CODE: &str = "PG012";

/// Rule name for unused-imports.
pub const NAME: &str = "unused-imports";

/// Reports unused imports.
#[derive(Debug, Clone, Default)]
pub struct UnusedImports;

impl UnusedImports {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for UnusedImports {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Imports must be referenced after the import block"
    }

    fn check(&self, ctx: &FileContext, model: &SourceModel) -> Vec<Issue> {
        let Some(block_end) = model.imports.iter().map(|i| i.line()).max() else {
            return Vec::new();
        };

        let mut scrubber = Scrubber::keeping_strings();
        let code: Vec<String> = ctx
            .lines
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                let text = scrubber.scrub(line);
                if idx < block_end {
                    String::new()
                } else {
                    text
                }
            })
            .collect();

        let mut issues = Vec::new();
        for import in &model.imports {
            let Ok(word) = Regex::new(&format!(r"\b{}\b", regex::escape(import.effective_name())))
            else {
                continue;
            };
            if code.iter().any(|line| word.is_match(line)) {
                continue;
            }
            issues.push(
                ctx.issue(
                    import.line(),
                    format!("Unused import \"{}\".", import.full_name()),
                )
                .with_help("remove the `use` statement"),
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
        check_code(&UnusedImports::new(), code)
    }

    #[test]
    fn test_reports_unused() {
        let issues = check(
            r"<?php
namespace App;

use App\Models\User;
use App\Models\Post;
use Psr\Log\LoggerInterface as Logger;
use function App\helpers\format;

// Post is mentioned only here
class Service
{
    public function __construct(private Logger $logger) {}

    public function find(): User
    {
        return format(User::find(1));
    }
}
",
        );
        assert_eq!(
            rendered(&issues),
            ["[test.php:5] Unused import \"App\\Models\\Post\"."]
        );
    }

    #[test]
    fn test_whole_word_only() {
        let issues = check("<?php\nuse App\\User;\n\n$users = new UserCollection();\n");
        assert_eq!(
            rendered(&issues),
            ["[test.php:2] Unused import \"App\\User\"."]
        );
    }

    #[test]
    fn test_trait_use_counts() {
        let issues = check(
            "<?php\nuse App\\Concerns\\HasName;\n\nclass A\n{\n    use HasName;\n}\n",
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_no_imports() {
        assert!(check("<?php\nclass A {}\n").is_empty());
    }
}
