//! Rule requiring `@throws` tags for exceptions thrown in a body.
//!
//! The body of each documented function is located by an independent brace
//! scan; every `throw new T` found there (comments and strings excluded)
//! must be covered by an `@throws` tag with the same short name. Each
//! missing exception is reported once, at the doc block's first line.

use std::sync::LazyLock;

use phpguard_core::model::short_name;
use phpguard_core::utils::{scan_body, static_regex};
use phpguard_core::{FileContext, Issue, Rule, SourceModel};
use regex::Regex;

/// Rule code for throws-doc.
pub const CODE: &str = "PG023";

/// Rule name for throws-doc.
pub const NAME: &str = "throws-doc";

static THROW_NEW: LazyLock<Regex> =
    LazyLock::new(|| static_regex(r"(?i)\bthrow\s+new\s+(\\?[A-Za-z_][A-Za-z0-9_\\]*)"));

/// Checks `@throws` coverage.
#[derive(Debug, Clone, Default)]
pub struct ThrowsDoc;

impl ThrowsDoc {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Short names of the exceptions thrown in the body of the function
/// declared on the 1-based line `declaration`, in order of appearance.
#[must_use]
pub fn thrown_exceptions(lines: &[String], declaration: usize) -> Vec<String> {
    let Some(start) = declaration.checked_sub(1) else {
        return Vec::new();
    };
    let mut found: Vec<String> = Vec::new();
    for (_, code) in &scan_body(lines, start).code {
        for caps in THROW_NEW.captures_iter(code) {
            let name = short_name(&caps[1]).to_string();
            if !found.contains(&name) {
                found.push(name);
            }
        }
    }
    found
}

impl Rule for ThrowsDoc {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Thrown exceptions need an @throws tag"
    }

    fn check(&self, ctx: &FileContext, model: &SourceModel) -> Vec<Issue> {
        let mut issues = Vec::new();

        for function in &model.functions {
            let Some(doc) = function.doc() else {
                continue;
            };
            for exception in thrown_exceptions(ctx.lines, function.line()) {
                if doc.has_throws(&exception) {
                    continue;
                }
                issues.push(ctx.issue(
                    doc.start_line(),
                    format!(
                        "Missing @throws tag for \"{exception}\" in {} \"{}\".",
                        function.kind_label(),
                        function.qualified_name()
                    ),
                ));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{check_code, rendered};
    use phpguard_core::source::split_lines;

    #[test]
    fn test_collects_short_names_once() {
        let lines = split_lines(
            r#"<?php
function load(string $path): string
{
    if (!is_file($path)) {
        throw new \App\Exceptions\NotFound($path);
    }
    // throw new Commented();
    $msg = "throw new InString()";
    $f = function () {
        throw new NotFound('again');
    };
    throw new RuntimeException('x');
}
function other() { throw new Unrelated(); }
"#,
        );
        assert_eq!(thrown_exceptions(&lines, 2), ["NotFound", "RuntimeException"]);
    }

    #[test]
    fn test_reports_undocumented() {
        let issues = check_code(
            &ThrowsDoc::new(),
            r"<?php
class Store
{
    /**
     * Saves.
     *
     * @throws \App\Errors\WriteFailed when the disk is full
     */
    public function save(): void
    {
        throw new WriteFailed();
        throw new \InvalidArgumentException();
    }

    public function undocumented(): void
    {
        throw new Anything();
    }
}
",
        );
        assert_eq!(
            rendered(&issues),
            ["[test.php:4] Missing @throws tag for \"InvalidArgumentException\" in method \"Store::save\"."]
        );
    }
}
