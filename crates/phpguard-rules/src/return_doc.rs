//! Rule keeping `@return` tags consistent with declared return types.
//!
//! # Detected Patterns
//!
//! - A documented function with a declared return type other than `void` or
//!   `never` but no `@return` tag
//! - An `@return` type that obviously contradicts the declared type
//!
//! A contradiction is only reported when no documented member is compatible
//! with any declared member. Legacy aliases are normalized, `mixed` is
//! compatible with everything, `array`/`iterable`/`list`/`Foo[]` are
//! compatible with each other, and class-like names are compared by short
//! name. Constructors and destructors are exempt.

use phpguard_core::model::{normalize_member, short_name};
use phpguard_core::utils::scan::split_top_level;
use phpguard_core::{FileContext, Issue, Rule, SourceModel};

/// Rule code for return-doc.
pub const CODE: &str = "PG022";

/// Rule name for return-doc.
pub const NAME: &str = "return-doc";

/// Return types that need no `@return` tag.
const VOID_LIKE: &[&str] = &["void", "never"];

/// Names that never denote a class.
const SCALAR_TYPES: &[&str] = &[
    "bool", "int", "float", "string", "array", "callable", "iterable", "void", "mixed", "never",
    "null", "object", "true", "false", "resource", "list",
];

/// Names referring to the enclosing class.
const SELF_TYPES: &[&str] = &["self", "static", "$this"];

/// Checks `@return` presence and consistency.
#[derive(Debug, Clone, Default)]
pub struct ReturnDoc;

impl ReturnDoc {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// One member of a union, reduced for comparison.
#[derive(Debug, PartialEq, Eq)]
struct Member {
    base: String,
    array_like: bool,
}

impl Member {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim().trim_start_matches('?').trim();
        let array_suffix = raw.ends_with("[]");
        let trimmed = raw.trim_end_matches("[]").trim_end_matches("...");
        let normalized = normalize_member(trimmed);
        let base = normalized
            .split(['<', '{', '('])
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        if base.is_empty() || base == "null" {
            return None;
        }
        let array_like = array_suffix || matches!(base.as_str(), "array" | "iterable" | "list");
        Some(Self { base, array_like })
    }

    fn is_class_like(&self) -> bool {
        !SCALAR_TYPES.contains(&self.base.to_ascii_lowercase().as_str())
    }

    fn is_self_like(&self) -> bool {
        SELF_TYPES.contains(&self.base.to_ascii_lowercase().as_str())
    }

    fn compatible_with(&self, other: &Self) -> bool {
        if self.base == "mixed" || other.base == "mixed" {
            return true;
        }
        if self.array_like && other.array_like {
            return true;
        }
        if self.array_like != other.array_like {
            return false;
        }
        if (self.base == "bool" && matches!(other.base.as_str(), "true" | "false"))
            || (other.base == "bool" && matches!(self.base.as_str(), "true" | "false"))
        {
            return true;
        }
        if self.is_class_like() && other.is_class_like() {
            if self.is_self_like() || other.is_self_like() {
                return true;
            }
            return short_name(&self.base).eq_ignore_ascii_case(short_name(&other.base));
        }
        self.base == other.base
    }
}

fn members(raw: &str) -> Vec<Member> {
    split_top_level(raw, '|')
        .into_iter()
        .filter_map(Member::parse)
        .collect()
}

/// Whether a documented type obviously contradicts a declared one.
#[must_use]
pub fn is_obvious_mismatch(documented: &str, declared: &str) -> bool {
    let documented = members(documented);
    let declared = members(declared);
    if documented.is_empty() || declared.is_empty() {
        return false;
    }
    !documented
        .iter()
        .any(|d| declared.iter().any(|a| d.compatible_with(a)))
}

impl Rule for ReturnDoc {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Declared return types need a matching @return tag"
    }

    fn check(&self, ctx: &FileContext, model: &SourceModel) -> Vec<Issue> {
        let mut issues = Vec::new();

        for function in &model.functions {
            if function.is_constructor_or_destructor() {
                continue;
            }
            let Some(doc) = function.doc() else {
                continue;
            };
            let declared = function.return_type().filter(|_| function.has_return_type());

            let Some(tag) = doc.return_tag() else {
                let needs_tag = declared.is_some_and(|ty| {
                    !VOID_LIKE.contains(&ty.trim().to_ascii_lowercase().as_str())
                });
                if needs_tag {
                    issues.push(ctx.issue(
                        doc.start_line(),
                        format!(
                            "Missing @return tag for {} \"{}\".",
                            function.kind_label(),
                            function.qualified_name()
                        ),
                    ));
                }
                continue;
            };

            let Some(declared) = declared else {
                continue;
            };
            if !is_obvious_mismatch(tag.ty.raw(), declared) {
                continue;
            }
            issues.push(ctx.issue(
                doc.start_line(),
                format!(
                    "@return type mismatch in \"{}\": documented \"{}\" vs actual \"{declared}\".",
                    function.qualified_name(),
                    tag.ty.raw()
                ),
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{check_code, rendered};

    fn check(code: &str) -> Vec<Issue> {
        check_code(&ReturnDoc::new(), code)
    }

    #[test]
    fn test_compatibility() {
        assert!(!is_obvious_mismatch("integer", "int"));
        assert!(!is_obvious_mismatch("mixed", "string"));
        assert!(!is_obvious_mismatch("User[]", "array"));
        assert!(!is_obvious_mismatch("array<int, User>", "iterable"));
        assert!(!is_obvious_mismatch("\\App\\Models\\User", "User"));
        assert!(!is_obvious_mismatch("?string", "?string"));
        assert!(!is_obvious_mismatch("string|null", "?string"));
        assert!(!is_obvious_mismatch("$this", "static"));
        assert!(!is_obvious_mismatch("true", "bool"));
        assert!(!is_obvious_mismatch("Collection<User>", "Collection"));

        assert!(is_obvious_mismatch("string", "int"));
        assert!(is_obvious_mismatch("User", "Post"));
        assert!(is_obvious_mismatch("User[]", "User"));
        assert!(is_obvious_mismatch("bool", "array"));
    }

    #[test]
    fn test_missing_tag() {
        let issues = check(
            r"<?php
/**
 * Counts things.
 */
function count_all(): int {}

/**
 * Logs.
 */
function log_it(): void {}

/**
 * Fails.
 */
function fail(): never {}

/**
 * Untyped.
 */
function loose() {}
",
        );
        assert_eq!(
            rendered(&issues),
            ["[test.php:2] Missing @return tag for function \"count_all\"."]
        );
    }

    #[test]
    fn test_mismatch_and_constructor_exemption() {
        let issues = check(
            r"<?php
class Repo
{
    /**
     * @return string
     */
    public function id(): int {}

    /**
     * @return User[]
     */
    public function all(): array {}

    /**
     * Builds.
     */
    public function __construct(int $a) {}
}
",
        );
        assert_eq!(
            rendered(&issues),
            ["[test.php:4] @return type mismatch in \"Repo::id\": documented \"string\" vs actual \"int\"."]
        );
    }
}
