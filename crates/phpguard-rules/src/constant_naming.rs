//! Rule requiring `CONSTANT_CASE` constant names.
//!
//! Both class/namespace constants (`const NAME = ...`) and runtime
//! `define('NAME', ...)` calls are checked. Namespaced defines such as
//! `define('App\LIMIT', 1)` are skipped.

use std::sync::LazyLock;

use phpguard_core::utils::naming::to_constant_case;
use phpguard_core::utils::{is_constant_case, static_regex, Scrubber};
use phpguard_core::{FileContext, Issue, Rule, SourceModel};
use regex::Regex;

/// Rule code for constant-naming.
pub const CODE: &str = "PG002";

/// Rule name for constant-naming.
pub const NAME: &str = "constant-naming";

/// `const NAME =`, with an optional type (`const string NAME =`).
static CONST_DECL: LazyLock<Regex> = LazyLock::new(|| {
    static_regex(r"(?i)\bconst\s+(?:[A-Za-z_\\?|]+\s+)?([A-Za-z_][A-Za-z0-9_]*)\s*=")
});

static DEFINE_CALL: LazyLock<Regex> =
    LazyLock::new(|| static_regex(r#"(?i)\bdefine\s*\(\s*['"]([^'"]+)['"]"#));

/// A `define(` call left in code with literal contents removed.
static DEFINE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| static_regex(r#"(?i)\bdefine\s*\(\s*['"]"#));

/// Checks constant names.
#[derive(Debug, Clone, Default)]
pub struct ConstantNaming;

impl ConstantNaming {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ConstantNaming {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Constants must be in CONSTANT_CASE"
    }

    fn check(&self, ctx: &FileContext, _model: &SourceModel) -> Vec<Issue> {
        let mut issues = Vec::new();
        let mut code_scrubber = Scrubber::new();
        let mut text_scrubber = Scrubber::keeping_strings();

        for (idx, line) in ctx.lines.iter().enumerate() {
            let code = code_scrubber.scrub(line);
            let text = text_scrubber.scrub(line);
            let mut names: Vec<&str> = CONST_DECL
                .captures_iter(&code)
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str())
                .collect();
            let defines = DEFINE_OPEN.find_iter(&code).count();
            names.extend(
                DEFINE_CALL
                    .captures_iter(&text)
                    .filter_map(|c| c.get(1))
                    .map(|m| m.as_str())
                    .take(defines)
                    .filter(|name| !name.contains('\\')),
            );

            for name in names {
                if is_constant_case(name) {
                    continue;
                }
                issues.push(
                    ctx.issue(
                        idx + 1,
                        format!("Constant \"{name}\" should be in CONSTANT_CASE."),
                    )
                    .with_help(format!("rename to `{}`", to_constant_case(name))),
                );
            }
        }

        issues
    }
}
