//! Rule requiring `camelCase` or `snake_case` variable names.
//!
//! Every `$name` in code is checked; comments and string literals are not
//! scanned. Superglobals and `$this` are exempt. A name is reported once per
//! line.

use std::collections::HashSet;
use std::sync::LazyLock;

use phpguard_core::utils::naming::to_camel_case;
use phpguard_core::utils::{is_camel_case, is_snake_case, static_regex, Scrubber};
use phpguard_core::{FileContext, Issue, Rule, SourceModel};
use regex::Regex;

/// Rule code for variable-naming.
pub const CODE: &str = "PG003";

/// Rule name for variable-naming.
pub const NAME: &str = "variable-naming";

/// Variables that are never reported.
const SUPERGLOBALS: &[&str] = &[
    "GLOBALS", "_SERVER", "_GET", "_POST", "_FILES", "_COOKIE", "_SESSION", "_REQUEST", "_ENV",
];

static VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| static_regex(r"\$([A-Za-z_][A-Za-z0-9_]*)"));

/// Checks variable names.
#[derive(Debug, Clone, Default)]
pub struct VariableNaming;

impl VariableNaming {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for VariableNaming {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Variables must be in camelCase or snake_case"
    }

    fn check(&self, ctx: &FileContext, _model: &SourceModel) -> Vec<Issue> {
        let mut issues = Vec::new();
        let mut scrubber = Scrubber::new();

        for (idx, line) in ctx.lines.iter().enumerate() {
            let code = scrubber.scrub(line);
            let mut seen = HashSet::new();

            for caps in VARIABLE.captures_iter(&code) {
                let Some(name) = caps.get(1).map(|m| m.as_str()) else {
                    continue;
                };
                if name == "this" || SUPERGLOBALS.contains(&name) {
                    continue;
                }
                if is_camel_case(name) || is_snake_case(name) || !seen.insert(name) {
                    continue;
                }
                issues.push(
                    ctx.issue(
                        idx + 1,
                        format!("Variable \"${name}\" should be in camelCase."),
                    )
                    .with_help(format!("rename to `${}`", to_camel_case(name))),
                );
            }
        }

        issues
    }
}
