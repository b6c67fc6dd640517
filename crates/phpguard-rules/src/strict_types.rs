//! Rule requiring `declare(strict_types=1)`.

use phpguard_core::{FileContext, Issue, Rule, SourceModel};

/// Rule code for strict-types.
pub const CODE: &str = "PG033";

/// Rule name for strict-types.
pub const NAME: &str = "strict-types";

/// Requires the strict types marker in files that declare anything.
///
/// Files with no class, function or property (templates, bootstrap
/// scripts) are left alone.
#[derive(Debug, Clone, Default)]
pub struct StrictTypes;

impl StrictTypes {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for StrictTypes {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Files with declarations must declare strict_types=1"
    }

    fn check(&self, ctx: &FileContext, model: &SourceModel) -> Vec<Issue> {
        if model.strict_types || !model.has_declarations() {
            return Vec::new();
        }
        vec![ctx
            .issue(1, "Missing declare(strict_types=1) declaration.")
            .with_help("add `declare(strict_types=1);` right after the opening tag")]
    }
}
