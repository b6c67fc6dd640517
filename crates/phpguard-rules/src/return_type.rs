//! Rule requiring return type declarations.

use phpguard_core::{FileContext, Issue, Rule, SourceModel};

/// Rule code for return-type.
pub const CODE: &str = "PG032";

/// Rule name for return-type.
pub const NAME: &str = "return-type";

/// Reports functions and methods without a declared return type.
///
/// Constructors and destructors are exempt.
#[derive(Debug, Clone, Default)]
pub struct ReturnType;

impl ReturnType {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ReturnType {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Functions and methods must declare a return type"
    }

    fn check(&self, ctx: &FileContext, model: &SourceModel) -> Vec<Issue> {
        model
            .functions
            .iter()
            .filter(|f| !f.is_constructor_or_destructor() && !f.has_return_type())
            .map(|f| {
                ctx.issue(
                    f.line(),
                    format!(
                        "Missing return type declaration for {} \"{}\".",
                        f.kind_label(),
                        f.qualified_name()
                    ),
                )
            })
            .collect()
    }
}
