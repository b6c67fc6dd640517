//! Rule requiring type declarations on properties.

use phpguard_core::{FileContext, Issue, Rule, SourceModel};

/// Rule code for property-type.
pub const CODE: &str = "PG031";

/// Rule name for property-type.
pub const NAME: &str = "property-type";

/// Reports properties declared without a type.
#[derive(Debug, Clone, Default)]
pub struct PropertyType;

impl PropertyType {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for PropertyType {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Properties must declare a type"
    }

    fn check(&self, ctx: &FileContext, model: &SourceModel) -> Vec<Issue> {
        model
            .properties
            .iter()
            .filter(|p| p.declared_type().is_none())
            .map(|p| {
                ctx.issue(
                    p.line(),
                    format!(
                        "Missing type declaration for {} property \"${}\" in class \"{}\".",
                        p.visibility(),
                        p.name(),
                        p.class_name()
                    ),
                )
            })
            .collect()
    }
}
