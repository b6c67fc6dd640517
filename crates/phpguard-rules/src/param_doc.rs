//! Rule keeping `@param` tags and declared parameters in sync.
//!
//! Only documented functions are checked; a missing doc block is
//! `missing-docblock`'s concern. Issues point at the doc block's first line.

use phpguard_core::{FileContext, Issue, Rule, SourceModel};

/// Rule code for param-doc.
pub const CODE: &str = "PG021";

/// Rule name for param-doc.
pub const NAME: &str = "param-doc";

/// Reports undocumented parameters and `@param` tags for parameters that
/// do not exist.
#[derive(Debug, Clone, Default)]
pub struct ParamDoc;

impl ParamDoc {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ParamDoc {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Every parameter needs an @param tag, and every @param tag a parameter"
    }

    fn check(&self, ctx: &FileContext, model: &SourceModel) -> Vec<Issue> {
        let mut issues = Vec::new();

        for function in &model.functions {
            let Some(doc) = function.doc() else {
                continue;
            };

            for name in function.parameters().keys() {
                if doc.has_param(name) {
                    continue;
                }
                issues.push(ctx.issue(
                    doc.start_line(),
                    format!(
                        "Missing @param tag for parameter \"${name}\" in {} \"{}\".",
                        function.kind_label(),
                        function.qualified_name()
                    ),
                ));
            }

            for name in doc.params().keys() {
                if function.parameter(name).is_some() {
                    continue;
                }
                issues.push(ctx.issue(
                    doc.start_line(),
                    format!(
                        "Documented parameter \"${name}\" does not exist in {} \"{}\".",
                        function.kind_label(),
                        function.qualified_name()
                    ),
                ));
            }
        }

        issues
    }
}
