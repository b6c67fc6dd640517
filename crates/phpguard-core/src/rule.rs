//! The rule trait.

use crate::context::FileContext;
use crate::model::SourceModel;
use crate::types::Issue;

/// A per-file analysis rule over the parsed [`SourceModel`].
///
/// Rules are stateless between files: all thresholds are fixed when the
/// rule is constructed, and `check` only reads its inputs. Per-run state
/// (issues, analyzed files, read errors) lives in a
/// [`Detector`](crate::Detector).
///
/// # Example
///
/// ```
/// use phpguard_core::{FileContext, Issue, Rule, SourceModel};
///
/// pub struct NoGlobalFunctions;
///
/// impl Rule for NoGlobalFunctions {
///     fn name(&self) -> &'static str { "no-global-functions" }
///     fn code(&self) -> &'static str { "X001" }
///
///     fn check(&self, ctx: &FileContext, model: &SourceModel) -> Vec<Issue> {
///         model
///             .free_functions()
///             .map(|f| ctx.issue(f.line(), format!("Global function \"{}\".", f.name())))
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "naming-convention").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "PG001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Checks a single file and returns the issues found, in line order.
    fn check(&self, ctx: &FileContext, model: &SourceModel) -> Vec<Issue>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
