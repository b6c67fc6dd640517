//! Structured documentation blocks and their tags.

use indexmap::IndexMap;
use thiserror::Error;

use super::type_expr::TypeExpr;

/// Lookup miss on a [`DocBlock`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No `@param` for the given name.
    #[error("no @param tag for parameter \"{0}\"")]
    ParamTagNotFound(String),

    /// No `@throws` for the given exception.
    #[error("no @throws tag for \"{0}\"")]
    ThrowsTagNotFound(String),
}

/// `@param <type> $<name> [description]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamTag {
    /// Parameter name without `$`.
    pub name: String,
    /// Documented type.
    pub ty: TypeExpr,
    /// Free text after the name.
    pub description: Option<String>,
    /// Written as `...$name`.
    pub variadic: bool,
    /// Written as `&$name`.
    pub by_reference: bool,
}

/// `@return <type> [description]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnTag {
    /// Documented type.
    pub ty: TypeExpr,
    /// Free text after the type.
    pub description: Option<String>,
}

/// `@throws <exception> [description]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrowsTag {
    /// Exception type, leading `\` removed.
    pub ty: TypeExpr,
    /// Free text after the type.
    pub description: Option<String>,
}

impl ThrowsTag {
    /// Exception name as written, without leading `\`.
    #[must_use]
    pub fn exception(&self) -> &str {
        self.ty.raw()
    }

    /// Last namespace segment of the exception.
    #[must_use]
    pub fn short_name(&self) -> &str {
        short_name(self.ty.raw())
    }
}

/// `@var` in any of its accepted word orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarTag {
    /// Documented type.
    pub ty: TypeExpr,
    /// Variable name without `$`, when given.
    pub name: Option<String>,
    /// Remaining free text.
    pub description: Option<String>,
}

/// A parsed `/** ... */` comment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocBlock {
    pub(crate) start_line: usize,
    pub(crate) end_line: usize,
    pub(crate) raw: String,
    pub(crate) summary: String,
    pub(crate) description: String,
    pub(crate) params: IndexMap<String, ParamTag>,
    pub(crate) return_tag: Option<ReturnTag>,
    pub(crate) throws: IndexMap<String, ThrowsTag>,
    pub(crate) var: Option<VarTag>,
    pub(crate) deprecated: bool,
    pub(crate) deprecated_message: Option<String>,
    pub(crate) tags: IndexMap<String, Vec<String>>,
}

impl DocBlock {
    /// 1-based line holding `/**`.
    #[must_use]
    pub fn start_line(&self) -> usize {
        self.start_line
    }

    /// 1-based line holding `*/`.
    #[must_use]
    pub fn end_line(&self) -> usize {
        self.end_line
    }

    /// Comment text exactly as found in the source.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// First paragraph before any tag.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Remaining paragraphs before any tag.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// All `@param` tags keyed by parameter name.
    #[must_use]
    pub fn params(&self) -> &IndexMap<String, ParamTag> {
        &self.params
    }

    /// Whether `@param` documents `name`.
    #[must_use]
    pub fn has_param(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// The `@param` tag for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::ParamTagNotFound`] when `name` is undocumented.
    pub fn param(&self, name: &str) -> Result<&ParamTag, LookupError> {
        self.params
            .get(name)
            .ok_or_else(|| LookupError::ParamTagNotFound(name.to_string()))
    }

    /// The `@return` tag.
    #[must_use]
    pub fn return_tag(&self) -> Option<&ReturnTag> {
        self.return_tag.as_ref()
    }

    /// All `@throws` tags keyed by exception short name.
    #[must_use]
    pub fn throws_tags(&self) -> &IndexMap<String, ThrowsTag> {
        &self.throws
    }

    /// Whether `@throws` documents `exception` (compared by short name).
    #[must_use]
    pub fn has_throws(&self, exception: &str) -> bool {
        self.throws.contains_key(short_name(exception))
    }

    /// The `@throws` tag for `exception` (compared by short name).
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::ThrowsTagNotFound`] when it is undocumented.
    pub fn throws(&self, exception: &str) -> Result<&ThrowsTag, LookupError> {
        self.throws
            .get(short_name(exception))
            .ok_or_else(|| LookupError::ThrowsTagNotFound(exception.to_string()))
    }

    /// The `@var` tag.
    #[must_use]
    pub fn var(&self) -> Option<&VarTag> {
        self.var.as_ref()
    }

    /// Whether `@deprecated` is present.
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    /// Text after `@deprecated`, if non-empty.
    #[must_use]
    pub fn deprecated_message(&self) -> Option<&str> {
        self.deprecated_message.as_deref()
    }

    /// Bodies of every other tag, keyed by tag name without `@`.
    #[must_use]
    pub fn tags(&self) -> &IndexMap<String, Vec<String>> {
        &self.tags
    }

    /// Bodies of tag `name` (without `@`).
    #[must_use]
    pub fn tag(&self, name: &str) -> &[String] {
        self.tags.get(name).map_or(&[], Vec::as_slice)
    }
}

/// Last `\`-separated segment of a class name, leading `\` ignored.
#[must_use]
pub fn short_name(name: &str) -> &str {
    let name = name.trim_start_matches('\\');
    name.rsplit('\\').next().unwrap_or(name)
}
