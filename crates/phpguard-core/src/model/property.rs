//! Class properties.

use super::docblock::DocBlock;
use super::function::Visibility;

/// A property declared in a class body.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEntity {
    pub(crate) line: usize,
    pub(crate) name: String,
    pub(crate) visibility: Visibility,
    pub(crate) is_static: bool,
    pub(crate) readonly: bool,
    pub(crate) class_name: String,
    pub(crate) declared_type: Option<String>,
    pub(crate) default: Option<String>,
    pub(crate) doc: Option<DocBlock>,
}

impl PropertyEntity {
    /// Creates a public, untyped property.
    #[must_use]
    pub fn new(name: impl Into<String>, class_name: impl Into<String>, line: usize) -> Self {
        Self {
            line,
            name: name.into(),
            visibility: Visibility::Public,
            is_static: false,
            readonly: false,
            class_name: class_name.into(),
            declared_type: None,
            default: None,
            doc: None,
        }
    }

    /// 1-based declaration line.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Name without `$`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Visibility, `public` when no keyword was written.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// `static` modifier.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// `readonly` modifier, own or inherited from a readonly class.
    #[must_use]
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// Owning class name.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Declared type text.
    #[must_use]
    pub fn declared_type(&self) -> Option<&str> {
        self.declared_type.as_deref()
    }

    /// Default value text.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Attached documentation block.
    #[must_use]
    pub fn doc(&self) -> Option<&DocBlock> {
        self.doc.as_ref()
    }
}
