//! Functions, methods and their parameters.

use indexmap::IndexMap;

use super::docblock::DocBlock;

/// Member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// `public`
    Public,
    /// `protected`
    Protected,
    /// `private`
    Private,
}

impl Visibility {
    /// Parses an access keyword, case-insensitively.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "public" => Some(Self::Public),
            "protected" => Some(Self::Protected),
            "private" => Some(Self::Private),
            _ => None,
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        })
    }
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParameterEntity {
    pub(crate) name: String,
    pub(crate) nullable: bool,
    pub(crate) declared_type: Option<String>,
    pub(crate) default: Option<String>,
    pub(crate) variadic: bool,
    pub(crate) by_reference: bool,
    pub(crate) promoted: bool,
}

impl ParameterEntity {
    /// Creates an untyped parameter named `name` (without `$`).
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Name without the leading `$`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the type is `?T` or a union containing `null`.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Declared type text, without the `?` marker.
    #[must_use]
    pub fn declared_type(&self) -> Option<&str> {
        self.declared_type.as_deref()
    }

    /// Default value text.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// `...$name`
    #[must_use]
    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    /// `&$name`
    #[must_use]
    pub fn is_by_reference(&self) -> bool {
        self.by_reference
    }

    /// Constructor property promotion.
    #[must_use]
    pub fn is_promoted(&self) -> bool {
        self.promoted
    }
}

/// A function or method declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionEntity {
    pub(crate) line: usize,
    pub(crate) name: String,
    pub(crate) visibility: Option<Visibility>,
    pub(crate) is_static: bool,
    pub(crate) is_abstract: bool,
    pub(crate) class_name: Option<String>,
    pub(crate) return_type: Option<String>,
    pub(crate) has_return_type: bool,
    pub(crate) parameters: IndexMap<String, ParameterEntity>,
    pub(crate) doc: Option<DocBlock>,
}

impl FunctionEntity {
    /// Creates a free function with no parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            line,
            name: name.into(),
            visibility: None,
            is_static: false,
            is_abstract: false,
            class_name: None,
            return_type: None,
            has_return_type: false,
            parameters: IndexMap::new(),
            doc: None,
        }
    }

    /// Adds a parameter; a later duplicate name replaces the earlier one in place.
    pub(crate) fn add_parameter(&mut self, param: ParameterEntity) {
        self.parameters.insert(param.name.clone(), param);
    }

    /// 1-based line of the declaration.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Visibility; `None` for free functions.
    #[must_use]
    pub fn visibility(&self) -> Option<Visibility> {
        self.visibility
    }

    /// `static` modifier.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// `abstract` modifier.
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Owning class, for methods.
    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// Whether this is a method.
    #[must_use]
    pub fn is_method(&self) -> bool {
        self.class_name.is_some()
    }

    /// Declared return type text.
    #[must_use]
    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    /// Whether a return type was declared after `):`.
    #[must_use]
    pub fn has_return_type(&self) -> bool {
        self.has_return_type
    }

    /// Parameters in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &IndexMap<String, ParameterEntity> {
        &self.parameters
    }

    /// Looks up a parameter by name (without `$`).
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ParameterEntity> {
        self.parameters.get(name)
    }

    /// Attached documentation block.
    #[must_use]
    pub fn doc(&self) -> Option<&DocBlock> {
        self.doc.as_ref()
    }

    /// `Class::name` for methods, `name` otherwise.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.class_name {
            Some(class) => format!("{class}::{}", self.name),
            None => self.name.clone(),
        }
    }

    /// `"method"` or `"function"`, as used in messages.
    #[must_use]
    pub fn kind_label(&self) -> &'static str {
        if self.is_method() {
            "method"
        } else {
            "function"
        }
    }

    /// `__construct` or `__destruct`, case-insensitively.
    #[must_use]
    pub fn is_constructor_or_destructor(&self) -> bool {
        self.name.eq_ignore_ascii_case("__construct") || self.name.eq_ignore_ascii_case("__destruct")
    }

    /// Names starting with `__`.
    #[must_use]
    pub fn is_magic(&self) -> bool {
        self.name.starts_with("__")
    }
}
