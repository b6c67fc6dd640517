//! Lightweight entity model of one PHP source file.
//!
//! Everything here is plain data built by [`crate::parser::parse`] in a
//! single pass. Rules only read it.

mod class;
mod docblock;
mod function;
mod import;
mod property;
mod type_expr;

pub use class::{ClassEntity, ClassKind, ClassModifier};
pub use docblock::{short_name, DocBlock, LookupError, ParamTag, ReturnTag, ThrowsTag, VarTag};
pub use function::{FunctionEntity, ParameterEntity, Visibility};
pub use import::{Import, ImportKind};
pub use property::PropertyEntity;
pub use type_expr::{is_builtin, normalize_member, TypeExpr};

/// The structural model of one file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceModel {
    /// Last declared namespace.
    pub namespace: Option<String>,
    /// Whether `declare(strict_types=1)` appears anywhere.
    pub strict_types: bool,
    /// File-level imports in source order.
    pub imports: Vec<Import>,
    /// Class-like declarations in source order.
    pub classes: Vec<ClassEntity>,
    /// Properties of all classes in source order.
    pub properties: Vec<PropertyEntity>,
    /// Functions and methods in source order.
    pub functions: Vec<FunctionEntity>,
    /// Brace depth after the last line; zero for balanced input.
    pub final_depth: i64,
}

impl SourceModel {
    /// Whether the file declares any class, function or property.
    #[must_use]
    pub fn has_declarations(&self) -> bool {
        !self.classes.is_empty() || !self.functions.is_empty() || !self.properties.is_empty()
    }

    /// Looks up a class by name.
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ClassEntity> {
        self.classes.iter().find(|c| c.name() == name)
    }

    /// Methods owned by `class`.
    pub fn methods_of<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a FunctionEntity> {
        self.functions
            .iter()
            .filter(move |f| f.class_name() == Some(class))
    }

    /// Functions declared outside any class.
    pub fn free_functions(&self) -> impl Iterator<Item = &FunctionEntity> {
        self.functions.iter().filter(|f| !f.is_method())
    }
}
