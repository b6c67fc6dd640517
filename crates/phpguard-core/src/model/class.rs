//! Class-like declarations.

use super::docblock::DocBlock;

/// The keyword that introduced a class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    /// `class`
    Class,
    /// `interface`
    Interface,
    /// `trait`
    Trait,
    /// `enum`
    Enum,
}

impl ClassKind {
    /// The PHP keyword.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Trait => "trait",
            Self::Enum => "enum",
        }
    }

    /// Parses a keyword, case-insensitively.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "class" => Some(Self::Class),
            "interface" => Some(Self::Interface),
            "trait" => Some(Self::Trait),
            "enum" => Some(Self::Enum),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClassKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// `abstract` or `final` on a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassModifier {
    /// `abstract class`
    Abstract,
    /// `final class`
    Final,
}

/// A class, interface, trait or enum.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassEntity {
    pub(crate) name: String,
    pub(crate) kind: ClassKind,
    pub(crate) start_line: usize,
    pub(crate) end_line: Option<usize>,
    pub(crate) modifier: Option<ClassModifier>,
    pub(crate) readonly: bool,
    pub(crate) namespace: Option<String>,
    pub(crate) parent: Option<String>,
    pub(crate) interfaces: Vec<String>,
    pub(crate) traits: Vec<String>,
    pub(crate) doc: Option<DocBlock>,
}

impl ClassEntity {
    /// Creates an unterminated class starting at `start_line`.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ClassKind, start_line: usize) -> Self {
        Self {
            name: name.into(),
            kind,
            start_line,
            end_line: None,
            modifier: None,
            readonly: false,
            namespace: None,
            parent: None,
            interfaces: Vec::new(),
            traits: Vec::new(),
            doc: None,
        }
    }

    /// Records the closing line. Lines before the start are clamped to it.
    pub(crate) fn close(&mut self, end_line: usize) {
        self.end_line = Some(end_line.max(self.start_line));
    }

    pub(crate) fn add_interface(&mut self, name: &str) {
        if !self.interfaces.iter().any(|i| i == name) {
            self.interfaces.push(name.to_string());
        }
    }

    pub(crate) fn add_trait(&mut self, name: &str) {
        if !self.traits.iter().any(|t| t == name) {
            self.traits.push(name.to_string());
        }
    }

    /// Declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declaration keyword.
    #[must_use]
    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    /// 1-based line of the declaration.
    #[must_use]
    pub fn start_line(&self) -> usize {
        self.start_line
    }

    /// 1-based line of the closing brace, `None` when never closed.
    #[must_use]
    pub fn end_line(&self) -> Option<usize> {
        self.end_line
    }

    /// `abstract`/`final`, when present.
    #[must_use]
    pub fn modifier(&self) -> Option<ClassModifier> {
        self.modifier
    }

    /// Whether the class was declared `readonly`.
    #[must_use]
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// Enclosing namespace.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Name after `extends` (the first one for interfaces).
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Names after `implements` (or extra `extends` names on interfaces).
    #[must_use]
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    /// Traits pulled in by `use` inside the body.
    #[must_use]
    pub fn traits(&self) -> &[String] {
        &self.traits
    }

    /// Attached documentation block.
    #[must_use]
    pub fn doc(&self) -> Option<&DocBlock> {
        self.doc.as_ref()
    }

    /// Namespace-qualified name.
    #[must_use]
    pub fn fqn(&self) -> String {
        match &self.namespace {
            Some(ns) if !ns.is_empty() => format!("{ns}\\{}", self.name),
            _ => self.name.clone(),
        }
    }

    /// `end - start + 1`, or `None` for an unterminated class.
    #[must_use]
    pub fn line_count(&self) -> Option<usize> {
        self.end_line.map(|end| end - self.start_line + 1)
    }
}
