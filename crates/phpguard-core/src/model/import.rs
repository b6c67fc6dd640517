//! `use` imports at file level.

/// What an import brings into scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImportKind {
    /// `use Foo\Bar;`
    #[default]
    Class,
    /// `use function Foo\bar;`
    Function,
    /// `use const Foo\BAR;`
    Const,
}

/// A single imported name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    line: usize,
    full_name: String,
    alias: Option<String>,
    kind: ImportKind,
}

impl Import {
    /// Creates an import. A leading `\` on `full_name` is stripped.
    #[must_use]
    pub fn new(line: usize, full_name: &str, alias: Option<String>, kind: ImportKind) -> Self {
        Self {
            line,
            full_name: full_name.trim().trim_start_matches('\\').to_string(),
            alias: alias.filter(|a| !a.is_empty()),
            kind,
        }
    }

    /// 1-based line of the `use` statement.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Fully-qualified name without leading separator.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Alias given with `as`, if any.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Import kind.
    #[must_use]
    pub fn kind(&self) -> ImportKind {
        self.kind
    }

    /// Last segment of the full name.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.full_name
            .rsplit('\\')
            .next()
            .unwrap_or(&self.full_name)
    }

    /// Name the import is referred to by in code: the alias or the short name.
    #[must_use]
    pub fn effective_name(&self) -> &str {
        self.alias().unwrap_or_else(|| self.short_name())
    }

    /// Every segment but the last, or an empty string for a global name.
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.full_name
            .rsplit_once('\\')
            .map_or("", |(ns, _)| ns)
    }
}
