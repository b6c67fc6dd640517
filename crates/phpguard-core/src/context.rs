//! Context types for rule execution.

use std::path::{Component, Path, PathBuf};

use crate::types::Issue;

/// Context provided to per-file rules.
///
/// Carries the raw lines next to the parsed model, since several rules
/// rescan the text themselves (line length, complexity, variable names).
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// Source lines without terminators.
    pub lines: &'a [String],
    /// Path relative to the analyzed root.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, lines: &'a [String], root: &Path) -> Self {
        Self {
            path,
            lines,
            relative_path: relative_to(path, root),
        }
    }

    /// Creates an issue for this file at a 1-based line.
    #[must_use]
    pub fn issue(&self, line: usize, message: impl Into<String>) -> Issue {
        Issue::new(self.relative_path.clone(), line, message)
    }

    /// The 1-based line `line`, if it exists.
    #[must_use]
    pub fn line(&self, line: usize) -> Option<&str> {
        line.checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(String::as_str)
    }
}

/// Expresses `path` relative to `root`.
///
/// Paths outside `root` climb out with `..` from the longest common prefix.
#[must_use]
pub fn relative_to(path: &Path, root: &Path) -> PathBuf {
    if let Ok(rel) = path.strip_prefix(root) {
        return rel.to_path_buf();
    }

    let path_parts: Vec<Component> = path.components().collect();
    let root_parts: Vec<Component> = root.components().collect();
    let common = path_parts
        .iter()
        .zip(&root_parts)
        .take_while(|(a, b)| a == b)
        .count();

    if common == 0 {
        return path.to_path_buf();
    }

    let mut rel = PathBuf::new();
    for _ in common..root_parts.len() {
        rel.push("..");
    }
    for part in &path_parts[common..] {
        rel.push(part.as_os_str());
    }
    rel
}
