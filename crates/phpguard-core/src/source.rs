//! Reading PHP sources from disk.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

/// Failure to read one source file.
#[derive(Debug, Error, Diagnostic)]
pub enum SourceError {
    /// The path does not exist.
    #[error("File not found: {0}")]
    #[diagnostic(code(phpguard::source::not_found))]
    NotFound(PathBuf),

    /// The path exists but is not a regular file.
    #[error("Not a file: {0}")]
    #[diagnostic(code(phpguard::source::not_a_file))]
    NotAFile(PathBuf),

    /// The file could not be read.
    #[error("Failed to read {path}: {source}")]
    #[diagnostic(code(phpguard::source::read))]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// Splits text into lines, treating `\r\n`, `\r` and `\n` alike.
///
/// A trailing terminator does not produce an extra empty line.
#[must_use]
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                lines.push(std::mem::take(&mut current));
            }
            '\n' => lines.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Reads a file and splits it into lines.
///
/// Invalid UTF-8 is replaced rather than rejected.
///
/// # Errors
///
/// Returns a [`SourceError`] if the path is missing, not a file, or
/// unreadable.
pub fn read_lines(path: &Path) -> Result<Vec<String>, SourceError> {
    if !path.exists() {
        return Err(SourceError::NotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(SourceError::NotAFile(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(split_lines(&String::from_utf8_lossy(&bytes)))
}
