//! Locating the PHP files to analyze.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::gitignore::GitignoreMatcher;

/// Directory names skipped by default.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &["vendor", "node_modules", ".git", ".svn", ".hg"];

/// Deepest directory level walked below the root.
const MAX_WALK_DEPTH: usize = 100;

/// Discovery settings.
#[derive(Debug, Clone)]
pub struct Discovery {
    /// Directory names never descended into.
    pub exclude_dirs: Vec<String>,
    /// Glob patterns matched against root-relative paths.
    pub exclude_globs: Vec<glob::Pattern>,
    /// Honor `.gitignore` files.
    pub respect_gitignore: bool,
    /// Load nested `.gitignore` files up front instead of only the root one.
    pub preload_gitignores: bool,
}

impl Default for Discovery {
    fn default() -> Self {
        Self {
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(ToString::to_string).collect(),
            exclude_globs: Vec::new(),
            respect_gitignore: true,
            preload_gitignores: true,
        }
    }
}

/// Files found under a root, plus paths that could not be visited.
#[derive(Debug, Default)]
pub struct DiscoveredFiles {
    /// Absolute `.php` paths in lexicographic order.
    pub files: Vec<PathBuf>,
    /// Walk failures as `(path, reason)`.
    pub errors: Vec<(PathBuf, String)>,
}

impl Discovery {
    /// Walks `root` and returns matching `.php` files, sorted.
    ///
    /// Symlinks are followed; unreadable entries are reported in
    /// [`DiscoveredFiles::errors`] instead of aborting the walk.
    #[must_use]
    pub fn discover(&self, root: &Path) -> DiscoveredFiles {
        let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        let mut gitignore = if self.respect_gitignore {
            GitignoreMatcher::load(&root, self.preload_gitignores, &self.exclude_dirs)
        } else {
            GitignoreMatcher::new()
        };

        let mut found = DiscoveredFiles::default();
        let walker = WalkDir::new(&root)
            .follow_links(true)
            .max_depth(MAX_WALK_DEPTH)
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !self.is_excluded_dir(&entry.file_name().to_string_lossy())
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map_or_else(|| root.clone(), Path::to_path_buf);
                    warn!("Skipping {}: {e}", path.display());
                    found.errors.push((path, e.to_string()));
                    continue;
                }
            };

            if !entry.file_type().is_file()
                || entry.path().extension().and_then(|e| e.to_str()) != Some("php")
            {
                continue;
            }

            let path = entry.path().canonicalize().unwrap_or_else(|_| entry.path().to_path_buf());
            if self.matches_glob(&root, &path) {
                debug!("Excluding by pattern: {}", path.display());
                continue;
            }
            if gitignore.is_ignored(&path) {
                debug!("Excluding by .gitignore: {}", path.display());
                continue;
            }
            found.files.push(path);
        }

        found.files.sort();
        found.files.dedup();
        found
    }

    fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude_dirs.iter().any(|d| d == name)
    }

    fn matches_glob(&self, root: &Path, path: &Path) -> bool {
        if self.exclude_globs.is_empty() {
            return false;
        }
        let rel = path.strip_prefix(root).unwrap_or(path);
        self.exclude_globs
            .iter()
            .any(|pattern| pattern.matches_path(rel) || pattern.matches_path(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, "<?php\n").unwrap();
    }

    fn names(root: &Path, found: &DiscoveredFiles) -> Vec<String> {
        let root = root.canonicalize().unwrap();
        found
            .files
            .iter()
            .map(|p| {
                p.strip_prefix(&root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn finds_sorted_php_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "src/B.php");
        touch(dir.path(), "src/A.php");
        touch(dir.path(), "index.php");
        touch(dir.path(), "README.md");
        touch(dir.path(), "vendor/lib/X.php");
        touch(dir.path(), "node_modules/y.php");

        let found = Discovery::default().discover(dir.path());
        assert_eq!(names(dir.path(), &found), ["index.php", "src/A.php", "src/B.php"]);
        assert!(found.errors.is_empty());
    }

    #[test]
    fn honors_gitignore_and_toggle() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "src/A.php");
        touch(dir.path(), "build/output.php");
        touch(dir.path(), "rebuild/output.php");
        std::fs::write(dir.path().join(".gitignore"), "build/\n").unwrap();

        let found = Discovery::default().discover(dir.path());
        assert_eq!(names(dir.path(), &found), ["rebuild/output.php", "src/A.php"]);

        let all = Discovery {
            respect_gitignore: false,
            ..Discovery::default()
        }
        .discover(dir.path());
        assert_eq!(all.files.len(), 3);
    }

    #[test]
    fn exclude_globs_and_dirs() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "src/A.php");
        touch(dir.path(), "src/generated/G.php");
        touch(dir.path(), "tests/T.php");

        let discovery = Discovery {
            exclude_dirs: vec!["tests".to_string()],
            exclude_globs: vec![glob::Pattern::new("src/generated/*").unwrap()],
            ..Discovery::default()
        };
        let found = discovery.discover(dir.path());
        assert_eq!(names(dir.path(), &found), ["src/A.php"]);
    }
}
