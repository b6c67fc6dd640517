//! `.gitignore` matching for file discovery.
//!
//! Each loaded `.gitignore` becomes one [`Gitignore`] rooted at its own
//! directory. Files loaded later (deeper) take precedence over earlier ones,
//! and within a file the last matching line wins.

use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::Match;
use indexmap::IndexMap;
use tracing::{debug, warn};

/// Maximum number of cached match results before eviction.
pub const MAX_CACHE_SIZE: usize = 10_000;

/// Maximum directory depth searched for nested `.gitignore` files.
pub const MAX_PRELOAD_DEPTH: usize = 20;

/// Matches paths against every loaded `.gitignore` file.
#[derive(Debug, Default)]
pub struct GitignoreMatcher {
    matchers: Vec<Gitignore>,
    cache: IndexMap<PathBuf, bool>,
}

impl GitignoreMatcher {
    /// Creates a matcher with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `root/.gitignore` and, with `preload`, every nested
    /// `.gitignore` up to [`MAX_PRELOAD_DEPTH`] levels below `root`.
    ///
    /// Directories named in `excluded_dirs` are not descended into.
    #[must_use]
    pub fn load(root: &Path, preload: bool, excluded_dirs: &[String]) -> Self {
        let mut matcher = Self::new();
        if preload {
            matcher.load_recursive(root, 0, excluded_dirs);
        } else {
            matcher.load_file(root);
        }
        debug!(
            "Loaded {} gitignore rule(s) from {} file(s) under {}",
            matcher.rule_count(),
            matcher.matchers.len(),
            root.display()
        );
        matcher
    }

    fn load_recursive(&mut self, dir: &Path, depth: usize, excluded_dirs: &[String]) {
        if depth > MAX_PRELOAD_DEPTH {
            return;
        }
        self.load_file(dir);

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot read directory {}: {e}", dir.display());
                return;
            }
        };

        let mut subdirs: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
            .filter(|entry| {
                let name = entry.file_name();
                !excluded_dirs.iter().any(|ex| name.to_string_lossy() == ex.as_str())
            })
            .map(|entry| entry.path())
            .collect();
        subdirs.sort();

        for subdir in subdirs {
            self.load_recursive(&subdir, depth + 1, excluded_dirs);
        }
    }

    fn load_file(&mut self, dir: &Path) {
        let path = dir.join(".gitignore");
        if !path.is_file() {
            return;
        }
        match std::fs::read_to_string(&path) {
            Ok(content) => self.add_rules(dir, &content),
            Err(e) => warn!("Cannot read {}: {e}", path.display()),
        }
    }

    /// Adds the rules of one `.gitignore` whose directory is `base`.
    ///
    /// Lines that fail to compile are logged and skipped.
    pub fn add_rules(&mut self, base: &Path, content: &str) {
        let source = base.join(".gitignore");
        let mut builder = GitignoreBuilder::new(base);
        for line in content.lines() {
            if let Err(e) = builder.add_line(Some(source.clone()), line) {
                warn!("Skipping gitignore line {line:?} in {}: {e}", source.display());
            }
        }
        match builder.build() {
            Ok(gitignore) if !gitignore.is_empty() => self.matchers.push(gitignore),
            Ok(_) => {}
            Err(e) => warn!("Cannot compile {}: {e}", source.display()),
        }
        self.cache.clear();
    }

    /// Number of loaded rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.matchers
            .iter()
            .map(|g| g.num_ignores() + g.num_whitelists())
            .sum::<u64>()
            .try_into()
            .unwrap_or(usize::MAX)
    }

    /// Number of cached results.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Whether the file at `path` is ignored, either directly or through one
    /// of its parent directories.
    pub fn is_ignored(&mut self, path: &Path) -> bool {
        if self.matchers.is_empty() {
            return false;
        }
        if let Some(&cached) = self.cache.get(path) {
            return cached;
        }

        let is_dir = path.is_dir();
        let mut ignored = false;
        for gitignore in &self.matchers {
            if !path.starts_with(gitignore.path()) {
                continue;
            }
            match gitignore.matched_path_or_any_parents(path, is_dir) {
                Match::None => {}
                Match::Ignore(glob) => {
                    debug!("{} matched gitignore pattern {:?}", path.display(), glob.original());
                    ignored = true;
                }
                Match::Whitelist(glob) => {
                    debug!("{} re-included by {:?}", path.display(), glob.original());
                    ignored = false;
                }
            }
        }

        if self.cache.len() >= MAX_CACHE_SIZE {
            let half = self.cache.len() / 2;
            self.cache.drain(..half);
        }
        self.cache.insert(path.to_path_buf(), ignored);
        ignored
    }
}
