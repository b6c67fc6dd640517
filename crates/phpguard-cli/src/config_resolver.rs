//! Locating the configuration file for a run.
//!
//! Priority order:
//!
//! 1. `--config` flag or `PHPGUARD_CONFIG` (explicit path)
//! 2. `phpguard.toml` or `.phpguard.toml` in the analyzed directory, then in
//!    each parent up to and including the first one holding `composer.json`
//! 3. `config.toml` in the global directory (`$PHPGUARD_CONFIG_DIR`, else
//!    `~/.phpguard/`)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line or through the environment.
    Explicit(PathBuf),
    /// Found next to the analyzed code.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config came from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["phpguard.toml", ".phpguard.toml"];

/// Marks the top of a PHP project; the upward search stops there.
const PROJECT_ROOT_MARKER: &str = "composer.json";

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file for analyzing `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = find_project_config(project_dir) {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    let Some(candidate) = global_dir.map(|dir| dir.join(GLOBAL_CONFIG_NAME)) else {
        return ConfigSource::Default;
    };
    if candidate.is_file() {
        tracing::debug!("Found global config: {}", candidate.display());
        return ConfigSource::Global(candidate);
    }

    ConfigSource::Default
}

fn find_project_config(project_dir: &Path) -> Option<PathBuf> {
    let start = std::path::absolute(project_dir).unwrap_or_else(|_| project_dir.to_path_buf());

    for dir in start.ancestors() {
        let found = PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file());
        if found.is_some() {
            return found;
        }
        if dir.join(PROJECT_ROOT_MARKER).is_file() {
            break;
        }
    }
    None
}

/// Returns the global config directory: `$PHPGUARD_CONFIG_DIR`, else
/// `~/.phpguard/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("PHPGUARD_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".phpguard"))
}
