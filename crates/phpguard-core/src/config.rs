//! Configuration types for phpguard.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::discovery::{Discovery, DEFAULT_EXCLUDE_DIRS};

/// Top-level configuration for phpguard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use (e.g., "recommended", "strict", "minimal", "all").
    #[serde(default)]
    pub preset: Option<String>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the configuration block of a rule.
    #[must_use]
    pub fn rule(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Directory names that are never descended into.
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,

    /// Glob patterns (relative to the root) to exclude from analysis.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Whether to load nested .gitignore files up front.
    #[serde(default = "default_true")]
    pub preload_gitignores: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude_dirs: default_exclude_dirs(),
            exclude: Vec::new(),
            respect_gitignore: true,
            preload_gitignores: true,
        }
    }
}

impl AnalyzerConfig {
    /// Builds discovery settings from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] for an invalid exclude glob.
    pub fn discovery(&self) -> Result<Discovery, ConfigError> {
        let exclude_globs = self
            .exclude
            .iter()
            .map(|p| {
                glob::Pattern::new(p).map_err(|e| ConfigError::Pattern {
                    pattern: p.clone(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Discovery {
            exclude_dirs: self.exclude_dirs.clone(),
            exclude_globs,
            respect_gitignore: self.respect_gitignore,
            preload_gitignores: self.preload_gitignores,
        })
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_exclude_dirs() -> Vec<String> {
    DEFAULT_EXCLUDE_DIRS.iter().map(ToString::to_string).collect()
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets a non-negative integer option as `usize`, falling back on
    /// `default` when absent, negative, or not an integer.
    #[must_use]
    pub fn get_usize(&self, key: &str, default: usize) -> usize {
        self.options
            .get(key)
            .and_then(toml::Value::as_integer)
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(default)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(phpguard::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    #[diagnostic(code(phpguard::config::parse))]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Invalid exclude glob.
    #[error("Invalid exclude pattern {pattern:?}: {message}")]
    #[diagnostic(code(phpguard::config::pattern))]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// Glob error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.respect_gitignore);
        assert!(config.analyzer.preload_gitignores);
        assert_eq!(config.analyzer.exclude_dirs, DEFAULT_EXCLUDE_DIRS);
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
preset = "strict"

[analyzer]
root = "./src"
exclude_dirs = ["vendor", "cache"]
exclude = ["**/generated/**"]
preload_gitignores = false

[rules.class-length]
enabled = true
max_class_length = 300
max_method_length = 40

[rules.strict-types]
enabled = false
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.preset.as_deref(), Some("strict"));
        assert_eq!(config.analyzer.root, PathBuf::from("./src"));
        assert_eq!(config.analyzer.exclude_dirs, ["vendor", "cache"]);
        assert!(config.analyzer.respect_gitignore);
        assert!(!config.analyzer.preload_gitignores);
        assert!(config.is_rule_enabled("class-length"));
        assert!(!config.is_rule_enabled("strict-types"));
        assert!(config.is_rule_enabled("unknown-rule"));

        let rule_config = config.rule("class-length").unwrap();
        assert_eq!(rule_config.get_usize("max_class_length", 500), 300);
        assert_eq!(rule_config.get_usize("max_method_length", 50), 40);
        assert_eq!(rule_config.get_usize("missing", 7), 7);
    }

    #[test]
    fn test_get_usize_rejects_negative_and_non_integer() {
        let config = Config::parse(
            "[rules.cyclomatic-complexity]\nmax_complexity = -3\n\n[rules.psr12-compliance]\nmax_line_length = \"wide\"\n",
        )
        .unwrap();
        assert_eq!(config.rule("cyclomatic-complexity").unwrap().get_usize("max_complexity", 10), 10);
        assert_eq!(config.rule("psr12-compliance").unwrap().get_usize("max_line_length", 120), 120);
    }

    #[test]
    fn test_discovery_from_config() {
        let mut config = AnalyzerConfig::default();
        config.exclude = vec!["src/legacy/**".to_string()];
        let discovery = config.discovery().unwrap();
        assert_eq!(discovery.exclude_globs.len(), 1);
        assert!(discovery.respect_gitignore);

        config.exclude = vec!["[".to_string()];
        assert!(matches!(
            config.discovery(),
            Err(ConfigError::Pattern { .. })
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            Config::parse("preset = ["),
            Err(ConfigError::Parse { .. })
        ));
    }
}
