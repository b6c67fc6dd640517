//! Check command implementation.

use anyhow::{bail, Context, Result};
use clap::Args;
use phpguard_core::{Analyzer, Config, RuleBox};
use phpguard_rules::{build_rule, rules_from_config};
use std::path::{Path, PathBuf};

use crate::config_resolver::{self, ConfigSource};
use crate::OutputFormat;

/// Options of `phpguard check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Path to analyze (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Only run specific rules, by name or code (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub rules: Vec<String>,

    /// Exclude glob patterns, relative to the path (repeatable)
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Directory names never descended into, added to the defaults (repeatable)
    #[arg(long = "exclude-dir")]
    pub exclude_dirs: Vec<String>,

    /// Ignore `.gitignore` files
    #[arg(long)]
    pub no_gitignore: bool,

    /// Load nested `.gitignore` files lazily instead of up front
    #[arg(long)]
    pub no_preload: bool,
}

/// Runs the check command. Returns whether every rule passed.
pub fn run(args: &CheckArgs, explicit_config: Option<&Path>) -> Result<bool> {
    let source = config_resolver::resolve(&args.path, explicit_config);
    let config = load_config(&source)?;

    let rules = if args.rules.is_empty() {
        rules_from_config(&config)
    } else {
        select_rules(&args.rules, &config)?
    };

    let mut builder = Analyzer::builder()
        .root(&args.path)
        .rules(rules)
        .excludes(args.exclude.iter().cloned())
        .config(config);
    for dir in &args.exclude_dirs {
        builder = builder.exclude_dir(dir.clone());
    }
    if args.no_gitignore {
        builder = builder.respect_gitignore(false);
    }
    if args.no_preload {
        builder = builder.preload_gitignores(false);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} rules",
        args.path.display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, args.format)?;

    Ok(result.passed())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

fn select_rules(names: &[String], config: &Config) -> Result<Vec<RuleBox>> {
    let mut rules: Vec<RuleBox> = Vec::new();

    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        let Some(rule) = build_rule(name, config) else {
            tracing::warn!("Unknown rule: {}", name);
            continue;
        };
        if rules.iter().any(|r| r.name() == rule.name()) {
            continue;
        }
        rules.push(rule);
    }

    if rules.is_empty() {
        bail!("No known rules in --rules {}", names.join(","));
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn select_rules_by_name_and_code() {
        let wanted = ["PG001".to_string(), " strict-types ".into(), "pg001".into()];
        let rules = select_rules(&wanted, &Config::default()).unwrap();
        assert_eq!(names(&rules), ["naming-convention", "strict-types"]);
    }

    #[test]
    fn select_rules_skips_unknown() {
        let wanted = ["bogus".to_string(), "return-doc".into()];
        let rules = select_rules(&wanted, &Config::default()).unwrap();
        assert_eq!(names(&rules), ["return-doc"]);

        assert!(select_rules(&["bogus".to_string()], &Config::default()).is_err());
    }

    #[test]
    fn load_config_reads_explicit_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("custom.toml");
        std::fs::write(&path, "preset = \"minimal\"\n").unwrap();

        let config = load_config(&ConfigSource::Explicit(path)).unwrap();
        assert_eq!(config.preset.as_deref(), Some("minimal"));

        let missing = ConfigSource::Explicit(tmp.path().join("missing.toml"));
        assert!(load_config(&missing).is_err());
        assert!(load_config(&ConfigSource::Default).unwrap().preset.is_none());
    }

    #[test]
    fn run_reports_pass_and_fail() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.php"), "<?php\nclass fooBar {}\n").unwrap();

        let mut args = CheckArgs {
            path: tmp.path().to_path_buf(),
            format: OutputFormat::Compact,
            rules: vec!["naming-convention".into()],
            exclude: Vec::new(),
            exclude_dirs: Vec::new(),
            no_gitignore: false,
            no_preload: false,
        };
        let empty_config = tmp.path().join("empty.toml");
        std::fs::write(&empty_config, "").unwrap();
        assert!(!run(&args, Some(&empty_config)).unwrap());

        args.exclude = vec!["a.php".into()];
        assert!(run(&args, Some(&empty_config)).unwrap());
    }
}
