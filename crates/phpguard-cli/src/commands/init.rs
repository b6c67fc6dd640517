//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# phpguard configuration

# One of: recommended (default), strict, minimal, all
preset = "recommended"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Directory names never descended into
exclude_dirs = ["vendor", "node_modules", ".git", ".svn", ".hg"]

# Glob patterns to exclude, relative to the root
exclude = []

# Respect .gitignore files
respect_gitignore = true

# Load nested .gitignore files before walking
preload_gitignores = true

# Rule configurations
# Each rule can be enabled/disabled and tuned

[rules.class-length]
enabled = true
max_class_length = 500
max_method_length = 50

[rules.cyclomatic-complexity]
max_complexity = 10

# Not part of the recommended preset
[rules.psr12-compliance]
enabled = false
max_line_length = 120
"#;

/// Config file name written into the target directory.
pub const CONFIG_FILE: &str = "phpguard.toml";

/// Runs the init command.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: phpguard check");

    Ok(())
}
