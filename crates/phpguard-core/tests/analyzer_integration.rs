//! End-to-end runs of the analyzer over temporary PHP trees.

use std::path::Path;
use std::time::Duration;

use phpguard_core::{Analyzer, Config, FileContext, Issue, Rule, SourceModel};

/// Flags every method without a doc block.
struct UndocumentedMethods;

impl Rule for UndocumentedMethods {
    fn name(&self) -> &'static str {
        "undocumented-methods"
    }

    fn code(&self) -> &'static str {
        "T200"
    }

    fn check(&self, ctx: &FileContext, model: &SourceModel) -> Vec<Issue> {
        model
            .functions
            .iter()
            .filter(|f| f.is_method() && f.doc().is_none())
            .map(|f| ctx.issue(f.line(), format!("{} is undocumented.", f.qualified_name())))
            .collect()
    }
}

/// Flags classes that are never closed.
struct UnterminatedClasses;

impl Rule for UnterminatedClasses {
    fn name(&self) -> &'static str {
        "unterminated-classes"
    }

    fn code(&self) -> &'static str {
        "T201"
    }

    fn check(&self, ctx: &FileContext, model: &SourceModel) -> Vec<Issue> {
        model
            .classes
            .iter()
            .filter(|c| c.end_line().is_none())
            .map(|c| ctx.issue(c.start_line(), format!("{} is never closed.", c.name())))
            .collect()
    }
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "src/User.php",
        "<?php\n\
         declare(strict_types=1);\n\
         \n\
         namespace App;\n\
         \n\
         /**\n\
          * A user.\n\
          */\n\
         final class User\n\
         {\n\
         \x20   /**\n\
         \x20    * Returns the name.\n\
         \x20    */\n\
         \x20   public function name(): string\n\
         \x20   {\n\
         \x20       return 'x';\n\
         \x20   }\n\
         \n\
         \x20   public function save(): void\n\
         \x20   {\n\
         \x20   }\n\
         }\n",
    );
    write(
        root,
        "src/Broken.php",
        "<?php\nclass Broken {\n    public function half() {\n",
    );
    write(root, "vendor/lib/Skipped.php", "<?php\nclass Skipped {\n");
    write(root, "build/Generated.php", "<?php\nclass Generated {\n");
    write(root, ".gitignore", "build/\n");
    dir
}

fn zero_elapsed(result: &mut phpguard_core::LintResult) {
    for outcome in &mut result.outcomes {
        outcome.elapsed = Duration::ZERO;
    }
}

#[test]
fn report_over_fixture_tree() {
    let dir = fixture();
    let mut result = Analyzer::builder()
        .root(dir.path())
        .rule(UndocumentedMethods)
        .rule(UnterminatedClasses)
        .build()
        .unwrap()
        .analyze()
        .unwrap();
    zero_elapsed(&mut result);

    assert!(!result.passed());
    assert_eq!(result.total_files(), 4);
    insta::assert_snapshot!(result.format_report(), @r"
    T200 undocumented-methods     2 issue(s) (0 ms)
    T201 unterminated-classes     1 issue(s) (0 ms)

    [src/Broken.php:3] Broken::half is undocumented.
    [src/User.php:19] User::save is undocumented.
    [src/Broken.php:2] Broken is never closed.

    2 rule(s), 4 file check(s), 3 issue(s): FAILED
    ");
}

#[test]
fn gitignore_toggle_and_config() {
    let dir = fixture();
    let config = Config::parse(
        r#"
[analyzer]
respect_gitignore = false

[rules.undocumented-methods]
enabled = false
"#,
    )
    .unwrap();

    let result = Analyzer::builder()
        .root(dir.path())
        .config(config)
        .rule(UndocumentedMethods)
        .rule(UnterminatedClasses)
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    assert_eq!(result.outcomes.len(), 1);
    let files: Vec<String> = result
        .issues()
        .map(|i| i.file().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(files, ["build/Generated.php", "src/Broken.php"]);
}

#[test]
fn repeated_analysis_is_stable() {
    let dir = fixture();
    let run = || {
        Analyzer::builder()
            .root(dir.path())
            .rule(UndocumentedMethods)
            .build()
            .unwrap()
            .analyze()
            .unwrap()
    };
    let first: Vec<Issue> = run().issues().cloned().collect();
    let second: Vec<Issue> = run().issues().cloned().collect();
    assert_eq!(first, second);
}

#[test]
fn json_round_trip_keeps_rule_codes() {
    let dir = fixture();
    let result = Analyzer::builder()
        .root(dir.path())
        .rule(UnterminatedClasses)
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains(r#""code":"T201""#));
    let back: phpguard_core::LintResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back.issue_count(), 1);
    assert_eq!(back.outcomes[0].issues[0].rule(), Some("unterminated-classes"));
}
