//! Built-in rules run through the analyzer over temporary PHP trees.

use std::path::Path;

use phpguard_core::{Analyzer, Config, LintResult};
use phpguard_rules::{
    rules_from_config, MissingDocblock, NamingConvention, ParamDoc, ParameterType, ReturnDoc,
    ReturnType, RuleBox, ThrowsDoc,
};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn analyze(root: &Path, rules: Vec<RuleBox>) -> LintResult {
    Analyzer::builder()
        .root(root)
        .rules(rules)
        .build()
        .unwrap()
        .analyze()
        .unwrap()
}

fn rendered(result: &LintResult) -> Vec<String> {
    result.issues().map(ToString::to_string).collect()
}

const CLEAN: &str = r"<?php

declare(strict_types=1);

namespace App\Model;

use App\Contracts\Named;

/**
 * A named user.
 */
final class User implements Named
{
    /**
     * Display name.
     */
    private string $displayName;

    /**
     * Creates a user.
     *
     * @param string $displayName The name
     */
    public function __construct(string $displayName)
    {
        $this->displayName = $displayName;
    }

    /**
     * Returns the name.
     *
     * @return string
     */
    public function getName(): string
    {
        return $this->displayName;
    }
}
";

#[test]
fn lower_camel_class_gets_one_naming_issue() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "Foo.php", "<?php\nclass fooBar {}\n");

    let result = analyze(dir.path(), vec![Box::new(NamingConvention::new())]);
    assert_eq!(
        rendered(&result),
        ["[Foo.php:2] Class \"fooBar\" should be in PascalCase."]
    );
    let issue = result.issues().next().unwrap();
    assert_eq!(issue.code(), Some("PG001"));
    assert_eq!(issue.help(), Some("rename to `FooBar`"));
}

#[test]
fn bare_function_trips_three_rules() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "helpers.php", "<?php\nfunction do_something($x) {}\n");

    let result = analyze(
        dir.path(),
        vec![
            Box::new(MissingDocblock::new()),
            Box::new(ReturnType::new()),
            Box::new(ParameterType::new()),
        ],
    );
    let codes: Vec<&str> = result.issues().filter_map(|i| i.code()).collect();
    assert_eq!(codes, ["PG020", "PG032", "PG030"]);
    assert_eq!(
        rendered(&result),
        [
            "[helpers.php:2] Missing PHPDoc for function \"do_something\".",
            "[helpers.php:2] Missing return type declaration for function \"do_something\".",
            "[helpers.php:2] Missing type declaration for parameter \"$x\" in function \"do_something\".",
        ]
    );
}

#[test]
fn one_undocumented_parameter_is_the_only_doc_issue() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "f.php",
        "<?php\n/** @param int $a\n * @return bool */\nfunction f(int $a, string $b): bool {}\n",
    );

    let result = analyze(
        dir.path(),
        vec![
            Box::new(ParamDoc::new()),
            Box::new(ReturnDoc::new()),
            Box::new(ThrowsDoc::new()),
        ],
    );
    assert_eq!(
        rendered(&result),
        ["[f.php:2] Missing @param tag for parameter \"$b\" in function \"f\"."]
    );
}

#[test]
fn clean_file_passes_recommended_preset() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/User.php", CLEAN);

    let result = analyze(dir.path(), rules_from_config(&Config::new()));
    assert!(result.passed(), "{}", result.format_report());
    assert_eq!(result.outcomes.len(), 15);
}

#[test]
fn config_disables_and_tunes_rules() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/User.php", CLEAN);
    write(dir.path(), "vendor/acme/bad.php", "<?php\nclass bad {}\n");

    let config = Config::parse(
        r#"
preset = "all"

[rules.psr12-compliance]
max_line_length = 40

[rules.missing-docblock]
enabled = false
"#,
    )
    .unwrap();
    let result = Analyzer::builder()
        .root(dir.path())
        .rules(rules_from_config(&config))
        .config(config)
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    assert_eq!(result.outcomes.len(), 15);
    assert!(result.outcomes.iter().all(|o| o.rule != "missing-docblock"));
    let long_lines: Vec<usize> = result
        .issues()
        .filter(|i| i.message().starts_with("Line exceeds 40 characters."))
        .map(|i| i.line())
        .collect();
    assert_eq!(long_lines, [22, 24, 26]);
    assert!(result.issues().all(|i| !i.file().starts_with("vendor")));
}

#[test]
fn repeated_runs_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.php", "<?php\nclass a_b\n{\n    public $x_y;\n    function Run($p) { if ($p) { throw new E(); } }\n}\n");
    write(dir.path(), "b.php", "<?php\nuse Foo\\Bar;\n$Bad_Name = 1;\n");

    let first = analyze(dir.path(), rules_from_config(&Config::new()));
    let second = analyze(dir.path(), rules_from_config(&Config::new()));
    assert!(!first.passed());
    assert_eq!(rendered(&first), rendered(&second));
}
