//! Shared output formatting for lint results.

use anyhow::Result;
use phpguard_core::{IssueDiagnostic, LintResult};

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => result.print_report(),
        OutputFormat::Pretty => print_pretty(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => {
            for line in compact_lines(result) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn print_pretty(result: &LintResult) {
    for issue in result.issues() {
        let report = miette::Report::new(IssueDiagnostic::from(issue));
        println!("{report:?}");
    }

    for outcome in &result.outcomes {
        for (file, reason) in &outcome.errors {
            eprintln!("{}: {} ({})", outcome.code, file.display(), reason);
        }
    }

    let status = if result.passed() { "PASSED" } else { "FAILED" };
    println!(
        "{} rule(s), {} file check(s), {} issue(s): {status}",
        result.outcomes.len(),
        result.total_files(),
        result.issue_count()
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

/// `file:line: [code] message`, one per issue.
fn compact_lines(result: &LintResult) -> Vec<String> {
    result
        .issues()
        .map(|issue| {
            format!(
                "{}:{}: [{}] {}",
                issue.file().display(),
                issue.line(),
                issue.code().unwrap_or("-"),
                issue.message()
            )
        })
        .collect()
}
