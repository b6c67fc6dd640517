//! List rules command implementation.

use phpguard_core::Config;
use phpguard_rules::{all_rules, Preset};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<24} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<8} {:<24} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nPresets:");
    for preset in Preset::ALL {
        println!("  {:<12} - {}", preset.name(), preset_codes(preset));
    }

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  phpguard check --rules naming-convention,strict-types");
    println!("  phpguard check --rules PG020,PG021,PG022");
}

fn preset_codes(preset: Preset) -> String {
    let codes: Vec<&str> = preset
        .rules(&Config::default())
        .iter()
        .map(|rule| rule.code())
        .collect();
    let mut line = codes.join(", ");
    if preset == Preset::Recommended {
        line.push_str(" (default)");
    }
    line
}
