//! # phpguard-rules
//!
//! Built-in lint rules for phpguard.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | PG001 | `naming-convention` | PascalCase classes, camelCase functions and properties |
//! | PG002 | `constant-naming` | CONSTANT_CASE for `const` and `define()` |
//! | PG003 | `variable-naming` | camelCase or snake_case variables |
//! | PG004 | `psr12-compliance` | Open tag, declare placement, indentation, line length |
//! | PG010 | `class-length` | Limits class and method length |
//! | PG011 | `cyclomatic-complexity` | Limits function complexity |
//! | PG012 | `unused-imports` | Flags `use` imports never referenced |
//! | PG013 | `namespace-declaration` | Files with classes need a namespace |
//! | PG020 | `missing-docblock` | Classes, functions and properties need PHPDoc |
//! | PG021 | `param-doc` | `@param` tags match the signature |
//! | PG022 | `return-doc` | `@return` tag present and consistent |
//! | PG023 | `throws-doc` | Thrown exceptions are documented |
//! | PG030 | `parameter-type` | Parameters declare a type |
//! | PG031 | `property-type` | Properties declare a type |
//! | PG032 | `return-type` | Functions declare a return type |
//! | PG033 | `strict-types` | Files declare `strict_types=1` |
//!
//! ## Usage
//!
//! ```ignore
//! use phpguard_core::Analyzer;
//! use phpguard_rules::{MissingDocblock, NamingConvention};
//!
//! let result = Analyzer::builder()
//!     .root("./src")
//!     .rule(NamingConvention::new())
//!     .rule(MissingDocblock::new())
//!     .build()?
//!     .analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod class_length;
pub mod constant_naming;
pub mod cyclomatic_complexity;
pub mod missing_docblock;
pub mod namespace_declaration;
pub mod naming_convention;
pub mod param_doc;
pub mod parameter_type;
mod presets;
pub mod property_type;
pub mod psr12_compliance;
pub mod return_doc;
pub mod return_type;
pub mod strict_types;
pub mod throws_doc;
pub mod unused_imports;
pub mod variable_naming;

pub use class_length::{ClassLength, ClassLengthConfig};
pub use constant_naming::ConstantNaming;
pub use cyclomatic_complexity::CyclomaticComplexity;
pub use missing_docblock::MissingDocblock;
pub use namespace_declaration::NamespaceDeclaration;
pub use naming_convention::NamingConvention;
pub use param_doc::ParamDoc;
pub use parameter_type::ParameterType;
pub use presets::{all_rules, minimal_rules, recommended_rules, strict_rules, Preset};
pub use property_type::PropertyType;
pub use psr12_compliance::{Psr12Compliance, Psr12ComplianceConfig};
pub use return_doc::ReturnDoc;
pub use return_type::ReturnType;
pub use strict_types::StrictTypes;
pub use throws_doc::ThrowsDoc;
pub use unused_imports::UnusedImports;
pub use variable_naming::VariableNaming;

/// Re-export core types for convenience.
pub use phpguard_core::{Config, Issue, Rule, RuleBox};

use phpguard_core::RuleConfig;
use tracing::{debug, warn};

/// Name and code of every built-in rule, in report order.
pub const RULES: &[(&str, &str)] = &[
    (naming_convention::NAME, naming_convention::CODE),
    (constant_naming::NAME, constant_naming::CODE),
    (variable_naming::NAME, variable_naming::CODE),
    (psr12_compliance::NAME, psr12_compliance::CODE),
    (class_length::NAME, class_length::CODE),
    (cyclomatic_complexity::NAME, cyclomatic_complexity::CODE),
    (unused_imports::NAME, unused_imports::CODE),
    (namespace_declaration::NAME, namespace_declaration::CODE),
    (missing_docblock::NAME, missing_docblock::CODE),
    (param_doc::NAME, param_doc::CODE),
    (return_doc::NAME, return_doc::CODE),
    (throws_doc::NAME, throws_doc::CODE),
    (parameter_type::NAME, parameter_type::CODE),
    (property_type::NAME, property_type::CODE),
    (return_type::NAME, return_type::CODE),
    (strict_types::NAME, strict_types::CODE),
];

/// Resolves a rule name or code (case-insensitive) to the rule's name.
#[must_use]
pub fn canonical_name(name_or_code: &str) -> Option<&'static str> {
    RULES
        .iter()
        .find(|(name, code)| {
            name.eq_ignore_ascii_case(name_or_code) || code.eq_ignore_ascii_case(name_or_code)
        })
        .map(|(name, _)| *name)
}

/// Builds a rule with default thresholds, overridden by its table in
/// `config` when present.
#[must_use]
pub fn build_rule(name_or_code: &str, config: &Config) -> Option<RuleBox> {
    let name = canonical_name(name_or_code)?;
    let options = config.rule(name).cloned().unwrap_or_default();
    with_options(name, &options)
}

fn with_options(name: &str, options: &RuleConfig) -> Option<RuleBox> {
    let rule: RuleBox = match name {
        naming_convention::NAME => Box::new(NamingConvention::new()),
        constant_naming::NAME => Box::new(ConstantNaming::new()),
        variable_naming::NAME => Box::new(VariableNaming::new()),
        psr12_compliance::NAME => Box::new(Psr12Compliance::from_config(options)),
        class_length::NAME => Box::new(ClassLength::from_config(options)),
        cyclomatic_complexity::NAME => Box::new(CyclomaticComplexity::from_config(options)),
        unused_imports::NAME => Box::new(UnusedImports::new()),
        namespace_declaration::NAME => Box::new(NamespaceDeclaration::new()),
        missing_docblock::NAME => Box::new(MissingDocblock::new()),
        param_doc::NAME => Box::new(ParamDoc::new()),
        return_doc::NAME => Box::new(ReturnDoc::new()),
        throws_doc::NAME => Box::new(ThrowsDoc::new()),
        parameter_type::NAME => Box::new(ParameterType::new()),
        property_type::NAME => Box::new(PropertyType::new()),
        return_type::NAME => Box::new(ReturnType::new()),
        strict_types::NAME => Box::new(StrictTypes::new()),
        _ => return None,
    };
    Some(rule)
}

/// Rules selected by `config`: the configured preset (default
/// `recommended`) plus any rule outside it whose table sets
/// `enabled = true`. Rules disabled in the config are still returned; the
/// analyzer skips them.
#[must_use]
pub fn rules_from_config(config: &Config) -> Vec<RuleBox> {
    let preset = match config.preset.as_deref() {
        None => Preset::Recommended,
        Some(name) => Preset::from_name(name).unwrap_or_else(|| {
            warn!(preset = name, "Unknown preset, falling back to recommended");
            Preset::Recommended
        }),
    };
    debug!(?preset, "Selecting rules");

    let mut rules = preset.rules(config);
    for (name, _) in RULES {
        let explicitly_enabled = config
            .rule(name)
            .is_some_and(|rule| rule.enabled == Some(true));
        if !explicitly_enabled || rules.iter().any(|rule| rule.name() == *name) {
            continue;
        }
        if let Some(rule) = build_rule(name, config) {
            rules.push(rule);
        }
    }
    rules.sort_by_key(|rule| position(rule.name()));
    rules
}

fn position(name: &str) -> usize {
    RULES
        .iter()
        .position(|(rule, _)| *rule == name)
        .unwrap_or(RULES.len())
}
