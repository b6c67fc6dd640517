//! Rule presets for common configurations.

use phpguard_core::{Config, RuleBox, RuleConfig};

use crate::{
    class_length, cyclomatic_complexity, psr12_compliance, ClassLength, ConstantNaming,
    CyclomaticComplexity, MissingDocblock, NamespaceDeclaration, NamingConvention, ParamDoc,
    ParameterType, PropertyType, Psr12Compliance, ReturnDoc, ReturnType, StrictTypes, ThrowsDoc,
    UnusedImports, VariableNaming,
};

/// Preset configurations for phpguard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Naming, structure, documentation and type rules with default limits.
    Recommended,
    /// Every rule with lower limits.
    Strict,
    /// Naming and strict types only, for gradual adoption.
    Minimal,
    /// Every rule with default limits.
    All,
}

impl Preset {
    /// Every preset, in display order.
    pub const ALL: [Self; 4] = [Self::Recommended, Self::Strict, Self::Minimal, Self::All];

    /// Looks up a preset by its config name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "recommended" => Some(Self::Recommended),
            "strict" => Some(Self::Strict),
            "minimal" => Some(Self::Minimal),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    /// Returns the config name of this preset.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Strict => "strict",
            Self::Minimal => "minimal",
            Self::All => "all",
        }
    }

    /// Returns the rules for this preset, with per-rule tables from
    /// `config` applied on top of the preset's limits.
    #[must_use]
    pub fn rules(self, config: &Config) -> Vec<RuleBox> {
        let options = |name: &str| config.rule(name).cloned().unwrap_or_default();
        match self {
            Self::Recommended => recommended(&options),
            Self::Strict => strict(&options),
            Self::Minimal => minimal_rules(),
            Self::All => all(&options),
        }
    }
}

type Options<'a> = dyn Fn(&str) -> RuleConfig + 'a;

fn recommended(options: &Options<'_>) -> Vec<RuleBox> {
    vec![
        Box::new(NamingConvention::new()),
        Box::new(ConstantNaming::new()),
        Box::new(VariableNaming::new()),
        Box::new(ClassLength::from_config(&options(class_length::NAME))),
        Box::new(CyclomaticComplexity::from_config(&options(
            cyclomatic_complexity::NAME,
        ))),
        Box::new(UnusedImports::new()),
        Box::new(NamespaceDeclaration::new()),
        Box::new(MissingDocblock::new()),
        Box::new(ParamDoc::new()),
        Box::new(ReturnDoc::new()),
        Box::new(ThrowsDoc::new()),
        Box::new(ParameterType::new()),
        Box::new(PropertyType::new()),
        Box::new(ReturnType::new()),
        Box::new(StrictTypes::new()),
    ]
}

fn all(options: &Options<'_>) -> Vec<RuleBox> {
    let mut rules = recommended(options);
    // Keeps registry order: psr12-compliance follows the naming rules.
    rules.insert(
        3,
        Box::new(Psr12Compliance::from_config(&options(psr12_compliance::NAME))),
    );
    rules
}

fn strict(options: &Options<'_>) -> Vec<RuleBox> {
    let mut rules = all(options);
    replace(
        &mut rules,
        Box::new(
            Psr12Compliance::new()
                .max_line_length(100)
                .with_config(&options(psr12_compliance::NAME)),
        ),
    );
    replace(
        &mut rules,
        Box::new(
            ClassLength::new()
                .max_class_length(300)
                .max_method_length(30)
                .with_config(&options(class_length::NAME)),
        ),
    );
    replace(
        &mut rules,
        Box::new(
            CyclomaticComplexity::new()
                .max_complexity(8)
                .with_config(&options(cyclomatic_complexity::NAME)),
        ),
    );
    rules
}

/// Swaps in `rule` for the rule of the same name.
fn replace(rules: &mut [RuleBox], rule: RuleBox) {
    if let Some(slot) = rules.iter_mut().find(|r| r.name() == rule.name()) {
        *slot = rule;
    }
}

/// Returns the recommended set of rules.
///
/// Everything except `psr12-compliance`, with default limits.
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    Preset::Recommended.rules(&Config::new())
}

/// Returns the strict set of rules.
///
/// All rules, with lower limits:
/// - `class-length`: 300 lines per class, 30 per method
/// - `cyclomatic-complexity`: 8
/// - `psr12-compliance`: 100 characters per line
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    Preset::Strict.rules(&Config::new())
}

/// Returns the minimal set of rules.
///
/// For gradual adoption, only includes:
/// - `naming-convention` (PG001)
/// - `strict-types` (PG033)
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![Box::new(NamingConvention::new()), Box::new(StrictTypes::new())]
}

/// Returns all available rules with default limits.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    Preset::All.rules(&Config::new())
}
