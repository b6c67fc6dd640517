//! Normalized PHP type expressions as written in doc tags.

use crate::utils::scan::split_top_level;

/// PHP built-in type names, lower-case.
const BUILTIN_TYPES: &[&str] = &[
    "array", "bool", "callable", "false", "float", "int", "iterable", "mixed", "never", "null",
    "object", "resource", "self", "static", "string", "true", "void", "list", "parent",
];

/// A type expression split into its union members.
///
/// `?Foo|Bar[]` becomes members `[Foo, Bar]` with `nullable = true`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeExpr {
    raw: String,
    members: Vec<String>,
    nullable: bool,
}

impl TypeExpr {
    /// Parses a raw type string.
    ///
    /// Members are split on top-level `|`, legacy aliases are mapped to
    /// their canonical names, built-ins are lower-cased and duplicates are
    /// dropped keeping first occurrence.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let mut members: Vec<String> = Vec::new();
        let mut nullable = false;

        for part in split_top_level(raw, '|') {
            let mut part = part.trim();
            if let Some(rest) = part.strip_prefix('?') {
                nullable = true;
                part = rest.trim_start();
            }
            let part = strip_suffixes(part);
            if part.is_empty() {
                continue;
            }

            let normalized = normalize_member(part);
            if normalized == "null" {
                nullable = true;
            }
            if !members.contains(&normalized) {
                members.push(normalized);
            }
        }

        Self {
            raw: raw.to_string(),
            members,
            nullable,
        }
    }

    /// The type text exactly as written.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized union members in declaration order.
    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Whether the type admits `null`.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Whether no member could be extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl std::fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

fn strip_suffixes(mut part: &str) -> &str {
    loop {
        if let Some(rest) = part.strip_suffix("[]") {
            part = rest.trim_end();
        } else if let Some(rest) = part.strip_suffix("...") {
            part = rest.trim_end();
        } else {
            return part;
        }
    }
}

/// Maps legacy aliases and lower-cases built-in names.
///
/// Generic forms such as `Array<int, string>` keep their parameters but get
/// a canonical base name.
#[must_use]
pub fn normalize_member(member: &str) -> String {
    let split_at = member.find(['<', '{', '(']).unwrap_or(member.len());
    let (base, rest) = member.split_at(split_at);
    let lower = base.to_ascii_lowercase();

    let canonical = match lower.as_str() {
        "boolean" => "bool",
        "integer" => "int",
        "double" | "real" => "float",
        other if BUILTIN_TYPES.contains(&other) => other,
        _ => return member.to_string(),
    };

    format!("{canonical}{rest}")
}

/// Whether `name` is a PHP built-in type (after alias mapping).
#[must_use]
pub fn is_builtin(name: &str) -> bool {
    let lower = normalize_member(name).to_ascii_lowercase();
    let base = lower.split(['<', '{', '(']).next().unwrap_or_default();
    BUILTIN_TYPES.contains(&base)
}
