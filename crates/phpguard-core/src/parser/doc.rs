//! Documentation comment parsing.
//!
//! Turns the text of a `/** ... */` block into a [`DocBlock`]. Tags with a
//! bare shape (a `@param` that ends right after the variable, a `@return`
//! or `@throws` with only a type, any tag with an empty body) absorb the
//! following text lines, so wrapped descriptions stay attached to their tag.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{short_name, DocBlock, ParamTag, ReturnTag, ThrowsTag, TypeExpr, VarTag};
use crate::utils::scan::split_top_level;
use crate::utils::static_regex;

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    static_regex(r"^@([A-Za-z][\w\-\\:]*)(?:\s+(.*))?$")
});

static PARAM_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    static_regex(r"^(&)?\s*(\.\.\.)?\s*\$(\w+)(?:\s+(.*))?$")
});

static VAR_NAME: LazyLock<Regex> = LazyLock::new(|| {
    static_regex(r"^\$(\w+)(?:\s+(.*))?$")
});

/// A tag being collected, possibly across several lines.
struct PendingTag {
    name: String,
    body: String,
    absorbs: bool,
}

/// Parses a documentation comment spanning `start_line..=end_line`.
#[must_use]
pub fn parse_doc_block(text: &str, start_line: usize, end_line: usize) -> DocBlock {
    let mut doc = DocBlock {
        start_line,
        end_line,
        raw: text.to_string(),
        ..DocBlock::default()
    };

    let mut paragraphs: Vec<Vec<String>> = vec![Vec::new()];
    let mut trailing: Vec<String> = Vec::new();
    let mut pending: Option<PendingTag> = None;
    let mut seen_tag = false;

    for raw_line in text.lines() {
        let line = clean_line(raw_line);

        if line.is_empty() {
            if let Some(tag) = pending.take() {
                apply_tag(&mut doc, tag);
            }
            if !seen_tag && paragraphs.last().is_some_and(|p| !p.is_empty()) {
                paragraphs.push(Vec::new());
            }
            continue;
        }

        if let Some(caps) = TAG.captures(line) {
            if let Some(tag) = pending.take() {
                apply_tag(&mut doc, tag);
            }
            seen_tag = true;
            let name = caps[1].to_string();
            let body = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
            let absorbs = absorbs_continuation(&name, &body);
            pending = Some(PendingTag { name, body, absorbs });
            continue;
        }

        match pending.as_mut() {
            Some(tag) if tag.absorbs => {
                if !tag.body.is_empty() {
                    tag.body.push(' ');
                }
                tag.body.push_str(line);
            }
            Some(_) => trailing.push(line.to_string()),
            None if seen_tag => trailing.push(line.to_string()),
            None => {
                if let Some(paragraph) = paragraphs.last_mut() {
                    paragraph.push(line.to_string());
                }
            }
        }
    }

    if let Some(tag) = pending.take() {
        apply_tag(&mut doc, tag);
    }

    let mut paragraphs = paragraphs.into_iter().filter(|p| !p.is_empty());
    if let Some(first) = paragraphs.next() {
        doc.summary = first.join(" ");
    }
    let mut description: Vec<String> = paragraphs.flatten().collect();
    description.extend(trailing);
    doc.description = description.join("\n");

    doc
}

/// Strips comment markers and surrounding whitespace from one line.
fn clean_line(line: &str) -> &str {
    let mut line = line.trim();
    if let Some(rest) = line.strip_suffix("*/") {
        line = rest.trim_end();
    }
    if let Some(rest) = line.strip_prefix('/') {
        line = rest;
    }
    line.trim_start_matches('*').trim()
}

/// Splits the leading type token off `body`, honoring brackets.
///
/// `array<int, string> $x` yields `("array<int, string>", "$x")`.
fn split_type_token(body: &str) -> (&str, &str) {
    let mut depth = 0usize;
    for (idx, c) in body.char_indices() {
        match c {
            '<' | '(' | '{' | '[' => depth += 1,
            '>' | ')' | '}' | ']' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                return (&body[..idx], body[idx..].trim_start());
            }
            _ => {}
        }
    }
    (body, "")
}

fn absorbs_continuation(name: &str, body: &str) -> bool {
    if body.is_empty() {
        return true;
    }
    let (ty, rest) = split_type_token(body);
    match name {
        "param" => {
            let target = if ty.starts_with(['$', '&']) || ty.starts_with("...") {
                body
            } else {
                rest
            };
            PARAM_TARGET
                .captures(target)
                .is_some_and(|caps| caps.get(4).is_none())
        }
        "return" | "throws" => rest.is_empty(),
        "var" => rest.is_empty() || VAR_NAME.captures(rest).is_some_and(|c| c.get(2).is_none()),
        _ => false,
    }
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
}

fn apply_tag(doc: &mut DocBlock, tag: PendingTag) {
    let body = tag.body.as_str();
    match tag.name.as_str() {
        "param" => {
            if let Some(param) = parse_param(body) {
                doc.params.insert(param.name.clone(), param);
            }
        }
        "return" => {
            let (ty, rest) = split_type_token(body);
            if !ty.is_empty() {
                doc.return_tag = Some(ReturnTag {
                    ty: TypeExpr::parse(ty),
                    description: non_empty(Some(rest)),
                });
            }
        }
        "throws" => {
            let (ty, rest) = split_type_token(body);
            for exception in split_top_level(ty, '|') {
                let exception = exception.trim().trim_start_matches('\\');
                if exception.is_empty() {
                    continue;
                }
                doc.throws.insert(
                    short_name(exception).to_string(),
                    ThrowsTag {
                        ty: TypeExpr::parse(exception),
                        description: non_empty(Some(rest)),
                    },
                );
            }
        }
        "var" => {
            if let Some(var) = parse_var(body) {
                doc.var = Some(var);
            }
        }
        "deprecated" => {
            doc.deprecated = true;
            doc.deprecated_message = non_empty(Some(body));
        }
        other => doc
            .tags
            .entry(other.to_string())
            .or_default()
            .push(body.to_string()),
    }
}

fn parse_param(body: &str) -> Option<ParamTag> {
    let (ty, rest) = split_type_token(body);
    let (ty, target) = if ty.starts_with(['$', '&']) || ty.starts_with("...") {
        ("", body)
    } else {
        (ty, rest)
    };

    let caps = PARAM_TARGET.captures(target)?;
    Some(ParamTag {
        name: caps[3].to_string(),
        ty: TypeExpr::parse(ty),
        description: non_empty(caps.get(4).map(|m| m.as_str())),
        variadic: caps.get(2).is_some() || ty.ends_with("..."),
        by_reference: caps.get(1).is_some(),
    })
}

fn parse_var(body: &str) -> Option<VarTag> {
    let (first, rest) = split_type_token(body);
    if first.is_empty() {
        return None;
    }

    if let Some(caps) = VAR_NAME.captures(body) {
        let (ty, description) = caps
            .get(2)
            .map_or(("", ""), |m| split_type_token(m.as_str()));
        return Some(VarTag {
            ty: TypeExpr::parse(ty),
            name: Some(caps[1].to_string()),
            description: non_empty(Some(description)),
        });
    }

    if let Some(caps) = VAR_NAME.captures(rest) {
        return Some(VarTag {
            ty: TypeExpr::parse(first),
            name: Some(caps[1].to_string()),
            description: non_empty(caps.get(2).map(|m| m.as_str())),
        });
    }

    Some(VarTag {
        ty: TypeExpr::parse(first),
        name: None,
        description: non_empty(Some(rest)),
    })
}
