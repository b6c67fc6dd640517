//! Reassembly of multi-line declarations into logical lines.
//!
//! A function signature spread over several lines, or a class header whose
//! opening brace sits on the next line, is joined into one logical line
//! carrying the physical start and end line numbers. Every other physical
//! line becomes a logical line of its own.

use std::sync::LazyLock;

use regex::Regex;

use crate::utils::scan::{brace_delta, paren_counts, strip_attributes, Scrubber};
use crate::utils::static_regex;

/// Upper bound on physical lines joined into one logical line.
const MAX_JOINED_LINES: usize = 64;

static NAMED_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    static_regex(
        r"(?i)^\s*(?:(?:abstract|final|public|protected|private|static)\s+)*function\s+&?\s*[A-Za-z_][A-Za-z0-9_]*\s*\(",
    )
});

static CLASS_FAMILY: LazyLock<Regex> = LazyLock::new(|| {
    static_regex(
        r"(?i)^\s*(?:(?:abstract|final|readonly)\s+)*(?:class|interface|trait|enum)\s+[A-Za-z_][A-Za-z0-9_]*",
    )
});

static SIGNATURE_END: LazyLock<Regex> =
    LazyLock::new(|| static_regex(r"\)\s*(?::\s*[^{;]*)?\s*(?:[{;].*)?$"));

/// One or more physical lines treated as a single declaration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// 1-based first physical line.
    pub start: usize,
    /// 1-based last physical line.
    pub end: usize,
    /// Comment-free text with literals intact; joined lines are trimmed and
    /// separated by one space.
    pub text: String,
    /// Text with comments and literal contents removed.
    pub code: String,
    /// Net brace depth change over all joined lines.
    pub brace_delta: i64,
    /// Whether the first line began inside a block comment or literal.
    pub in_comment: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Function,
    Class,
}

struct Buffer {
    kind: Pending,
    line: LogicalLine,
    joined: usize,
    opened: usize,
    closed: usize,
}

impl Buffer {
    fn push(&mut self, number: usize, text: &str, code: &str) {
        self.line.end = number;
        append_trimmed(&mut self.line.text, text);
        append_trimmed(&mut self.line.code, code);
        self.line.brace_delta += brace_delta(code);
        let (open, close) = paren_counts(code);
        self.opened += open;
        self.closed += close;
        self.joined += 1;
    }

    /// `next` is the first non-blank physical line after the last joined one.
    fn is_complete(&self, last_code: &str, next: Option<&str>) -> bool {
        if self.joined >= MAX_JOINED_LINES {
            return true;
        }
        match self.kind {
            Pending::Function => {
                let code = self.line.code.trim_end();
                self.opened > 0
                    && self.opened == self.closed
                    && SIGNATURE_END.is_match(code)
                    && !(code.ends_with(')') && starts_return_type(next))
            }
            Pending::Class => last_code.contains('{') || last_code.contains(';'),
        }
    }
}

/// Whether `line` opens with the `:` of a return type.
fn starts_return_type(line: Option<&str>) -> bool {
    line.map(str::trim_start)
        .is_some_and(|l| l.starts_with(':') && !l.starts_with("::"))
}

fn append_trimmed(target: &mut String, piece: &str) {
    let piece = piece.trim();
    if piece.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(piece);
}

/// Splits source lines into logical lines.
#[must_use]
pub fn logical_lines(lines: &[String]) -> Vec<LogicalLine> {
    let mut out = Vec::with_capacity(lines.len());
    let mut code_scrubber = Scrubber::new();
    let mut text_scrubber = Scrubber::keeping_strings();
    let mut buffer: Option<Buffer> = None;

    for (idx, raw) in lines.iter().enumerate() {
        let number = idx + 1;
        let next = lines[idx + 1..]
            .iter()
            .map(String::as_str)
            .find(|l| !l.trim().is_empty());
        let in_comment = code_scrubber.in_comment() || code_scrubber.in_literal();
        let code = code_scrubber.scrub(raw);
        let text = text_scrubber.scrub(raw);

        if let Some(mut pending) = buffer.take() {
            pending.push(number, &text, &code);
            if pending.is_complete(&code, next) {
                out.push(pending.line);
            } else {
                buffer = Some(pending);
            }
            continue;
        }

        let line = LogicalLine {
            start: number,
            end: number,
            brace_delta: brace_delta(&code),
            text,
            code,
            in_comment,
        };

        if !in_comment {
            if let Some(kind) = starts_multiline(&line, next) {
                let (opened, closed) = paren_counts(&line.code);
                buffer = Some(Buffer {
                    kind,
                    line: LogicalLine {
                        text: line.text.trim().to_string(),
                        code: line.code.trim().to_string(),
                        ..line
                    },
                    joined: 1,
                    opened,
                    closed,
                });
                continue;
            }
        }

        out.push(line);
    }

    if let Some(pending) = buffer {
        out.push(pending.line);
    }

    out
}

fn starts_multiline(line: &LogicalLine, next: Option<&str>) -> Option<Pending> {
    let decl = strip_attributes(&line.text);
    if NAMED_FUNCTION.is_match(decl) {
        let (open, close) = paren_counts(&line.code);
        let dangling_return = open > 0
            && open == close
            && line.code.trim_end().ends_with(')')
            && starts_return_type(next);
        return (open > close || dangling_return).then_some(Pending::Function);
    }
    if CLASS_FAMILY.is_match(decl) && !line.code.contains('{') && !line.code.contains(';') {
        return Some(Pending::Class);
    }
    None
}
