//! Brace-balanced scanning over PHP source lines.
//!
//! The structural parser and several rules need to count braces and
//! parentheses without being fooled by string literals or comments. The
//! [`Scrubber`] blanks both out line by line, carrying block-comment, string
//! and heredoc state across line boundaries, so callers can count delimiters
//! on the scrubbed text.

/// Removes comments and string contents from PHP source lines.
///
/// String literals keep their quotes but lose their contents (`"a{b"` becomes
/// `""`). Comments are replaced by a single space. A scrubber built with
/// [`Scrubber::keeping_strings`] only removes comments.
#[derive(Debug, Clone, Default)]
pub struct Scrubber {
    in_block_comment: bool,
    in_string: Option<char>,
    heredoc: Option<String>,
    keep_strings: bool,
}

impl Scrubber {
    /// Creates a scrubber in the "plain code" state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scrubber that removes comments but leaves literals intact.
    #[must_use]
    pub fn keeping_strings() -> Self {
        Self {
            keep_strings: true,
            ..Self::default()
        }
    }

    /// Returns true if the next line starts inside a block comment.
    #[must_use]
    pub fn in_comment(&self) -> bool {
        self.in_block_comment
    }

    /// Returns true if the next line starts inside a string or heredoc body.
    #[must_use]
    pub fn in_literal(&self) -> bool {
        self.in_string.is_some() || self.heredoc.is_some()
    }

    /// Scrubs one physical line and advances the cross-line state.
    pub fn scrub(&mut self, line: &str) -> String {
        if let Some(label) = &self.heredoc {
            let trimmed = line.trim_start();
            let closes = trimmed.strip_prefix(label.as_str()).is_some_and(|rest| {
                !rest.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_')
            });
            if !closes {
                return if self.keep_strings {
                    line.to_string()
                } else {
                    String::new()
                };
            }
            let (label, rest) = trimmed.split_at(label.len());
            let mut out = if self.keep_strings {
                label.to_string()
            } else {
                String::from("\"\"")
            };
            self.heredoc = None;
            out.push_str(&self.scrub(rest));
            return out;
        }

        let chars: Vec<char> = line.chars().collect();
        let mut out = String::with_capacity(line.len());
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            let next = chars.get(i + 1).copied();

            if self.in_block_comment {
                if c == '*' && next == Some('/') {
                    self.in_block_comment = false;
                    out.push(' ');
                    i += 2;
                } else {
                    i += 1;
                }
                continue;
            }

            if let Some(quote) = self.in_string {
                if self.keep_strings {
                    out.push(c);
                }
                if c == '\\' {
                    if self.keep_strings {
                        out.extend(next);
                    }
                    i += 2;
                } else {
                    if c == quote {
                        self.in_string = None;
                        if !self.keep_strings {
                            out.push(quote);
                        }
                    }
                    i += 1;
                }
                continue;
            }

            match c {
                '/' if next == Some('/') => break,
                '#' if next != Some('[') => break,
                '/' if next == Some('*') => {
                    self.in_block_comment = true;
                    i += 2;
                }
                '\'' | '"' | '`' => {
                    self.in_string = Some(c);
                    out.push(c);
                    i += 1;
                }
                '<' if chars[i..].starts_with(&['<', '<', '<']) => {
                    if let Some(label) = heredoc_label(&chars[i + 3..]) {
                        self.heredoc = Some(label);
                        if self.keep_strings {
                            out.extend(&chars[i..]);
                        } else {
                            out.push_str("\"\"");
                        }
                        return out;
                    }
                    out.push(c);
                    i += 1;
                }
                _ => {
                    out.push(c);
                    i += 1;
                }
            }
        }

        out
    }
}

/// Reads the label of a heredoc/nowdoc opener (the text after `<<<`).
fn heredoc_label(rest: &[char]) -> Option<String> {
    let text: String = rest.iter().collect();
    let text = text.trim_start();
    let text = text.trim_start_matches(['\'', '"']);
    let label: String = text
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if label.is_empty() || label.starts_with(|c: char| c.is_ascii_digit()) {
        None
    } else {
        Some(label)
    }
}

/// Scrubs a single line with a fresh [`Scrubber`].
#[must_use]
pub fn strip_line(line: &str) -> String {
    Scrubber::new().scrub(line)
}

/// Net change in brace depth contributed by already-scrubbed code.
#[must_use]
pub fn brace_delta(code: &str) -> i64 {
    code.chars().fold(0, |depth, c| match c {
        '{' => depth + 1,
        '}' => depth - 1,
        _ => depth,
    })
}

/// Counts `(` and `)` in already-scrubbed code.
#[must_use]
pub fn paren_counts(code: &str) -> (usize, usize) {
    code.chars().fold((0, 0), |(open, close), c| match c {
        '(' => (open + 1, close),
        ')' => (open, close + 1),
        _ => (open, close),
    })
}

/// Splits `text` on `sep` occurrences that are not nested in brackets or
/// string literals.
///
/// Brackets are `()`, `[]`, `{}` and `<>`; the `>` of `=>` and `->` does not
/// close anything.
#[must_use]
pub fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: usize = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut prev = '\0';
    let mut start = 0;

    for (idx, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            prev = c;
            continue;
        }

        match c {
            '\'' | '"' => quote = Some(c),
            '(' | '[' | '{' | '<' => depth += 1,
            '>' if prev == '=' || prev == '-' => {}
            ')' | ']' | '}' | '>' => depth = depth.saturating_sub(1),
            _ if c == sep && depth == 0 => {
                parts.push(&text[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
        prev = c;
    }

    parts.push(&text[start..]);
    parts
}

/// Finds the byte index of the `)` matching the `(` at `open`.
///
/// String literals are skipped. Returns `None` when `open` is not a `(` or
/// the parenthesis is never closed.
#[must_use]
pub fn matching_paren(text: &str, open: usize) -> Option<usize> {
    if text.as_bytes().get(open) != Some(&b'(') {
        return None;
    }

    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (idx, c) in text[open..].char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + idx);
                }
            }
            _ => {}
        }
    }

    None
}

/// Skips leading `#[...]` attribute groups and returns the rest of `text`,
/// left-trimmed.
///
/// Brackets inside an attribute and string literals are balanced. An
/// attribute that is not closed on this text is left in place.
#[must_use]
pub fn strip_attributes(text: &str) -> &str {
    let mut rest = text.trim_start();

    while rest.starts_with("#[") {
        let mut depth = 0usize;
        let mut quote: Option<char> = None;
        let mut escaped = false;
        let mut end = None;

        for (idx, c) in rest.char_indices().skip(1) {
            if let Some(q) = quote {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
                continue;
            }
            match c {
                '\'' | '"' => quote = Some(c),
                '[' => depth += 1,
                ']' => {
                    depth -= 1;
                    if depth == 0 {
                        end = Some(idx);
                        break;
                    }
                }
                _ => {}
            }
        }

        let Some(end) = end else {
            break;
        };
        rest = rest[end + 1..].trim_start();
    }

    rest
}

/// A function body located by an independent brace-balanced scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyScan {
    /// 0-based index of the declaration line the scan started from.
    pub start: usize,
    /// 0-based index of the line holding the closing brace (or the
    /// terminating `;` of a body-less declaration).
    pub end: usize,
    /// Whether an opening brace was found at all.
    pub has_body: bool,
    /// Scrubbed body text per line as `(0-based index, code)`. The opening
    /// line only contributes the text after its `{`.
    pub code: Vec<(usize, String)>,
}

impl BodyScan {
    /// Number of physical lines from the declaration to the end, inclusive.
    #[must_use]
    pub fn span(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Scans forward from a declaration line until the body's braces balance.
///
/// The scan uses its own depth counter, independent of the structural
/// parser. A `;` reached at parenthesis depth zero before any `{` ends a
/// body-less declaration (abstract or interface methods). When the input
/// ends first, the last line is treated as the end.
#[must_use]
pub fn scan_body(lines: &[String], start: usize) -> BodyScan {
    let mut scrubber = Scrubber::new();
    let mut depth: i64 = 0;
    let mut parens: i64 = 0;
    let mut opened = false;
    let mut code = Vec::new();

    for (idx, line) in lines.iter().enumerate().skip(start) {
        let scrubbed = scrubber.scrub(line);
        let mut body_from = if opened { Some(0) } else { None };

        for (pos, c) in scrubbed.char_indices() {
            match c {
                '(' => parens += 1,
                ')' => parens -= 1,
                ';' if !opened && parens <= 0 => {
                    return BodyScan {
                        start,
                        end: idx,
                        has_body: false,
                        code,
                    };
                }
                '{' => {
                    depth += 1;
                    if !opened {
                        opened = true;
                        body_from = Some(pos + 1);
                    }
                }
                '}' => {
                    depth -= 1;
                    if opened && depth == 0 {
                        let from = body_from.unwrap_or(0);
                        code.push((idx, scrubbed[from..pos].to_string()));
                        return BodyScan {
                            start,
                            end: idx,
                            has_body: true,
                            code,
                        };
                    }
                }
                _ => {}
            }
        }

        if let Some(from) = body_from {
            code.push((idx, scrubbed[from..].to_string()));
        }
    }

    BodyScan {
        start,
        end: lines.len().saturating_sub(1).max(start),
        has_body: opened,
        code,
    }
}
