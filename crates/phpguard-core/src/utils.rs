//! Helpers shared by the parser and rule implementations.

pub mod naming;
pub mod scan;

use regex::Regex;

#[doc(inline)]
pub use naming::{is_camel_case, is_constant_case, is_pascal_case, is_snake_case};
#[doc(inline)]
pub use scan::{scan_body, strip_line, BodyScan, Scrubber};

/// Compiles a pattern literal for a `LazyLock<Regex>` static.
///
/// # Panics
///
/// Panics if `pattern` is not a valid regular expression. Only call it with
/// literals that are covered by tests.
#[must_use]
#[allow(clippy::expect_used)]
pub fn static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static regex pattern must compile")
}
