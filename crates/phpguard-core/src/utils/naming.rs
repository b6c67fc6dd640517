//! Identifier case predicates and conversions.
//!
//! The predicates are ASCII-only: PHP identifiers may contain other bytes,
//! but those never satisfy a naming convention.

fn rest_is(name: &str, allowed: impl Fn(char) -> bool) -> bool {
    name.chars().skip(1).all(allowed)
}

/// `fooBar`, `foo`, `foo2Bar`.
#[must_use]
pub fn is_camel_case(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_lowercase()) && rest_is(name, |c| c.is_ascii_alphanumeric())
}

/// `FooBar`, `Foo`, `HTTPClient`.
#[must_use]
pub fn is_pascal_case(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_uppercase()) && rest_is(name, |c| c.is_ascii_alphanumeric())
}

/// `foo_bar`, `foo`, `foo_2`.
#[must_use]
pub fn is_snake_case(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_lowercase())
        && rest_is(name, |c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// `FOO_BAR`, `FOO`, `V2`.
#[must_use]
pub fn is_constant_case(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_uppercase())
        && rest_is(name, |c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Splits an identifier into lower-case words on `_`, `-` and case changes.
fn words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();
        let boundary = c.is_uppercase()
            && prev.is_some_and(|p| {
                p.is_lowercase()
                    || p.is_ascii_digit()
                    || (p.is_uppercase() && next.is_some_and(char::is_lowercase))
            });
        if boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// `foo_bar` -> `FooBar`.
#[must_use]
pub fn to_pascal_case(name: &str) -> String {
    words(name).iter().map(|w| capitalize(w)).collect()
}

/// `foo_bar` -> `fooBar`.
#[must_use]
pub fn to_camel_case(name: &str) -> String {
    let pascal = to_pascal_case(name);
    let mut chars = pascal.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

/// `fooBar` -> `foo_bar`.
#[must_use]
pub fn to_snake_case(name: &str) -> String {
    words(name).join("_")
}

/// `fooBar` -> `FOO_BAR`.
#[must_use]
pub fn to_constant_case(name: &str) -> String {
    to_snake_case(name).to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case() {
        assert!(is_camel_case("fooBar"));
        assert!(is_camel_case("x1"));
        assert!(!is_camel_case("FooBar"));
        assert!(!is_camel_case("foo_bar"));
        assert!(!is_camel_case(""));
    }

    #[test]
    fn pascal_case() {
        assert!(is_pascal_case("FooBar"));
        assert!(is_pascal_case("HTTPClient"));
        assert!(!is_pascal_case("fooBar"));
        assert!(!is_pascal_case("Foo_Bar"));
    }

    #[test]
    fn snake_and_constant_case() {
        assert!(is_snake_case("foo_bar_2"));
        assert!(!is_snake_case("fooBar"));
        assert!(is_constant_case("MAX_SIZE"));
        assert!(is_constant_case("V2"));
        assert!(!is_constant_case("MaxSize"));
        assert!(!is_constant_case("_MAX"));
    }

    #[test]
    fn conversions() {
        assert_eq!(to_pascal_case("foo_bar"), "FooBar");
        assert_eq!(to_camel_case("do_something"), "doSomething");
        assert_eq!(to_camel_case("FooBar"), "fooBar");
        assert_eq!(to_snake_case("HTTPClient"), "http_client");
        assert_eq!(to_constant_case("maxSize"), "MAX_SIZE");
    }
}
