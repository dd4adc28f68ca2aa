//! Slug conversion for tags and headings.
//!
//! `slugify` turns display text into a URL-safe fragment; `deslugify` is the
//! presentation-side inverse, turning a slug back into title-cased text.

use deunicode::deunicode;

/// Convert display text to a URL-safe slug.
///
/// Transliterates unicode to ASCII (deunicode), lowercases, and collapses
/// every run of non-alphanumeric characters into a single `-`.
///
/// # Examples
///
/// - `slugify("Hello World")` -> `"hello-world"`
/// - `slugify("Déjà vu!")` -> `"deja-vu"`
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Convert a slug back to title-cased display text.
///
/// Dashes become spaces, then each whitespace-delimited token is title-cased
/// (first character uppercased, the rest lowercased). Idempotent: applying it
/// to already-deslugified text returns the same string.
///
/// # Examples
///
/// - `deslugify("hello-world")` -> `"Hello World"`
/// - `deslugify("rust")` -> `"Rust"`
pub fn deslugify(slug: &str) -> String {
    slug.replace('-', " ")
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first character of a token, lowercase the remainder.
fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn test_slugify_collapses_symbol_runs() {
        assert_eq!(slugify("Rust & WebAssembly!"), "rust-webassembly");
        assert_eq!(slugify("a -- b"), "a-b");
    }

    #[test]
    fn test_slugify_transliterates_unicode() {
        assert_eq!(slugify("Déjà vu"), "deja-vu");
        assert_eq!(slugify("Über café"), "uber-cafe");
    }

    #[test]
    fn test_slugify_no_leading_or_trailing_dash() {
        assert_eq!(slugify("  hello  "), "hello");
        assert_eq!(slugify("!hello!"), "hello");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_deslugify_basic() {
        assert_eq!(deslugify("hello-world"), "Hello World");
    }

    #[test]
    fn test_deslugify_single_token() {
        assert_eq!(deslugify("rust"), "Rust");
    }

    #[test]
    fn test_deslugify_normalizes_case() {
        assert_eq!(deslugify("hello-WORLD"), "Hello World");
    }

    #[test]
    fn test_deslugify_preserves_titled_input() {
        assert_eq!(deslugify("already Title"), "Already Title");
    }

    #[test]
    fn test_deslugify_idempotent() {
        for input in ["hello-world", "a-b-c", "Rust", "mixed CASE here"] {
            let once = deslugify(input);
            assert_eq!(deslugify(&once), once);
        }
    }

    #[test]
    fn test_deslugify_empty() {
        assert_eq!(deslugify(""), "");
    }

    #[test]
    fn test_slugify_then_deslugify() {
        assert_eq!(deslugify(&slugify("Hello World")), "Hello World");
    }
}
