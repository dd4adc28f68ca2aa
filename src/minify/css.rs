//! CSS minification via lightningcss.

use anyhow::{Result, anyhow};
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

/// Minify CSS source code.
///
/// Parse errors surface as `Err`; the failure policy decides what the
/// caller does with them.
pub fn minify_css(source: &str) -> Result<String> {
    let stylesheet = StyleSheet::parse(source, ParserOptions::default())
        .map_err(|e| anyhow!("css parse error: {e}"))?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| anyhow!("css print error: {e}"))?;
    Ok(result.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_css_basic() {
        let out = minify_css("body {\n  color: #ff0000;\n  margin: 0px;\n}\n").unwrap();
        assert!(out.len() < 30);
        assert!(out.contains("red") || out.contains("#f00"));
        assert!(!out.contains('\n'));
    }

    #[test]
    fn test_minify_css_idempotent() {
        let once = minify_css(".a { padding: 1rem 1rem 1rem 1rem; }").unwrap();
        let twice = minify_css(&once).unwrap();
        // Already-minified input has nothing left to shrink
        assert_eq!(once.len(), twice.len());
    }

    #[test]
    fn test_minify_css_invalid() {
        // Invalid selectors are parse errors (no error recovery)
        assert!(minify_css("..oops { color: red; }").is_err());
        assert!(minify_css("{ color: red; }").is_err());
    }
}
