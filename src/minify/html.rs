//! Output transform: HTML minification gated by output path.

use std::path::Path;

use anyhow::{Result, bail};

use crate::config::MinifyPolicy;
use crate::log;

/// Minify an HTML document.
fn minify_html_bytes(content: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = true;
    minify_html::minify(content, &cfg)
}

/// Transform page content on its way to `output_path`.
///
/// Only `.html` outputs are touched; everything else passes through
/// byte-identical. `minify` is the effective switch for the current
/// mode; the extension gate applies regardless.
pub fn transform(
    content: String,
    output_path: &Path,
    minify: bool,
    policy: MinifyPolicy,
) -> Result<String> {
    let is_html = output_path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("html"));
    if !is_html || !minify {
        return Ok(content);
    }

    let minified = minify_html_bytes(content.as_bytes());
    match String::from_utf8(minified) {
        Ok(out) => Ok(out),
        Err(e) => {
            if policy.is_fatal() {
                bail!(
                    "minified {} is not valid UTF-8: {e}",
                    output_path.display()
                );
            }
            log!(
                "warning";
                "minified {} is not valid UTF-8, keeping original",
                output_path.display()
            );
            Ok(content)
        }
    }
}
