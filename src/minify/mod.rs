//! Minification for CSS, JS and rendered HTML.
//!
//! Each kind carries a failure policy from `[minify]`: `fatal` aborts
//! the build with the minifier's error, `keep-original` logs it and
//! emits the input unchanged.

mod css;
mod html;
mod js;

pub use css::minify_css;
pub use html::transform;
pub use js::minify_js;

use std::path::Path;

use anyhow::Result;

use crate::config::MinifyPolicy;
use crate::log;

/// Resolve a minifier result through the configured failure policy.
///
/// `what` names the input in diagnostics (a path or filter name).
pub fn with_policy(
    result: Result<String>,
    original: &str,
    policy: MinifyPolicy,
    what: &str,
) -> Result<String> {
    match result {
        Ok(out) => Ok(out),
        Err(e) if policy.is_fatal() => Err(e.context(format!("failed to minify {what}"))),
        Err(e) => {
            log!("warning"; "failed to minify {what}: {e:#}, keeping original");
            Ok(original.to_string())
        }
    }
}

/// Files named `*.min.css` / `*.min.js` are shipped as-is.
pub fn is_preminified(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.ends_with(".min"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_with_policy_keep_original_on_error() {
        let broken = "function { nope";
        let out = with_policy(
            minify_js(broken),
            broken,
            MinifyPolicy::KeepOriginal,
            "app.js",
        )
        .unwrap();
        assert_eq!(out, broken);
    }

    #[test]
    fn test_with_policy_fatal_propagates() {
        let broken = "..a {}";
        let err = with_policy(minify_css(broken), broken, MinifyPolicy::Fatal, "site.css")
            .unwrap_err();
        assert!(err.to_string().contains("site.css"));
    }

    #[test]
    fn test_with_policy_success_ignores_policy() {
        let src = ".a { margin: 0px; }";
        let out = with_policy(minify_css(src), src, MinifyPolicy::KeepOriginal, "ok.css").unwrap();
        assert!(out.len() < src.len());
    }

    #[test]
    fn test_is_preminified() {
        assert!(is_preminified(&PathBuf::from("vendor/lib.min.js")));
        assert!(is_preminified(&PathBuf::from("style.min.css")));
        assert!(!is_preminified(&PathBuf::from("app.js")));
        assert!(!is_preminified(&PathBuf::from("minimal.css")));
    }
}
