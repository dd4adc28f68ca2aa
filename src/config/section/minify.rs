//! `[minify]` section configuration.
//!
//! Sets the failure policy per output kind. Minification itself is
//! switched by `build.minify` and the build mode; this section only
//! decides what happens when a file fails to minify.
//!
//! # Example
//!
//! ```toml
//! [minify]
//! css = "fatal"           # Abort the build on invalid CSS
//! js = "keep-original"    # Copy the unminified JS and keep going
//! html = "fatal"
//! ```

use serde::{Deserialize, Serialize};

/// What to do when minification of a file fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MinifyPolicy {
    /// Fail the build with the minifier's error.
    Fatal,
    /// Log a warning and write the original content unchanged.
    KeepOriginal,
}

impl MinifyPolicy {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MinifySectionConfig {
    /// Policy for stylesheet minification failures.
    pub css: MinifyPolicy,
    /// Policy for script minification failures.
    pub js: MinifyPolicy,
    /// Policy for rendered page minification failures.
    pub html: MinifyPolicy,
}

impl Default for MinifySectionConfig {
    fn default() -> Self {
        Self {
            css: MinifyPolicy::Fatal,
            js: MinifyPolicy::KeepOriginal,
            html: MinifyPolicy::Fatal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.minify.css, MinifyPolicy::Fatal);
        assert_eq!(config.minify.js, MinifyPolicy::KeepOriginal);
        assert_eq!(config.minify.html, MinifyPolicy::Fatal);
    }

    #[test]
    fn test_kebab_case_values() {
        let config = test_parse_config("[minify]\ncss = \"keep-original\"\njs = \"fatal\"");
        assert_eq!(config.minify.css, MinifyPolicy::KeepOriginal);
        assert_eq!(config.minify.js, MinifyPolicy::Fatal);
        // html keeps its default
        assert_eq!(config.minify.html, MinifyPolicy::Fatal);
    }

    #[test]
    fn test_is_fatal() {
        assert!(MinifyPolicy::Fatal.is_fatal());
        assert!(!MinifyPolicy::KeepOriginal.is_fatal());
    }
}
