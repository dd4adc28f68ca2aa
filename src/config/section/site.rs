//! `[site]` configuration.
//!
//! Site metadata injected into every template context as `site`, and used by
//! the feed and sitemap generators.

use crate::config::{ConfigDiagnostics, FieldPath};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Site metadata (`[site]` in quill.toml).
///
/// Templates can read custom fields via `site.extra.xxx`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site title.
    pub title: String,

    /// Author name.
    pub author: String,

    /// Author email (used in feed entries).
    pub email: String,

    /// Site description.
    pub description: String,

    /// Absolute site URL (e.g., "https://example.com"). Required for feeds.
    pub url: Option<String>,

    /// Language code (e.g., "en", "zh-Hans").
    pub language: String,

    /// Custom fields accessible via `site.extra.xxx` in templates.
    #[serde(default)]
    pub extra: FxHashMap<String, toml::Value>,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            email: String::new(),
            description: String::new(),
            url: None,
            language: "en".into(),
            extra: FxHashMap::default(),
        }
    }
}

impl SiteInfoConfig {
    /// Base URL with any trailing slash removed, for permalink joining.
    pub fn base_url(&self) -> Option<&str> {
        self.url.as_deref().map(|u| u.trim_end_matches('/'))
    }

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `title` must be set
    /// - If `feed_enabled`, `url` must be set
    /// - `url` must be a valid http(s) URL with a host
    pub fn validate(&self, feed_enabled: bool, diag: &mut ConfigDiagnostics) {
        if self.title.is_empty() {
            diag.error_with_hint(
                FieldPath::new("site.title"),
                "site title is required",
                "set title, e.g.: \"My Blog\"",
            );
        }

        // Feed requires url
        if feed_enabled && self.url.is_none() {
            diag.error_with_hint(
                FieldPath::new("site.url"),
                "feed.enable is set but site.url is not configured",
                "set site.url, e.g.: \"https://example.com\"",
            );
        }

        // URL format check using url crate for strict validation
        if let Some(url_str) = &self.url {
            match url::Url::parse(url_str) {
                Ok(parsed) => {
                    // Must be http or https
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            FieldPath::new("site.url"),
                            format!(
                                "scheme '{}' not supported, must be http or https",
                                parsed.scheme()
                            ),
                            "use format like https://example.com",
                        );
                    }
                    // Must have a valid host
                    if parsed.host_str().is_none() {
                        diag.error_with_hint(
                            FieldPath::new("site.url"),
                            "URL must have a valid host",
                            "use format like https://example.com",
                        );
                    }
                }
                Err(e) => {
                    diag.error_with_hint(
                        FieldPath::new("site.url"),
                        format!("invalid URL: {}", e),
                        "use format like https://example.com",
                    );
                }
            }
        }
    }
}
