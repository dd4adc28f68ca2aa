//! `[feed]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [feed]
//! enable = true           # Generate a syndication feed from the posts collection
//! format = "rss"          # rss | atom
//! path = "feed.xml"       # Output path (relative to the output directory)
//! limit = 20              # Newest N posts; omit for all
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::{ConfigDiagnostics, FieldPath};

/// Feed output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedFormat {
    /// RSS 2.0 format (default).
    #[default]
    Rss,
    /// Atom 1.0 format.
    Atom,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Enable feed generation.
    pub enable: bool,
    /// Feed format (RSS 2.0 or Atom 1.0).
    pub format: FeedFormat,
    /// Output path for the feed file, relative to the output directory.
    pub path: PathBuf,
    /// Cap entries at the newest N posts. Unset includes every post.
    pub limit: Option<usize>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enable: false,
            format: FeedFormat::Rss,
            path: "feed.xml".into(),
            limit: None,
        }
    }
}

impl FeedConfig {
    /// Validate feed configuration.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }

        if self.limit == Some(0) {
            diag.error(
                FieldPath::new("feed.limit"),
                "limit must be at least 1 (omit it to include every post)",
            );
        }

        if self.path.is_absolute() {
            diag.error(
                FieldPath::new("feed.path"),
                format!(
                    "path '{}' must be relative to the output directory",
                    self.path.display()
                ),
            );
        }
    }
}
