//! File category classification for watch mode rebuilds.
//!
//! | Category   | Rebuild Strategy      | Example Files                |
//! |------------|-----------------------|------------------------------|
//! | Content    | Full rebuild          | `content/**/*.md`            |
//! | Asset      | Full rebuild          | `static/**`                  |
//! | Template   | Full rebuild          | `templates/*.html`           |
//! | Config     | Reload + full rebuild | `quill.toml`                 |
//! | Unknown    | Ignored               | Files outside watched dirs   |

use crate::config::SiteConfig;
use crate::utils::path::normalize_path;
use std::path::{Path, PathBuf};

/// Kind of page source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Markdown file (.md) - front matter + pulldown-cmark body
    Markdown,
    /// Raw HTML file (.html) - front matter + body used verbatim
    Html,
}

impl ContentKind {
    /// Detect content kind from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }

    /// Detect content kind from file path.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Display name for this content kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
        }
    }

    /// Check if a path is a page source file.
    #[inline]
    pub fn is_content_file(path: &Path) -> bool {
        Self::from_path(path).is_some()
    }
}

/// Category of a changed file, used to pick the watch rebuild strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    /// Page source under the content root
    Content,
    /// Static file under a nested asset source
    Asset,
    /// Template under the templates dir
    Template,
    /// Site configuration (quill.toml)
    Config,
    /// File outside watched directories
    Unknown,
}

impl FileCategory {
    /// Get the short name for this category (used in logs)
    pub const fn name(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Asset => "assets",
            Self::Template => "templates",
            Self::Config => "config",
            Self::Unknown => "unknown",
        }
    }

    /// Get the watched paths for this category from config.
    /// Returns Vec because assets may have multiple nested sources.
    pub fn paths(self, config: &SiteConfig) -> Vec<PathBuf> {
        match self {
            Self::Content => vec![config.build.content.clone()],
            Self::Asset => config
                .build
                .assets
                .nested_sources()
                .map(Path::to_path_buf)
                .collect(),
            Self::Template => vec![config.build.templates.clone()],
            Self::Config => vec![config.config_path.clone()],
            Self::Unknown => vec![],
        }
    }

    /// Returns true if this category represents a directory (vs a single file)
    pub const fn is_directory(self) -> bool {
        matches!(self, Self::Content | Self::Asset | Self::Template)
    }
}

/// Categorize a file path to determine how a change should be handled.
///
/// - `Config`: reload config and rebuild everything
/// - `Content`/`Asset`/`Template`: rebuild the site
/// - `Unknown`: ignored
pub fn categorize_path(path: &Path, config: &SiteConfig) -> FileCategory {
    let path = normalize_path(path);

    if path == config.config_path {
        FileCategory::Config
    } else if path.starts_with(&config.build.templates) {
        FileCategory::Template
    } else if path.starts_with(&config.build.content) {
        FileCategory::Content
    } else if config
        .build
        .assets
        .nested_sources()
        .any(|src| path.starts_with(src))
    {
        FileCategory::Asset
    } else {
        FileCategory::Unknown
    }
}
