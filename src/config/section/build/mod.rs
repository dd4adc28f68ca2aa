//! `[build]` section configuration.
//!
//! Contains build settings including paths, the posts collection glob,
//! minification and the static assets sub-section.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "content"         # Markdown sources (relative to site root)
//! output = "public"           # Output directory for the generated site
//! templates = "templates"     # Tera template directory (relative to site root)
//! posts = "posts/**/*.md"     # Glob for the posts collection (relative to content)
//! minify = true               # Override the mode default (build=on, serve=off)
//!
//! [build.assets]
//! nested = ["static"]         # static/ → output/static/
//! flatten = ["static/robots.txt"]
//! ```
//!
//! See [`assets`] for detailed asset options.

pub mod assets;

pub use assets::{AssetsConfig, FlattenEntry, NestedEntry};

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Content source directory (markdown files).
    pub content: PathBuf,

    /// Build output directory.
    pub output: PathBuf,

    /// Tera template directory.
    pub templates: PathBuf,

    /// Glob selecting the posts collection, relative to `content`.
    pub posts: String,

    /// Static assets configuration.
    pub assets: AssetsConfig,

    /// Minify output files. Unset defers to the build mode default:
    /// on for `quill build`, off for `quill serve`.
    pub minify: Option<bool>,

    /// Clean output directory before building (CLI only).
    #[serde(skip)]
    pub clean: bool,

    /// Include draft pages in the build (CLI only).
    #[serde(skip)]
    pub drafts: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            content: "content".into(),
            output: "public".into(),
            templates: "templates".into(),
            posts: "posts/**/*.md".into(),
            assets: AssetsConfig::default(),
            minify: None,
            clean: false,
            drafts: false,
        }
    }
}

impl BuildSectionConfig {
    /// Validate build configuration.
    ///
    /// Expects paths to be normalized (absolute) already.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.content.is_dir() {
            diag.error_with_hint(
                FieldPath::new("build.content"),
                format!("content directory '{}' not found", self.content.display()),
                "run `quill init` to scaffold a new site",
            );
        }

        if let Err(e) = wax::Glob::new(&self.posts) {
            diag.error(
                FieldPath::new("build.posts"),
                format!("invalid glob pattern '{}': {e}", self.posts),
            );
        }

        if !self.templates.is_dir() {
            diag.warn(
                FieldPath::new("build.templates"),
                format!(
                    "template directory '{}' not found, pages render with the built-in fallback layout",
                    self.templates.display()
                ),
            );
        }
    }
}
