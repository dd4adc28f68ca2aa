//! A content document: source file, front matter, body, output route.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::SiteConfig;
use crate::core::ContentKind;

use super::{PageMeta, frontmatter};

/// One page source with its computed output route.
///
/// Immutable once read; the renderer consumes the body and writes to
/// `output_file`.
///
/// # Example
///
/// ```text
/// Source: content/posts/hello.md
/// Output: public/posts/hello/index.html
///
/// Document {
///     source:      content/posts/hello.md
///     relative:    posts/hello.md
///     is_index:    false
///     permalink:   /posts/hello/
///     output_file: public/posts/hello/index.html
///     output_dir:  public/posts/hello/
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    /// Source file path (absolute).
    pub source: PathBuf,
    /// Source path relative to the content root.
    pub relative: PathBuf,
    /// Source flavor (markdown or raw HTML).
    pub kind: ContentKind,
    /// Front matter metadata (all defaults when absent).
    pub meta: PageMeta,
    /// Body with front matter stripped.
    pub body: String,
    /// Whether the source is an index file (`index.md` / `index.html`).
    pub is_index: bool,
    /// URL path, `/`-delimited with leading and trailing slash.
    pub permalink: String,
    /// Output HTML file (absolute).
    pub output_file: PathBuf,
    /// Output directory (absolute).
    pub output_dir: PathBuf,
}

impl Document {
    /// Read a source file and compute its route.
    pub fn read(source: &Path, config: &SiteConfig) -> Result<Self> {
        let raw = std::fs::read_to_string(source)
            .with_context(|| format!("failed to read {}", source.display()))?;
        Self::from_parts(source.to_path_buf(), &raw, config)
    }

    /// Build a document from raw source text.
    pub(crate) fn from_parts(source: PathBuf, raw: &str, config: &SiteConfig) -> Result<Self> {
        let kind = ContentKind::from_path(&source)
            .with_context(|| format!("not a content file: {}", source.display()))?;

        let (meta, body) = match frontmatter::extract(raw)
            .with_context(|| format!("invalid front matter in {}", source.display()))?
        {
            Some((meta, body)) => (meta, body.to_string()),
            None => (PageMeta::default(), raw.to_string()),
        };

        let relative = source
            .strip_prefix(&config.build.content)
            .unwrap_or(&source)
            .to_path_buf();

        let stem = relative
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let is_index = stem == "index";

        // Pretty URLs: name.md -> /name/, index.md keeps its directory.
        // A front matter permalink replaces the source-derived path.
        let permalink = match meta.permalink.as_deref() {
            Some(custom) => normalize_permalink(custom),
            None => {
                let mut segments: Vec<&str> = relative
                    .parent()
                    .into_iter()
                    .flat_map(|p| p.iter())
                    .filter_map(|c| c.to_str())
                    .collect();
                if !is_index {
                    segments.push(stem);
                }
                join_segments(&segments)
            }
        };

        let output_dir = permalink
            .split('/')
            .filter(|s| !s.is_empty())
            .fold(config.build.output.clone(), |dir, seg| dir.join(seg));
        let output_file = output_dir.join("index.html");

        Ok(Self {
            source,
            relative,
            kind,
            meta,
            body,
            is_index,
            permalink,
            output_file,
            output_dir,
        })
    }

    /// Title, falling back to the permalink.
    pub fn title(&self) -> &str {
        self.meta.title.as_deref().unwrap_or(&self.permalink)
    }

    /// Absolute URL for feeds and the sitemap.
    pub fn full_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.permalink)
    }
}

/// Normalize a user-supplied permalink to `/a/b/` form.
fn normalize_permalink(custom: &str) -> String {
    let segments: Vec<&str> = custom.split('/').filter(|s| !s.is_empty()).collect();
    join_segments(&segments)
}

fn join_segments(segments: &[&str]) -> String {
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", segments.join("/"))
    }
}
