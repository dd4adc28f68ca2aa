//! Asset route: source → URL → output mapping.

use std::path::PathBuf;

/// Kind of static asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// File under a configured assets directory (or a flatten entry).
    Global,
    /// Non-page file living in the content tree, copied alongside its pages.
    Content,
}

/// Route information for a static asset.
///
/// The single source of truth for asset path mapping, shared by scanning
/// and processing.
#[derive(Debug, Clone)]
pub struct AssetRoute {
    /// Source file path (absolute)
    pub source: PathBuf,
    /// URL path (e.g., "/static/logo.png" or "/posts/hello/notes.pdf")
    pub url: String,
    /// Output file path (absolute)
    pub output: PathBuf,
    /// Asset kind
    pub kind: AssetKind,
}
