//! Content tree: scanning, front matter, documents, collections.

pub mod collections;
mod document;
mod frontmatter;
mod meta;
mod scan;

pub use document::Document;
pub use meta::PageMeta;
pub use scan::scan_documents;

/// JSON object type for user-defined metadata fields.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
