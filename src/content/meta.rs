//! Page metadata from front matter.

use serde::Deserialize;

use super::JsonMap;

/// Deserialize tags, treating `null` as empty vec
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Page metadata from `---`/`+++` front matter.
///
/// # Standard Fields
///
/// | Field       | Type           | Description                         |
/// |-------------|----------------|-------------------------------------|
/// | `title`     | `String`       | Page title                          |
/// | `summary`   | `String`       | Brief description                   |
/// | `date`      | `String`       | Publication date                    |
/// | `updated`   | `String`       | Last update date                    |
/// | `author`    | `String`       | Author name                         |
/// | `draft`     | `bool`         | Draft status (default: false)       |
/// | `tags`      | `Vec<String>`  | Categorization tags                 |
/// | `layout`    | `String`       | Template name (overrides default)   |
/// | `permalink` | `String`       | Custom URL path (overrides default) |
///
/// # Custom Fields (`extra`)
///
/// Any additional fields are captured in `extra` as raw JSON and exposed
/// to templates under `page.extra`.
#[derive(Debug, Clone, serde::Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PageMeta {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub date: Option<String>,
    pub updated: Option<String>,
    pub author: Option<String>,
    #[serde(default)]
    pub draft: bool,
    /// Tags for categorizing the page.
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    /// Template file used to wrap the rendered body.
    ///
    /// Example: `post.html`. Unset pages fall back to the default layout.
    pub layout: Option<String>,
    /// Custom permalink (overrides the source-derived URL path).
    ///
    /// Example: `/archive/2024/hello/` or `/custom-slug/`
    ///
    /// This is an **input** field used to compute the final permalink.
    /// Skipped during serialization - templates see `page.permalink`.
    #[serde(skip_serializing)]
    pub permalink: Option<String>,
    /// Additional user-defined fields (raw JSON).
    #[serde(flatten, default)]
    pub extra: JsonMap,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            title: None,
            summary: None,
            date: None,
            updated: None,
            author: None,
            draft: false,
            tags: Vec::new(),
            layout: None,
            permalink: None,
            extra: JsonMap::new(),
        }
    }
}
