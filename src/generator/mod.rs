//! Site-wide artifacts emitted by the Generate stage.
//!
//! Both generators consume the rendered pages from the Render stage;
//! neither re-reads content from disk:
//!
//! - **Feed**: RSS 2.0 or Atom 1.0 from the posts collection
//! - **Sitemap**: `sitemap.xml` over every rendered page

pub mod feed;
pub mod sitemap;

pub use feed::build_feed;
pub use sitemap::build_sitemap;

use std::borrow::Cow;

/// Strip indentation and blank lines when minify is effective.
///
/// Feeds and sitemaps carry no preformatted text, so line-level
/// stripping never changes their meaning.
pub fn minify_xml(xml: &str, enabled: bool) -> Cow<'_, str> {
    if !enabled {
        return Cow::Borrowed(xml);
    }
    Cow::Owned(
        xml.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(""),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_xml_strips_structure_whitespace() {
        let xml = "<?xml version=\"1.0\"?>\n<root>\n  <item>Hello</item>\n</root>";
        assert_eq!(
            minify_xml(xml, true),
            "<?xml version=\"1.0\"?><root><item>Hello</item></root>"
        );
    }

    #[test]
    fn test_minify_xml_keeps_inner_spacing() {
        assert_eq!(minify_xml("  <tag>  a  b  </tag>  ", true), "<tag>  a  b  </tag>");
    }

    #[test]
    fn test_minify_xml_disabled_borrows() {
        let xml = "<root>\n  <item/>\n</root>";
        assert!(matches!(minify_xml(xml, false), Cow::Borrowed(_)));
    }
}
