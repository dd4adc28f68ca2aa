//! Sitemap generation.
//!
//! Emits `sitemap.xml` over every rendered page:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/posts/hello/</loc>
//!     <lastmod>2024-01-15T00:00:00Z</lastmod>
//!   </url>
//! </urlset>
//! ```

use std::fs;

use anyhow::{Context, Result};
use quick_xml::escape::escape;

use crate::config::SiteConfig;
use crate::render::RenderedPage;
use crate::{debug, log};

use super::minify_xml;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Write `sitemap.xml` to the output root.
///
/// Skipped when `site.url` is unset; sitemap entries must be absolute.
pub fn build_sitemap(pages: &[RenderedPage], config: &SiteConfig, minify: bool) -> Result<()> {
    let Some(base_url) = config.site.base_url() else {
        debug!("sitemap"; "site.url is not set, skipping");
        return Ok(());
    };

    let entries: Vec<UrlEntry> = pages.iter().map(|p| UrlEntry::new(p, base_url)).collect();
    let xml = render(&entries);
    let xml = minify_xml(&xml, minify);

    let path = config.build.output.join("sitemap.xml");
    fs::write(&path, xml.as_bytes())
        .with_context(|| format!("failed to write sitemap to '{}'", path.display()))?;

    log!("sitemap"; "sitemap.xml");
    Ok(())
}

struct UrlEntry {
    loc: String,
    lastmod: Option<String>,
}

impl UrlEntry {
    fn new(page: &RenderedPage, base_url: &str) -> Self {
        Self {
            loc: format!("{}{}", base_url, page.permalink),
            lastmod: page.updated.or(page.date).map(|d| d.to_rfc3339()),
        }
    }
}

fn render(entries: &[UrlEntry]) -> String {
    let mut xml = String::with_capacity(128 + entries.len() * 96);

    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"");
    xml.push_str(SITEMAP_NS);
    xml.push_str("\">\n");

    for entry in entries {
        xml.push_str("  <url>\n    <loc>");
        xml.push_str(&escape(entry.loc.as_str()));
        xml.push_str("</loc>\n");
        if let Some(lastmod) = &entry.lastmod {
            xml.push_str("    <lastmod>");
            xml.push_str(lastmod);
            xml.push_str("</lastmod>\n");
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date::DateTimeUtc;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn page(permalink: &str, date: Option<&str>, updated: Option<&str>) -> RenderedPage {
        RenderedPage {
            permalink: permalink.to_string(),
            output_file: PathBuf::from("unused"),
            title: None,
            date: date.and_then(DateTimeUtc::parse),
            updated: updated.and_then(DateTimeUtc::parse),
            summary: None,
            author: None,
            html: String::new(),
        }
    }

    #[test]
    fn test_render_empty() {
        let xml = render(&[]);
        assert!(xml.contains(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_entry_with_lastmod() {
        let entry = UrlEntry::new(
            &page("/posts/hello/", Some("2024-01-15"), None),
            "https://example.com",
        );
        assert_eq!(entry.loc, "https://example.com/posts/hello/");
        assert_eq!(entry.lastmod.as_deref(), Some("2024-01-15T00:00:00Z"));
    }

    #[test]
    fn test_updated_wins_over_date() {
        let entry = UrlEntry::new(
            &page("/p/", Some("2024-01-15"), Some("2024-03-01")),
            "https://example.com",
        );
        assert_eq!(entry.lastmod.as_deref(), Some("2024-03-01T00:00:00Z"));
    }

    #[test]
    fn test_undated_page_has_no_lastmod() {
        let xml = render(&[UrlEntry::new(&page("/about/", None, None), "https://x.y")]);
        assert!(xml.contains("<loc>https://x.y/about/</loc>"));
        assert!(!xml.contains("<lastmod>"));
    }

    #[test]
    fn test_loc_is_escaped() {
        let entries = vec![UrlEntry {
            loc: "https://example.com/search?q=a&b=c".to_string(),
            lastmod: None,
        }];
        let xml = render(&entries);
        assert!(xml.contains("<loc>https://example.com/search?q=a&amp;b=c</loc>"));
    }

    #[test]
    fn test_write_minified() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.site.url = Some("https://example.com".to_string());
        config.build.output = dir.path().to_path_buf();

        let pages = vec![page("/", Some("2024-01-01"), None)];
        build_sitemap(&pages, &config, true).unwrap();

        let xml = fs::read_to_string(dir.path().join("sitemap.xml")).unwrap();
        assert!(!xml.contains('\n'));
        assert!(xml.contains("<loc>https://example.com/</loc>"));
    }

    #[test]
    fn test_missing_site_url_skips() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.build.output = dir.path().to_path_buf();

        build_sitemap(&[], &config, false).unwrap();
        assert!(!dir.path().join("sitemap.xml").exists());
    }
}
