//! Feed generation from the posts collection.
//!
//! One feed per site, RSS 2.0 or Atom 1.0 by `[feed] format`. Entries
//! come from the rendered posts, newest first, so the feed reflects
//! exactly what was published this build.

mod atom;
mod common;
mod rss;

use std::fs;

use anyhow::{Context, Result, bail};

use crate::config::{FeedFormat, SiteConfig};
use crate::generator::minify_xml;
use crate::log;
use crate::render::RenderedPage;

/// Write the configured feed. No-op unless `[feed] enable` is set.
pub fn build_feed(posts: &[&RenderedPage], config: &SiteConfig, minify: bool) -> Result<()> {
    if !config.feed.enable {
        return Ok(());
    }

    // Config validation requires site.url whenever the feed is enabled.
    let Some(base_url) = config.site.base_url() else {
        bail!("feed generation requires site.url");
    };

    let entries = common::collect_entries(posts, base_url, config.feed.limit);

    let xml = match config.feed.format {
        FeedFormat::Rss => rss::render(&entries, config, base_url)?,
        FeedFormat::Atom => atom::render(&entries, config, base_url)?,
    };
    let xml = minify_xml(&xml, minify);

    let path = config.build.output.join(&config.feed.path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create '{}'", parent.display()))?;
    }
    fs::write(&path, xml.as_bytes())
        .with_context(|| format!("failed to write feed to '{}'", path.display()))?;

    log!("feed"; "{}", config.feed.path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date::DateTimeUtc;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn feed_config(dir: &TempDir) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.site.title = "Test Blog".to_string();
        config.site.description = "Testing".to_string();
        config.site.url = Some("https://example.com".to_string());
        config.build.output = dir.path().to_path_buf();
        config.feed.enable = true;
        config
    }

    fn post(title: &str, date: &str, permalink: &str) -> RenderedPage {
        RenderedPage {
            permalink: permalink.to_string(),
            output_file: PathBuf::from("unused"),
            title: Some(title.to_string()),
            date: DateTimeUtc::parse(date),
            updated: None,
            summary: None,
            author: None,
            html: "<p>content</p>".to_string(),
        }
    }

    #[test]
    fn test_disabled_feed_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut config = feed_config(&dir);
        config.feed.enable = false;

        build_feed(&[], &config, false).unwrap();
        assert!(!dir.path().join("feed.xml").exists());
    }

    #[test]
    fn test_rss_feed_written() {
        let dir = TempDir::new().unwrap();
        let config = feed_config(&dir);
        let a = post("Hello", "2024-01-15", "/posts/hello/");
        let posts = vec![&a];

        build_feed(&posts, &config, false).unwrap();

        let xml = fs::read_to_string(dir.path().join("feed.xml")).unwrap();
        assert!(xml.contains("<rss"));
        assert!(xml.contains("<title>Hello</title>"));
        assert!(xml.contains("https://example.com/posts/hello/"));
    }

    #[test]
    fn test_atom_feed_written() {
        let dir = TempDir::new().unwrap();
        let mut config = feed_config(&dir);
        config.feed.format = FeedFormat::Atom;
        config.feed.path = PathBuf::from("atom.xml");
        let a = post("Hello", "2024-01-15", "/posts/hello/");
        let posts = vec![&a];

        build_feed(&posts, &config, false).unwrap();

        let xml = fs::read_to_string(dir.path().join("atom.xml")).unwrap();
        assert!(xml.contains("<feed"));
        assert!(xml.contains("Hello"));
    }

    #[test]
    fn test_missing_site_url_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut config = feed_config(&dir);
        config.site.url = None;

        let err = build_feed(&[], &config, false).unwrap_err();
        assert!(err.to_string().contains("site.url"));
    }
}
