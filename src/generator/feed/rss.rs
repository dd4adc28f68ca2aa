//! RSS 2.0 feed rendering.

use std::sync::LazyLock;

use anyhow::{Result, anyhow};
use regex::Regex;
use rss::validation::Validate;
use rss::{ChannelBuilder, GuidBuilder, Item, ItemBuilder};

use crate::config::SiteConfig;

use super::common::FeedEntry;

/// Render the channel XML. Validation runs before anything is written.
pub(super) fn render(entries: &[FeedEntry], config: &SiteConfig, base_url: &str) -> Result<String> {
    let items: Vec<Item> = entries.iter().map(|e| to_item(e, config)).collect();

    let channel = ChannelBuilder::default()
        .title(&config.site.title)
        .link(base_url)
        .description(&config.site.description)
        .language(config.site.language.clone())
        .generator("quill".to_string())
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| anyhow!("rss validation failed: {e}"))?;
    Ok(channel.to_string())
}

fn to_item(entry: &FeedEntry, config: &SiteConfig) -> Item {
    ItemBuilder::default()
        .title(entry.title.clone())
        .link(entry.url.clone())
        .guid(
            GuidBuilder::default()
                .permalink(true)
                .value(entry.url.clone())
                .build(),
        )
        .pub_date(entry.date.to_rfc2822())
        .description(entry.summary.clone())
        .content(entry.html.clone())
        .author(normalize_author(entry.author.as_deref(), config))
        .build()
}

/// Normalize an author to the RSS form `email (Name)`.
///
/// A post author already in that form passes through; otherwise the site
/// author is used, combined with the site email when needed. Returns
/// `None` when no usable author exists.
fn normalize_author(author: Option<&str>, config: &SiteConfig) -> Option<String> {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$").unwrap()
    });

    if let Some(author) = author
        && RE_VALID_AUTHOR.is_match(author)
    {
        return Some(author.to_string());
    }

    let site_author = &config.site.author;
    if RE_VALID_AUTHOR.is_match(site_author) {
        return Some(site_author.clone());
    }

    if config.site.email.is_empty() || site_author.is_empty() {
        return None;
    }
    Some(format!("{} ({})", config.site.email, site_author))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date::DateTimeUtc;

    fn make_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.site.title = "Test Blog".to_string();
        config.site.description = "A test blog".to_string();
        config.site.author = "Site Author".to_string();
        config.site.email = "site@example.com".to_string();
        config.site.url = Some("https://example.com".to_string());
        config
    }

    fn entry(title: &str, date: &str, url: &str) -> FeedEntry {
        FeedEntry {
            title: title.to_string(),
            date: DateTimeUtc::parse(date).unwrap(),
            updated: None,
            url: url.to_string(),
            summary: Some("A test summary".to_string()),
            author: None,
            html: "<p>Hello</p>".to_string(),
        }
    }

    #[test]
    fn test_item_fields() {
        let config = make_config();
        let item = to_item(
            &entry("Test Post", "2024-01-15", "https://example.com/test/"),
            &config,
        );

        assert_eq!(item.title(), Some("Test Post"));
        assert_eq!(item.link(), Some("https://example.com/test/"));
        assert_eq!(item.description(), Some("A test summary"));
        assert_eq!(item.content(), Some("<p>Hello</p>"));
        assert_eq!(item.pub_date(), Some("Mon, 15 Jan 2024 00:00:00 GMT"));

        let guid = item.guid().unwrap();
        assert!(guid.is_permalink());
        assert_eq!(guid.value(), "https://example.com/test/");
    }

    #[test]
    fn test_channel_validates_and_includes_items() {
        let config = make_config();
        let entries = vec![
            entry("One", "2024-02-01", "https://example.com/one/"),
            entry("Two", "2024-01-01", "https://example.com/two/"),
        ];

        let xml = render(&entries, &config, "https://example.com").unwrap();
        assert!(xml.contains("<title>Test Blog</title>"));
        assert!(xml.contains("<link>https://example.com</link>"));
        assert!(xml.contains("<title>One</title>"));
        assert!(xml.contains("<title>Two</title>"));
    }

    #[test]
    fn test_normalize_author_valid_post_author() {
        let config = make_config();
        let result = normalize_author(Some("post@example.com (Post Author)"), &config);
        assert_eq!(result, Some("post@example.com (Post Author)".to_string()));
    }

    #[test]
    fn test_normalize_author_falls_back_to_site() {
        let config = make_config();
        let result = normalize_author(Some("Just a name"), &config);
        assert_eq!(result, Some("site@example.com (Site Author)".to_string()));
    }

    #[test]
    fn test_normalize_author_none_without_email() {
        let mut config = make_config();
        config.site.email = String::new();
        assert_eq!(normalize_author(None, &config), None);
    }
}
