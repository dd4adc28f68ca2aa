//! Feed entry selection shared by both formats.

use crate::log;
use crate::render::RenderedPage;
use crate::utils::date::DateTimeUtc;
use crate::utils::plural_s;

/// One post validated for feed inclusion.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub title: String,
    pub date: DateTimeUtc,
    pub updated: Option<DateTimeUtc>,
    /// Absolute URL, also used as the entry id / GUID.
    pub url: String,
    pub summary: Option<String>,
    pub author: Option<String>,
    /// Rendered content HTML (before layout wrapping).
    pub html: String,
}

/// Select feed entries from the rendered posts.
///
/// `posts` arrives oldest first (collection order); feeds list newest
/// first. Posts without a title are excluded and counted, then the
/// newest `limit` remain.
pub fn collect_entries(
    posts: &[&RenderedPage],
    base_url: &str,
    limit: Option<usize>,
) -> Vec<FeedEntry> {
    let mut entries = Vec::with_capacity(posts.len());
    let mut untitled = 0usize;

    for page in posts.iter().rev() {
        let Some(title) = page.title.clone() else {
            untitled += 1;
            continue;
        };
        let Some(date) = page.date else {
            continue;
        };

        entries.push(FeedEntry {
            title,
            date,
            updated: page.updated,
            url: format!("{}{}", base_url, page.permalink),
            summary: page.summary.clone(),
            author: page.author.clone(),
            html: page.html.clone(),
        });
    }

    if untitled > 0 {
        log!("feed"; "excluded {} untitled post{}", untitled, plural_s(untitled));
    }

    if let Some(limit) = limit {
        entries.truncate(limit);
    }
    entries
}
