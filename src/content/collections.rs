//! Collections derived from the scanned documents.
//!
//! Both derivations run in the Collect stage, before any page renders:
//! templates iterate `tags` and `posts` and the pipeline guarantees
//! they are complete by then.

use anyhow::{Context, Result, anyhow};
use wax::Pattern;

use crate::utils::date::DateTimeUtc;

use super::Document;

/// Union of every document's tags, deduplicated.
///
/// Sorted so emitted artifacts (tag links, tag pages) are stable across
/// builds; consumers must not depend on a particular order.
pub fn tag_list(documents: &[Document]) -> Vec<String> {
    let mut tags: Vec<String> = documents
        .iter()
        .flat_map(|d| d.meta.tags.iter().cloned())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

/// Documents matching the posts glob, ordered ascending by date.
///
/// The sort is stable: equal dates keep scan order, and scan order is
/// path-sorted, so the sequence is fully deterministic. A matched
/// document without a parseable date is a build error; comparing
/// against an absent date has no meaning.
pub fn posts<'a>(documents: &'a [Document], pattern: &str) -> Result<Vec<&'a Document>> {
    let glob =
        wax::Glob::new(pattern).with_context(|| format!("invalid posts glob '{pattern}'"))?;

    let mut matched: Vec<(&Document, DateTimeUtc)> = Vec::new();
    for doc in documents {
        if !glob.is_match(doc.relative.as_path()) {
            continue;
        }

        let raw = doc.meta.date.as_deref().ok_or_else(|| {
            anyhow!(
                "post {} has no date; every post needs one for ordering",
                doc.relative.display()
            )
        })?;
        let date = DateTimeUtc::parse(raw).ok_or_else(|| {
            anyhow!(
                "post {} has an invalid date '{}' (expected YYYY-MM-DD or RFC 3339)",
                doc.relative.display(),
                raw
            )
        })?;
        matched.push((doc, date));
    }

    matched.sort_by_key(|&(_, date)| date);
    Ok(matched.into_iter().map(|(doc, _)| doc).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::path::PathBuf;

    fn make_doc(rel: &str, frontmatter: &str) -> Document {
        let mut config = SiteConfig::default();
        config.build.content = PathBuf::from("/site/content");
        config.build.output = PathBuf::from("/site/public");
        Document::from_parts(
            PathBuf::from(format!("/site/content/{rel}")),
            frontmatter,
            &config,
        )
        .unwrap()
    }

    #[test]
    fn test_tag_list_union_deduplicated() {
        let docs = vec![
            make_doc("a.md", "---\ntags: rust, web\n---\n"),
            make_doc("b.md", "---\ntags: web, cli\n---\n"),
            make_doc("c.md", "---\ntitle: No Tags\n---\n"),
        ];

        let tags = tag_list(&docs);
        assert_eq!(tags, vec!["cli", "rust", "web"]);
    }

    #[test]
    fn test_tag_list_empty() {
        assert!(tag_list(&[]).is_empty());
        let docs = vec![make_doc("a.md", "no tags here")];
        assert!(tag_list(&docs).is_empty());
    }

    #[test]
    fn test_posts_matches_glob_only() {
        let docs = vec![
            make_doc("posts/one.md", "---\ndate: 2024-01-01\n---\n"),
            make_doc("about.md", "---\ntitle: About\n---\n"),
            make_doc("posts/two.md", "---\ndate: 2024-02-01\n---\n"),
        ];

        let posts = posts(&docs, "posts/**/*.md").unwrap();
        assert_eq!(posts.len(), 2);
        assert!(posts.iter().all(|d| d.relative.starts_with("posts")));
    }

    #[test]
    fn test_posts_sorted_ascending_by_date() {
        let docs = vec![
            make_doc("posts/late.md", "---\ndate: 2024-06-15\n---\n"),
            make_doc("posts/early.md", "---\ndate: 2023-01-02\n---\n"),
            make_doc("posts/mid.md", "---\ndate: 2024-01-30\n---\n"),
        ];

        let posts = posts(&docs, "posts/**/*.md").unwrap();
        let order: Vec<_> = posts.iter().map(|d| d.meta.date.as_deref()).collect();
        assert_eq!(
            order,
            vec![Some("2023-01-02"), Some("2024-01-30"), Some("2024-06-15")]
        );
    }

    #[test]
    fn test_posts_equal_dates_keep_scan_order() {
        let docs = vec![
            make_doc("posts/first.md", "---\ndate: 2024-03-03\n---\n"),
            make_doc("posts/second.md", "---\ndate: 2024-03-03\n---\n"),
            make_doc("posts/third.md", "---\ndate: 2024-03-03\n---\n"),
        ];

        let posts = posts(&docs, "posts/**/*.md").unwrap();
        let order: Vec<_> = posts.iter().map(|d| d.relative.clone()).collect();
        assert_eq!(
            order,
            vec![
                PathBuf::from("posts/first.md"),
                PathBuf::from("posts/second.md"),
                PathBuf::from("posts/third.md"),
            ]
        );
    }

    #[test]
    fn test_posts_missing_date_is_error() {
        let docs = vec![make_doc("posts/undated.md", "---\ntitle: Oops\n---\n")];
        let err = posts(&docs, "posts/**/*.md").unwrap_err();
        assert!(err.to_string().contains("no date"));
    }

    #[test]
    fn test_posts_invalid_date_is_error() {
        let docs = vec![make_doc("posts/bad.md", "---\ndate: yesterday\n---\n")];
        let err = posts(&docs, "posts/**/*.md").unwrap_err();
        assert!(err.to_string().contains("invalid date"));
    }

    #[test]
    fn test_non_post_without_date_is_fine() {
        let docs = vec![
            make_doc("index.md", "# Home"),
            make_doc("posts/only.md", "---\ndate: 2024-01-01\n---\n"),
        ];
        let posts = posts(&docs, "posts/**/*.md").unwrap();
        assert_eq!(posts.len(), 1);
    }

    #[test]
    fn test_posts_rfc3339_dates() {
        let docs = vec![
            make_doc("posts/b.md", "---\ndate: 2024-01-01T12:00:00Z\n---\n"),
            make_doc("posts/a.md", "---\ndate: 2024-01-01T08:30:00Z\n---\n"),
        ];
        let posts = posts(&docs, "posts/**/*.md").unwrap();
        assert_eq!(posts[0].relative, PathBuf::from("posts/a.md"));
    }
}
