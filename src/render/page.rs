//! Single page rendering: body template, markdown, layout, output transform.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tera::Context;

use crate::config::SiteConfig;
use crate::content::Document;
use crate::core::ContentKind;
use crate::minify;
use crate::render::current::{self, PageScope};
use crate::render::markdown;
use crate::render::registry::Registry;
use crate::utils::date::DateTimeUtc;

/// A page that has been rendered and written to the output tree.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub permalink: String,
    pub output_file: PathBuf,
    /// Front matter title; untitled pages stay out of the feed.
    pub title: Option<String>,
    pub date: Option<DateTimeUtc>,
    pub updated: Option<DateTimeUtc>,
    pub summary: Option<String>,
    pub author: Option<String>,
    /// Content HTML before layout wrapping; feeds the feed generator.
    pub html: String,
}

/// Render one document and write its artifact.
///
/// The body goes through tera first (filters and shortcodes run in page
/// content), then markdown conversion for `.md` sources, then the layout,
/// then the output transform.
pub fn render_page(
    doc: &Document,
    registry: &Registry,
    base_ctx: &Context,
    config: &SiteConfig,
    minify_output: bool,
) -> Result<RenderedPage> {
    let scope = PageScope {
        source_dir: doc.source.parent().unwrap_or(Path::new("")).to_path_buf(),
        output_dir: doc.output_dir.clone(),
        url_base: doc.permalink.clone(),
    };

    current::with_page(scope, || {
        let mut ctx = base_ctx.clone();
        ctx.insert("page", &page_context(doc, config));

        let body = registry.render_body(doc, &ctx)?;
        let html = match doc.kind {
            ContentKind::Markdown => markdown::to_html(&body),
            ContentKind::Html => body,
        };

        ctx.insert("content", &html);
        let full = registry.render_layout(doc, &ctx)?;
        let full = minify::transform(full, &doc.output_file, minify_output, config.minify.html)?;

        fs::create_dir_all(&doc.output_dir)
            .with_context(|| format!("failed to create '{}'", doc.output_dir.display()))?;
        fs::write(&doc.output_file, &full)
            .with_context(|| format!("failed to write '{}'", doc.output_file.display()))?;

        Ok(RenderedPage {
            permalink: doc.permalink.clone(),
            output_file: doc.output_file.clone(),
            title: doc.meta.title.clone(),
            date: doc.meta.date.as_deref().and_then(DateTimeUtc::parse),
            updated: doc.meta.updated.as_deref().and_then(DateTimeUtc::parse),
            summary: doc.meta.summary.clone(),
            author: doc.meta.author.clone(),
            html,
        })
    })
}

/// The `page` object visible to templates.
fn page_context(doc: &Document, config: &SiteConfig) -> serde_json::Value {
    serde_json::json!({
        "title": doc.title(),
        "summary": doc.meta.summary,
        "date": doc.meta.date,
        "updated": doc.meta.updated,
        "author": doc.meta.author,
        "tags": doc.meta.tags,
        "draft": doc.meta.draft,
        "extra": doc.meta.extra,
        "permalink": doc.permalink,
        "url": doc.full_url(config.site.base_url().unwrap_or_default()),
    })
}

/// The summary of one post as list templates see it.
pub fn post_context(doc: &Document, config: &SiteConfig) -> serde_json::Value {
    serde_json::json!({
        "title": doc.title(),
        "permalink": doc.permalink,
        "url": doc.full_url(config.site.base_url().unwrap_or_default()),
        "date": doc.meta.date,
        "summary": doc.meta.summary,
        "tags": doc.meta.tags,
    })
}
