//! Build orchestration.
//!
//! Runs the stage graph end to end: Scan -> Collect -> (Render ∥ Assets)
//! -> Generate. Render and Assets share a rayon join; the graph
//! guarantees collections are complete before the first page renders.

use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

use anyhow::{Context as _, Result, anyhow};
use parking_lot::Mutex;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tera::Context;

use crate::asset::{self, AssetRoute};
use crate::config::SiteConfig;
use crate::content::{Document, collections, scan_documents};
use crate::core::{BuildMode, is_shutdown};
use crate::generator;
use crate::image::ImageService;
use crate::log;
use crate::logger::ProgressLine;
use crate::render::{Registry, RenderedPage, render_page};
use crate::utils::plural_s;

use super::stage;

/// What a build produced, for the final log line and the watch loop.
#[derive(Debug)]
pub struct BuildSummary {
    pub pages: usize,
    pub assets_written: usize,
    pub images_encoded: usize,
}

/// Run a full site build.
pub fn build_site(mode: BuildMode, config: &Arc<SiteConfig>, quiet: bool) -> Result<BuildSummary> {
    stage::validate()?;

    let started = Instant::now();
    let minify = mode.effective_minify(config.build.minify);

    prepare_output(config)?;

    // Scan
    let documents = scan_documents(config)?;

    // Collect
    let tags = collections::tag_list(&documents);
    let posts = collections::posts(&documents, &config.build.posts)?;

    let images = Arc::new(ImageService::new());
    let registry = Registry::new(config, &images, &documents)?;
    let base_ctx = base_context(config, &tags, &posts);

    let routes = asset::scan_all(config);
    let progress = (!quiet)
        .then(|| ProgressLine::new(&[("pages", documents.len()), ("assets", routes.len())]));

    // Render ∥ Assets
    let errors = ErrorFlag::default();
    let (render_result, assets_result) = rayon::join(
        || {
            render_pages(
                &documents,
                &registry,
                &base_ctx,
                config,
                minify,
                progress.as_ref(),
                &errors,
            )
        },
        || process_assets(&routes, config, minify, progress.as_ref(), &errors),
    );

    if let Some(e) = errors.into_error() {
        return Err(e);
    }
    let pages = render_result?;
    let assets_written = assets_result?;

    if let Some(p) = progress {
        p.finish();
    }

    // Generate
    if !mode.is_dev() {
        let post_pages = select_post_pages(&pages, &posts);
        generator::build_feed(&post_pages, config, minify)?;
        generator::build_sitemap(&pages, config, minify)?;
    }

    let summary = BuildSummary {
        pages: pages.len(),
        assets_written,
        images_encoded: images.encoded_count(),
    };

    if !quiet {
        if summary.pages == 0 {
            log!(
                "warning";
                "no pages rendered, check if '{}' has .md or .html files",
                config.build.content.display()
            );
        }
        log_summary(&summary, started);
    }

    Ok(summary)
}

/// Reset (with --clean) or create the output directory.
fn prepare_output(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;
    if config.build.clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("failed to clear output directory '{}'", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("failed to create output directory '{}'", output.display()))?;
    Ok(())
}

/// Context shared by every page: `site`, `tags` and `posts`.
fn base_context(config: &SiteConfig, tags: &[String], posts: &[&Document]) -> Context {
    let mut ctx = Context::new();
    ctx.insert(
        "site",
        &serde_json::json!({
            "title": config.site.title,
            "description": config.site.description,
            "author": config.site.author,
            "language": config.site.language,
            "url": config.site.url,
            "extra": config.site.extra,
        }),
    );
    ctx.insert("tags", tags);

    let post_list: Vec<_> = posts
        .iter()
        .map(|doc| crate::render::page::post_context(doc, config))
        .collect();
    ctx.insert("posts", &post_list);
    ctx
}

/// First-error capture shared by the parallel stages.
///
/// Workers abort once any of them trips the flag; only the first error
/// survives to the caller, the rest are follow-on noise.
#[derive(Default)]
struct ErrorFlag {
    tripped: AtomicBool,
    first: Mutex<Option<anyhow::Error>>,
}

impl ErrorFlag {
    fn record(&self, e: anyhow::Error) {
        if !self.tripped.swap(true, Ordering::Relaxed) {
            *self.first.lock() = Some(e);
        }
    }

    fn is_tripped(&self) -> bool {
        self.tripped.load(Ordering::Relaxed)
    }

    fn into_error(self) -> Option<anyhow::Error> {
        self.first.into_inner()
    }
}

/// Render every document in parallel, preserving document order.
fn render_pages(
    documents: &[Document],
    registry: &Registry,
    base_ctx: &Context,
    config: &SiteConfig,
    minify: bool,
    progress: Option<&ProgressLine>,
    errors: &ErrorFlag,
) -> Result<Vec<RenderedPage>> {
    documents
        .par_iter()
        .map(|doc| {
            if is_shutdown() || errors.is_tripped() {
                return Err(anyhow!("aborted"));
            }
            match render_page(doc, registry, base_ctx, config, minify) {
                Ok(page) => {
                    if let Some(p) = progress {
                        p.inc("pages");
                    }
                    Ok(page)
                }
                Err(e) => {
                    errors.record(e);
                    Err(anyhow!("render failed"))
                }
            }
        })
        .collect()
}

/// Copy or minify every asset route in parallel. Returns how many were
/// actually written (fresh ones are skipped).
fn process_assets(
    routes: &[AssetRoute],
    config: &SiteConfig,
    minify_assets: bool,
    progress: Option<&ProgressLine>,
    errors: &ErrorFlag,
) -> Result<usize> {
    let written = AtomicUsize::new(0);

    routes.par_iter().try_for_each(|route| {
        if is_shutdown() || errors.is_tripped() {
            return Err(anyhow!("aborted"));
        }
        match asset::process_route(route, config, minify_assets) {
            Ok(wrote) => {
                if wrote {
                    written.fetch_add(1, Ordering::Relaxed);
                }
                if let Some(p) = progress {
                    p.inc("assets");
                }
                Ok(())
            }
            Err(e) => {
                errors.record(e);
                Err(anyhow!("asset processing failed"))
            }
        }
    })?;

    Ok(written.into_inner())
}

/// Pair each post with its rendered page by permalink.
fn select_post_pages<'a>(pages: &'a [RenderedPage], posts: &[&Document]) -> Vec<&'a RenderedPage> {
    let by_permalink: FxHashMap<&str, &RenderedPage> =
        pages.iter().map(|p| (p.permalink.as_str(), p)).collect();

    posts
        .iter()
        .filter_map(|post| by_permalink.get(post.permalink.as_str()).copied())
        .collect()
}

fn log_summary(summary: &BuildSummary, started: Instant) {
    let mut parts = vec![format!("{} page{}", summary.pages, plural_s(summary.pages))];
    if summary.assets_written > 0 {
        parts.push(format!(
            "{} asset{}",
            summary.assets_written,
            plural_s(summary.assets_written)
        ));
    }
    if summary.images_encoded > 0 {
        parts.push(format!(
            "{} image variant{}",
            summary.images_encoded,
            plural_s(summary.images_encoded)
        ));
    }
    log!("build"; "{} in {:.2?}", parts.join(", "), started.elapsed());
}
