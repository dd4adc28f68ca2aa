//! Asset processing (copy or minify one route to its output path).

use std::fs;

use anyhow::{Context, Result};

use crate::config::SiteConfig;
use crate::debug;
use crate::freshness::is_newer_than;
use crate::minify;

use super::AssetRoute;

/// Process one asset route. Returns `true` when the output was written,
/// `false` when it was already up to date.
///
/// CSS and JS sources are minified when `minify_assets` is set, each under
/// its `[minify]` failure policy. Pre-minified files (`*.min.css`,
/// `*.min.js`) and every other extension are copied verbatim.
pub fn process_route(route: &AssetRoute, config: &SiteConfig, minify_assets: bool) -> Result<bool> {
    // Unchanged sources keep their existing output unless --clean asked
    // for a full rebuild.
    if !config.build.clean && route.output.exists() && !is_newer_than(&route.source, &route.output)
    {
        return Ok(false);
    }

    if let Some(parent) = route.output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory '{}'", parent.display()))?;
    }

    let ext = route
        .source
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    match ext {
        "css" if minify_assets && !minify::is_preminified(&route.source) => {
            let text = read_source(route)?;
            let out = minify::with_policy(
                minify::minify_css(&text),
                &text,
                config.minify.css,
                &route.url,
            )?;
            write_output(route, out.as_bytes())?;
        }
        "js" if minify_assets && !minify::is_preminified(&route.source) => {
            let text = read_source(route)?;
            let out = minify::with_policy(
                minify::minify_js(&text),
                &text,
                config.minify.js,
                &route.url,
            )?;
            write_output(route, out.as_bytes())?;
        }
        _ => {
            fs::copy(&route.source, &route.output)
                .with_context(|| format!("failed to copy asset '{}'", route.source.display()))?;
        }
    }

    debug!("assets"; "{}", route.url);
    Ok(true)
}

fn read_source(route: &AssetRoute) -> Result<String> {
    fs::read_to_string(&route.source)
        .with_context(|| format!("failed to read asset '{}'", route.source.display()))
}

fn write_output(route: &AssetRoute, bytes: &[u8]) -> Result<()> {
    fs::write(&route.output, bytes)
        .with_context(|| format!("failed to write asset '{}'", route.output.display()))
}
