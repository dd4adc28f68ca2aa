//! Per-build image variant generation with memoization.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result, bail};
use dashmap::DashMap;
use image::ImageReader;

use crate::config::{ImageFormat, SiteConfig};
use crate::image::variant::{self, Variant, VariantSet};
use crate::utils::{hash, plural_s};
use crate::{debug, freshness};

/// Generates responsive image variants and caches them for one build.
///
/// Keyed by source path and emit directory, so repeated shortcode calls for
/// the same image reuse the first call's variants instead of re-encoding.
/// Two threads racing on the same key both generate; variant files are
/// fingerprinted, so the overlapping writes carry identical bytes.
#[derive(Debug, Default)]
pub struct ImageService {
    memo: DashMap<(PathBuf, PathBuf), Arc<VariantSet>>,
    encoded: AtomicUsize,
}

impl ImageService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of variant files encoded so far. Fresh on-disk variants are
    /// skipped and do not count.
    pub fn encoded_count(&self) -> usize {
        self.encoded.load(Ordering::Relaxed)
    }

    /// Number of distinct source images processed.
    pub fn source_count(&self) -> usize {
        self.memo.len()
    }

    /// Return the variant set for `source`, generating missing or stale
    /// variant files under `emit_dir` with URLs rooted at `url_base`.
    pub fn variants(
        &self,
        source: &Path,
        emit_dir: &Path,
        url_base: &str,
        config: &SiteConfig,
    ) -> Result<Arc<VariantSet>> {
        let key = (source.to_path_buf(), emit_dir.to_path_buf());
        if let Some(hit) = self.memo.get(&key) {
            return Ok(Arc::clone(&hit));
        }

        let set = Arc::new(self.generate(source, emit_dir, url_base, config)?);
        self.memo.insert(key, Arc::clone(&set));
        Ok(set)
    }

    fn generate(
        &self,
        source: &Path,
        emit_dir: &Path,
        url_base: &str,
        config: &SiteConfig,
    ) -> Result<VariantSet> {
        let bytes = fs::read(source)
            .with_context(|| format!("failed to read image '{}'", source.display()))?;
        let fingerprint = hash::fingerprint(&bytes);

        // Header probe only; full decode happens just when a variant is stale.
        let (src_w, src_h) = ImageReader::new(Cursor::new(bytes.as_slice()))
            .with_guessed_format()?
            .into_dimensions()
            .with_context(|| format!("unrecognized image format in '{}'", source.display()))?;
        if src_w == 0 || src_h == 0 {
            bail!("image '{}' has zero size", source.display());
        }

        let stem = source.file_stem().and_then(|s| s.to_str()).unwrap_or("image");
        let url_base = url_base.trim_end_matches('/');
        let source_mtime = freshness::get_mtime(source);
        let skip_fresh = !config.build.clean;

        // Requested widths above the source width collapse to the source width.
        let mut widths: Vec<u32> = config.images.widths.iter().map(|&w| w.min(src_w)).collect();
        widths.sort_unstable();
        widths.dedup();

        let mut stale: Vec<(ImageFormat, u32, PathBuf)> = Vec::new();
        let mut formats = Vec::with_capacity(config.images.formats.len());

        for &format in &config.images.formats {
            let mut variants = Vec::with_capacity(widths.len());
            for &width in &widths {
                let name = format!("{stem}-{fingerprint}-{width}.{}", format.ext());
                let dest = emit_dir.join(&name);

                if !(skip_fresh && freshness::is_output_fresh(&dest, source_mtime)) {
                    stale.push((format, width, dest));
                }

                variants.push(Variant {
                    url: format!("{url_base}/{name}"),
                    width,
                    height: variant::scaled_height(src_w, src_h, width),
                });
            }
            formats.push((format, variants));
        }

        if stale.is_empty() {
            debug!("image"; "'{stem}' is up to date");
            return Ok(VariantSet { formats });
        }

        let img = image::load_from_memory(&bytes)
            .with_context(|| format!("failed to decode image '{}'", source.display()))?;

        for (format, width, dest) in &stale {
            variant::encode(&img, *width, *format, config.images.quality, dest)
                .with_context(|| format!("failed to encode '{}'", dest.display()))?;
        }

        self.encoded.fetch_add(stale.len(), Ordering::Relaxed);
        debug!("image"; "encoded {} variant{} for '{stem}'", stale.len(), plural_s(stale.len()));

        Ok(VariantSet { formats })
    }
}
