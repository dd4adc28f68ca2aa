//! Content directory scanning.

use std::path::{Path, PathBuf};

use anyhow::Result;
use jwalk::WalkDir;
use rayon::prelude::*;

use crate::config::SiteConfig;
use crate::core::ContentKind;
use crate::utils::plural_s;
use crate::{debug, log};

use super::Document;

const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Scan the content root and read every page source.
///
/// Results are sorted by source path before reading, so every
/// derivation downstream (collections, feeds, srcsets) sees the same
/// order on every build. Drafts are dropped unless `--drafts` is set.
pub fn scan_documents(config: &SiteConfig) -> Result<Vec<Document>> {
    let content_dir = &config.build.content;

    let mut files: Vec<PathBuf> = WalkDir::new(content_dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(|e| e.path())
        .filter(|p| !is_hidden(p, content_dir))
        .filter(|p| ContentKind::is_content_file(p))
        .collect();

    files.sort();

    let documents: Vec<Document> = files
        .par_iter()
        .map(|path| Document::read(path, config))
        .collect::<Result<_>>()?;

    let total = documents.len();
    let documents: Vec<Document> = if config.build.drafts {
        let draft_count = documents.iter().filter(|d| d.meta.draft).count();
        if draft_count > 0 {
            debug!("content"; "including {} draft{}", draft_count, plural_s(draft_count));
        }
        documents
    } else {
        documents.into_iter().filter(|d| !d.meta.draft).collect()
    };

    let skipped = total - documents.len();
    if skipped > 0 {
        log!("content"; "skipped {} draft{}", skipped, plural_s(skipped));
    }

    Ok(documents)
}

/// True when any component under `root` starts with a dot.
fn is_hidden(path: &Path, root: &Path) -> bool {
    path.strip_prefix(root)
        .unwrap_or(path)
        .iter()
        .filter_map(|c| c.to_str())
        .any(|c| c.starts_with('.'))
}
