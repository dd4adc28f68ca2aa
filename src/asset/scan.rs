//! Asset scanning functions (pure, no side effects).

use std::path::Path;

use crate::config::SiteConfig;
use crate::core::ContentKind;

use super::{AssetKind, AssetRoute};

/// Scan every configured asset location.
///
/// Combines nested directories, flatten entries and content-adjacent files
/// into one route list, sorted by source path for deterministic processing
/// order.
pub fn scan_all(config: &SiteConfig) -> Vec<AssetRoute> {
    let mut routes = scan_global_assets(config);
    routes.extend(scan_flatten_assets(config));
    routes.extend(scan_content_assets(config));
    routes.sort_by(|a, b| a.source.cmp(&b.source));
    routes
}

/// Scan the configured nested asset directories.
///
/// Each entry keeps its directory structure under the output root, using the
/// entry's output name as prefix. Sources claimed by a flatten entry are
/// skipped here; they only output to the root.
pub fn scan_global_assets(config: &SiteConfig) -> Vec<AssetRoute> {
    let output_root = &config.build.output;
    let assets_config = &config.build.assets;
    let mut results = Vec::new();

    for entry in &assets_config.nested {
        let assets_dir = entry.source();
        if !assets_dir.exists() {
            continue;
        }

        let prefix = entry.output_name();
        scan_global_recursive(
            &mut results,
            assets_dir,
            assets_dir,
            output_root,
            prefix,
            assets_config,
        );
    }

    results
}

/// Recursive helper for scanning one nested directory.
fn scan_global_recursive(
    results: &mut Vec<AssetRoute>,
    dir: &Path,
    base: &Path,
    output_root: &Path,
    prefix: &str,
    assets_config: &crate::config::AssetsConfig,
) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            scan_global_recursive(results, &path, base, output_root, prefix, assets_config);
        } else {
            if assets_config.is_flatten(&path) {
                continue;
            }

            let rel = path.strip_prefix(base).unwrap_or(&path);
            let url = format!("/{}/{}", prefix, rel.display());
            let output = output_root.join(prefix).join(rel);

            results.push(AssetRoute {
                source: path,
                url,
                output,
                kind: AssetKind::Global,
            });
        }
    }
}

/// Scan flatten assets (individual files copied to the output root).
///
/// # Example
///
/// ```toml
/// [build.assets]
/// flatten = [
///     "robots.txt",                                   # -> output/robots.txt
///     { file = "icons/fav.ico", as = "favicon.ico" }, # -> output/favicon.ico
/// ]
/// ```
pub fn scan_flatten_assets(config: &SiteConfig) -> Vec<AssetRoute> {
    let output_root = &config.build.output;
    let mut results = Vec::new();

    for entry in &config.build.assets.flatten {
        let source = entry.source();
        if !source.exists() {
            continue;
        }

        let output_name = entry.output_name();
        let url = format!("/{output_name}");
        let output = output_root.join(output_name);

        results.push(AssetRoute {
            source: source.to_path_buf(),
            url,
            output,
            kind: AssetKind::Global,
        });
    }

    results
}

/// Scan content-adjacent assets (non-page files in the content directory).
///
/// ```text
/// content/
/// ├── index.md            -> (page, skipped)
/// ├── about.md            -> (page, skipped)
/// └── posts/
///     ├── hello.md        -> (page, skipped)
///     └── hello-notes.pdf -> /posts/hello-notes.pdf
/// ```
pub fn scan_content_assets(config: &SiteConfig) -> Vec<AssetRoute> {
    let content_dir = &config.build.content;
    let output_root = &config.build.output;

    if !content_dir.exists() {
        return vec![];
    }

    let mut results = Vec::new();
    scan_content_recursive(&mut results, content_dir, content_dir, output_root);
    results
}

/// Recursive helper for scanning content assets.
fn scan_content_recursive(
    results: &mut Vec<AssetRoute>,
    dir: &Path,
    content_root: &Path,
    output_root: &Path,
) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.is_dir() {
            scan_content_recursive(results, &path, content_root, output_root);
        } else {
            // Pages are rendered, not copied.
            if ContentKind::from_path(&path).is_some() {
                continue;
            }

            let rel_path = path.strip_prefix(content_root).unwrap_or(&path);
            let url = format!("/{}", rel_path.display());
            let output = output_root.join(rel_path);

            results.push(AssetRoute {
                source: path,
                url,
                output,
                kind: AssetKind::Content,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::config::{FlattenEntry, NestedEntry};

    #[test]
    fn test_scan_global_empty() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.build.assets.nested = vec![NestedEntry::simple(dir.path().join("nonexistent"))];

        let assets = scan_global_assets(&config);
        assert!(assets.is_empty());
    }

    #[test]
    fn test_scan_global_simple() {
        let dir = TempDir::new().unwrap();

        let assets_dir = dir.path().join("static");
        fs::create_dir_all(&assets_dir).unwrap();
        fs::write(assets_dir.join("logo.png"), "fake png").unwrap();
        fs::write(assets_dir.join("style.css"), "body {}").unwrap();

        let mut config = SiteConfig::default();
        config.build.assets.nested = vec![NestedEntry::simple(assets_dir)];
        config.build.output = dir.path().join("public");

        let assets = scan_global_assets(&config);

        assert_eq!(assets.len(), 2);
        assert!(assets.iter().any(|a| a.url == "/static/logo.png"));
        assert!(assets.iter().any(|a| a.url == "/static/style.css"));
        assert!(assets.iter().all(|a| a.kind == AssetKind::Global));
    }

    #[test]
    fn test_scan_global_nested_dirs() {
        let dir = TempDir::new().unwrap();

        let assets_dir = dir.path().join("static");
        let images_dir = assets_dir.join("images");
        fs::create_dir_all(&images_dir).unwrap();
        fs::write(assets_dir.join("logo.png"), "fake png").unwrap();
        fs::write(images_dir.join("photo.jpg"), "fake jpg").unwrap();

        let mut config = SiteConfig::default();
        config.build.assets.nested = vec![NestedEntry::simple(assets_dir)];
        config.build.output = dir.path().join("public");

        let assets = scan_global_assets(&config);

        assert_eq!(assets.len(), 2);
        assert!(assets.iter().any(|a| a.url == "/static/images/photo.jpg"));
        assert!(
            assets
                .iter()
                .any(|a| a.output == dir.path().join("public/static/images/photo.jpg"))
        );
    }

    #[test]
    fn test_scan_global_renamed_output() {
        let dir = TempDir::new().unwrap();

        let assets_dir = dir.path().join("files");
        fs::create_dir_all(&assets_dir).unwrap();
        fs::write(assets_dir.join("doc.pdf"), "pdf").unwrap();

        let mut config = SiteConfig::default();
        config.build.assets.nested = vec![NestedEntry::with_as(assets_dir, "downloads")];
        config.build.output = dir.path().join("public");

        let assets = scan_global_assets(&config);

        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].url, "/downloads/doc.pdf");
        assert_eq!(assets[0].output, dir.path().join("public/downloads/doc.pdf"));
    }

    #[test]
    fn test_scan_flatten_simple() {
        let dir = TempDir::new().unwrap();

        fs::write(dir.path().join("robots.txt"), "User-agent: *").unwrap();

        let mut config = SiteConfig::default();
        config.build.assets.flatten = vec![FlattenEntry::simple(dir.path().join("robots.txt"))];
        config.build.output = dir.path().join("public");

        let assets = scan_flatten_assets(&config);

        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].url, "/robots.txt");
        assert_eq!(assets[0].output, dir.path().join("public/robots.txt"));
    }

    #[test]
    fn test_scan_flatten_with_as() {
        let dir = TempDir::new().unwrap();

        let icons_dir = dir.path().join("icons");
        fs::create_dir_all(&icons_dir).unwrap();
        fs::write(icons_dir.join("fav.ico"), "icon data").unwrap();

        let mut config = SiteConfig::default();
        config.build.assets.flatten =
            vec![FlattenEntry::with_as(icons_dir.join("fav.ico"), "favicon.ico")];
        config.build.output = dir.path().join("public");

        let assets = scan_flatten_assets(&config);

        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].url, "/favicon.ico");
        assert_eq!(assets[0].output, dir.path().join("public/favicon.ico"));
    }

    #[test]
    fn test_scan_flatten_nonexistent_skipped() {
        let dir = TempDir::new().unwrap();

        let mut config = SiteConfig::default();
        config.build.assets.flatten =
            vec![FlattenEntry::simple(dir.path().join("does_not_exist.txt"))];
        config.build.output = dir.path().join("public");

        assert!(scan_flatten_assets(&config).is_empty());
    }

    #[test]
    fn test_scan_global_skips_flatten_sources() {
        let dir = TempDir::new().unwrap();

        let assets_dir = dir.path().join("static");
        fs::create_dir_all(&assets_dir).unwrap();
        fs::write(assets_dir.join("logo.png"), "fake png").unwrap();
        fs::write(assets_dir.join("robots.txt"), "User-agent: *").unwrap();

        let mut config = SiteConfig::default();
        config.build.assets.nested = vec![NestedEntry::simple(assets_dir.clone())];
        config.build.assets.flatten =
            vec![FlattenEntry::simple(assets_dir.join("robots.txt"))];
        config.build.output = dir.path().join("public");

        let global = scan_global_assets(&config);
        assert_eq!(global.len(), 1);
        assert_eq!(global[0].url, "/static/logo.png");

        let flatten = scan_flatten_assets(&config);
        assert_eq!(flatten.len(), 1);
        assert_eq!(flatten[0].url, "/robots.txt");
    }

    #[test]
    fn test_scan_content_assets_skip_pages() {
        let dir = TempDir::new().unwrap();

        let content = dir.path().join("content");
        let posts = content.join("posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(content.join("index.md"), "# Home").unwrap();
        fs::write(posts.join("hello.md"), "# Hello").unwrap();
        fs::write(posts.join("hello-notes.pdf"), "pdf data").unwrap();

        let mut config = SiteConfig::default();
        config.build.content = content;
        config.build.output = dir.path().join("public");

        let assets = scan_content_assets(&config);

        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].url, "/posts/hello-notes.pdf");
        assert_eq!(assets[0].kind, AssetKind::Content);
    }

    #[test]
    fn test_scan_all_is_sorted_by_source() {
        let dir = TempDir::new().unwrap();

        let assets_dir = dir.path().join("static");
        fs::create_dir_all(&assets_dir).unwrap();
        fs::write(assets_dir.join("b.txt"), "b").unwrap();
        fs::write(assets_dir.join("a.txt"), "a").unwrap();

        let mut config = SiteConfig::default();
        config.build.assets.nested = vec![NestedEntry::simple(assets_dir)];
        config.build.output = dir.path().join("public");

        let sources: Vec<_> = scan_all(&config).into_iter().map(|r| r.source).collect();
        let mut sorted = sources.clone();
        sorted.sort();
        assert_eq!(sources, sorted);
    }
}
