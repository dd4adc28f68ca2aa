//! Site initialization: scaffold a new project from the embedded starter.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::config::SiteConfig;
use crate::embed::{CONFIG_TEMPLATE, STARTER_FILES, TITLE_PLACEHOLDER};
use crate::log;
use crate::utils::slug::deslugify;

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Create a new site from the embedded starter.
///
/// `has_name` is true when the user passed a directory name; init into the
/// current directory is only allowed when it is empty.
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    if !has_name && !is_dir_empty(root)? {
        bail!(
            "current directory is not empty, use `quill init <SITE_NAME>` to create a subdirectory"
        );
    }
    if config.config_path.exists() {
        bail!(
            "'{}' already exists, refusing to overwrite",
            config.config_path.display()
        );
    }

    let title = site_title(root);
    write_new(root, Path::new("quill.toml"), &CONFIG_TEMPLATE.replace(TITLE_PLACEHOLDER, &title))?;
    for file in STARTER_FILES {
        write_new(root, Path::new(file.path), file.content)?;
    }
    // Shared originals for the image shortcode live here.
    fs::create_dir_all(root.join("images"))?;
    init_ignored_files(root, "public/")?;

    log!("init"; "created site '{title}' in {}", root.display());
    if has_name {
        let dir = root.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        log!("init"; "next: cd {dir} && quill serve");
    } else {
        log!("init"; "next: quill serve");
    }
    Ok(())
}

/// Derive the site title from the directory name: `my-blog` becomes `My Blog`.
fn site_title(root: &Path) -> String {
    root.file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .map(deslugify)
        .unwrap_or_else(|| "My Blog".to_string())
}

/// Check if a directory is missing or completely empty.
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write one starter file, refusing to clobber anything already there.
fn write_new(root: &Path, rel: &Path, content: &str) -> Result<()> {
    let path = root.join(rel);
    if path.exists() {
        bail!("'{}' already exists, refusing to overwrite", path.display());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Initialize .gitignore and .ignore with the output directory.
fn init_ignored_files(root: &Path, output: &str) -> Result<()> {
    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, output)?;
        }
    }
    Ok(())
}
