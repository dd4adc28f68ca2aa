//! File system watcher: debounced change detection and rebuilds.
//!
//! Content, template and static asset changes trigger a development
//! rebuild; a config change reloads `quill.toml` first. Rebuild failures
//! are reported on the status line and the server stays up.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;

use crate::config::{SiteConfig, cfg, reload_config};
use crate::core::{BuildMode, FileCategory, categorize_path, is_shutdown};
use crate::log;
use crate::logger::{status_error, status_success};
use crate::pipeline;

const DEBOUNCE_MS: u64 = 300;
const REBUILD_COOLDOWN_MS: u64 = 800;

const WATCH_CATEGORIES: &[FileCategory] = &[
    FileCategory::Content,
    FileCategory::Asset,
    FileCategory::Template,
    FileCategory::Config,
];

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Format path as relative to the site root for log display.
fn rel_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events with debouncing and rebuild cooldown.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    last_rebuild: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
            last_rebuild: None,
        }
    }

    fn in_cooldown(&self) -> bool {
        self.last_rebuild
            .is_some_and(|t| t.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS))
    }

    fn add(&mut self, event: Event) {
        for path in event.paths {
            if !is_temp_file(&path) {
                self.pending.insert(path);
            }
        }
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn mark_rebuild(&mut self) {
        self.last_rebuild = Some(Instant::now());
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

// =============================================================================
// Event Handler
// =============================================================================

/// Process changed paths. Returns true if a rebuild ran (for cooldown).
fn handle_changes(paths: &[PathBuf]) -> bool {
    let config = cfg();
    let root = config.get_root().to_path_buf();

    let mut config_changed = false;
    let mut triggers: Vec<String> = Vec::new();

    for path in paths {
        match categorize_path(path, &config) {
            FileCategory::Config => config_changed = true,
            FileCategory::Content | FileCategory::Asset | FileCategory::Template => {
                triggers.push(rel_path(path, &root));
            }
            FileCategory::Unknown => {}
        }
    }

    if !config_changed && triggers.is_empty() {
        return false;
    }

    if config_changed {
        match reload_config() {
            Ok(true) => triggers.insert(0, "quill.toml".to_string()),
            // Content hash unchanged (touch, attribute-only write)
            Ok(false) => {}
            Err(e) => {
                status_error("config reload failed", &format!("{e:#}"));
                return false;
            }
        }
        if triggers.is_empty() {
            return false;
        }
    }

    rebuild(&triggers)
}

/// Run a development rebuild, reporting the outcome on the status line.
fn rebuild(triggers: &[String]) -> bool {
    let started = Instant::now();
    let trigger = summarize_triggers(triggers);

    match pipeline::build_site(BuildMode::DEVELOPMENT, &cfg(), true) {
        Ok(summary) => {
            status_success(&format!(
                "rebuilt {} page{} in {:.2?} ({trigger})",
                summary.pages,
                crate::utils::plural_s(summary.pages),
                started.elapsed(),
            ));
            true
        }
        Err(e) => {
            status_error(&format!("build failed ({trigger})"), &format!("{e:#}"));
            // Failed builds still cool down, otherwise a broken save loops
            true
        }
    }
}

/// First trigger plus a count when several files changed at once.
fn summarize_triggers(triggers: &[String]) -> String {
    match triggers {
        [] => String::new(),
        [single] => single.clone(),
        [first, rest @ ..] => format!("{first} +{}", rest.len()),
    }
}

// =============================================================================
// Watcher Setup
// =============================================================================

fn setup_watchers(watcher: &mut impl Watcher, config: &SiteConfig) -> Result<()> {
    let root = config.get_root();
    let mut watched: Vec<String> = Vec::new();

    for &cat in WATCH_CATEGORIES {
        let mode = if cat.is_directory() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };

        for path in cat.paths(config) {
            if !path.exists() {
                continue;
            }
            watcher
                .watch(&path, mode)
                .with_context(|| format!("failed to watch {}: {}", cat.name(), path.display()))?;
            let suffix = if cat.is_directory() { "/" } else { "" };
            watched.push(format!("{}{suffix}", rel_path(&path, root)));
        }
    }

    log!("watch"; "{}", watched.join(", "));
    Ok(())
}

const fn is_relevant(event: &Event) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
}

// =============================================================================
// Public API
// =============================================================================

/// Start blocking file watcher with debouncing and live rebuild.
pub fn watch_for_changes_blocking() -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("failed to create file watcher")?;
    setup_watchers(&mut watcher, &cfg())?;

    let mut debouncer = Debouncer::new();

    loop {
        if is_shutdown() {
            break;
        }
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) && !debouncer.in_cooldown() => {
                debouncer.add(event);
            }
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) if debouncer.ready() => {
                if handle_changes(&debouncer.take()) {
                    debouncer.mark_rebuild();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
            // Irrelevant events, timeout without pending work
            _ => {}
        }
    }

    Ok(())
}
