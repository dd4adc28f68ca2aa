//! Development server: initial build, static file serving, file watching.
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │   Main Thread   │     │  Watcher Thread  │
//! │  (HTTP Server)  │     │  (File Monitor)  │
//! └────────┬────────┘     └────────┬─────────┘
//!          │                       │
//!          ▼                       ▼
//!    Serve files from        Debounce changes,
//!    config.build.output     rebuild the site
//! ```
//!
//! The server blocks the main thread until Ctrl+C; the global shutdown
//! handler unblocks the accept loop for a clean exit.

mod server;
mod watch;

use std::sync::Arc;

use anyhow::Result;

use crate::config::{SiteConfig, clear_clean_flag};
use crate::core::BuildMode;
use crate::log;
use crate::pipeline;

/// Build once, then serve the output directory and watch for changes.
pub fn serve_site(config: &Arc<SiteConfig>) -> Result<()> {
    // A failing initial build keeps the server up; the watcher rebuilds
    // once the site is fixed.
    if let Err(e) = pipeline::build_site(BuildMode::DEVELOPMENT, config, false) {
        log!("build"; "initial build failed: {e:#}");
    }

    // Later watch rebuilds must not wipe the output dir again.
    clear_clean_flag();

    if config.serve.watch {
        std::thread::spawn(|| {
            if let Err(e) = watch::watch_for_changes_blocking() {
                log!("watch"; "{e:#}");
            }
        });
    }

    server::run()
}
