//! Quill - a static site generator for markdown blogs.

mod asset;
mod cli;
mod config;
mod content;
mod core;
mod embed;
mod freshness;
mod generator;
mod image;
mod logger;
mod minify;
mod pipeline;
mod render;
mod serve;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{SiteConfig, init_config};
use core::BuildMode;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = init_config(SiteConfig::load(cli)?);

    match &cli.command {
        Commands::Init { name } => cli::init::new_site(&config, name.is_some()),
        Commands::Build { .. } => {
            pipeline::build_site(BuildMode::PRODUCTION, &config, false).map(|_| ())
        }
        Commands::Serve { .. } => serve::serve_site(&config),
    }
}
