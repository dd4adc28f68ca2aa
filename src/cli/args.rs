//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Quill static site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path (default: quill.toml)
    #[arg(short = 'C', long, default_value = "quill.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new site from the starter template
    #[command(visible_alias = "i")]
    Init {
        /// Site directory name/path (relative to current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        name: Option<PathBuf>,
    },

    /// Build the site for production
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Start development server with file watching
    #[command(visible_alias = "s")]
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Disable file watching (serve the last build as-is)
        #[arg(long)]
        no_watch: bool,
    },
}

/// Shared build arguments for Build and Serve commands
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Clean output directory completely before building
    #[arg(long)]
    pub clean: bool,

    /// Minify emitted HTML/CSS/JS (defaults on for build, off for serve)
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Include draft pages in the build
    #[arg(short, long)]
    pub drafts: bool,

    /// Override site URL for deployment.
    ///
    /// Useful for CI deployments where the production URL differs from the
    /// one in quill.toml, keeping the source file clean.
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

#[allow(unused)]
impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_defaults() {
        let cli = parse(&["quill", "build"]);
        assert!(cli.is_build());
        assert_eq!(cli.config, PathBuf::from("quill.toml"));

        let Commands::Build { build_args } = &cli.command else {
            panic!("expected build");
        };
        assert!(!build_args.clean);
        assert_eq!(build_args.minify, None);
        assert!(!build_args.drafts);
    }

    #[test]
    fn test_minify_flag_forms() {
        let Commands::Build { build_args } = parse(&["quill", "build", "-m"]).command else {
            panic!("expected build");
        };
        assert_eq!(build_args.minify, Some(true));

        let Commands::Build { build_args } =
            parse(&["quill", "build", "--minify", "false"]).command
        else {
            panic!("expected build");
        };
        assert_eq!(build_args.minify, Some(false));
    }

    #[test]
    fn test_serve_alias_and_port() {
        let cli = parse(&["quill", "s", "--port", "3000", "--no-watch"]);
        let Commands::Serve { port, no_watch, .. } = &cli.command else {
            panic!("expected serve");
        };
        assert_eq!(*port, Some(3000));
        assert!(*no_watch);
    }

    #[test]
    fn test_init_with_name() {
        let cli = parse(&["quill", "init", "my-blog"]);
        let Commands::Init { name } = &cli.command else {
            panic!("expected init");
        };
        assert_eq!(name.as_deref(), Some(std::path::Path::new("my-blog")));
    }
}
