//! Command-line interface: argument definitions and the init command.
//!
//! `build` and `serve` are thin dispatches from `main` into
//! [`crate::pipeline`] and [`crate::serve`].

pub mod args;
pub mod init;

pub use args::{BuildArgs, Cli, Commands};
