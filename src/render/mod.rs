//! Page rendering.
//!
//! # Modules
//!
//! - [`registry`]: tera instance plus every registered filter and function
//! - [`markdown`]: markdown to HTML conversion
//! - [`page`]: render one document and write its artifact
//! - [`current`]: per-thread scope for page-relative shortcodes

pub mod current;
pub mod markdown;
pub mod page;
pub mod registry;

pub use page::{RenderedPage, render_page};
pub use registry::Registry;
