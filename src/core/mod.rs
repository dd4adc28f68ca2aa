//! Core types - pure abstractions shared across the codebase.

mod category;
mod mode;
mod state;

pub use category::{ContentKind, FileCategory, categorize_path};
pub use mode::BuildMode;
pub use state::{is_shutdown, register_server, setup_shutdown_handler};
