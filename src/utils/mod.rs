//! Shared utilities.

pub mod date;
pub mod hash;
pub mod html;
pub mod path;
pub mod plural;
pub mod slug;

pub use plural::{plural_count, plural_s};
