//! Responsive image generation.
//!
//! # Modules
//!
//! - [`variant`]: resize and encode a single output file
//! - [`service`]: per-build memoized variant generation
//! - [`picture`]: `<picture>`/`srcset` markup from generated variants

pub mod picture;
pub mod service;
pub mod variant;

pub use service::ImageService;
pub use variant::{Variant, VariantSet};
