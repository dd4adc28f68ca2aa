//! Configuration section definitions.
//!
//! Each module corresponds to a section in `quill.toml`:
//!
//! | Module   | TOML Section | Purpose                              |
//! |----------|--------------|--------------------------------------|
//! | `build`  | `[build]`    | Build paths, posts glob, assets      |
//! | `feed`   | `[feed]`     | RSS/Atom feed generation             |
//! | `images` | `[images]`   | Responsive image variants            |
//! | `minify` | `[minify]`   | Minify failure policies              |
//! | `serve`  | `[serve]`    | Development server                   |
//! | `site`   | `[site]`     | Site metadata and template globals   |

pub mod build;
mod feed;
mod images;
mod minify;
mod serve;
mod site;

// Re-export section configs
pub use build::{AssetsConfig, BuildSectionConfig, FlattenEntry, NestedEntry};
pub use feed::{FeedConfig, FeedFormat};
pub use images::{ImageFormat, ImagesConfig};
pub use minify::{MinifyPolicy, MinifySectionConfig};
pub use serve::ServeConfig;
pub use site::SiteInfoConfig;
