//! Static asset handling.
//!
//! Assets come from three places: configured nested directories (structure
//! preserved under the output root), flatten entries (single files renamed
//! to the output root) and non-page files sitting next to content. Scanning
//! builds [`AssetRoute`]s; processing copies or minifies each one.

mod process;
mod route;
mod scan;

pub use process::process_route;
pub use route::{AssetKind, AssetRoute};
pub use scan::{scan_all, scan_content_assets, scan_flatten_assets, scan_global_assets};
