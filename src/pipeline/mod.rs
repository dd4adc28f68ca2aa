//! The build pipeline: explicit stages and their orchestration.
//!
//! ```text
//! Scan ──► Collect ──► Render ──► Generate (feed, sitemap)
//!   │                    │
//!   └──► Assets          └─ output transform applied per emitted page
//! ```
//!
//! [`stage`] declares the graph and validates it; [`build`] executes it,
//! with Render and Assets sharing a rayon join.

pub mod build;
pub mod stage;

pub use build::{BuildSummary, build_site};
pub use stage::Stage;
