//! `[images]` section configuration.
//!
//! Controls responsive image generation: which widths get resized
//! variants, which formats are encoded, and where derived files land.
//!
//! # Example
//!
//! ```toml
//! [images]
//! widths = [300, 600, 1020]   # Variant widths in pixels
//! formats = ["webp", "jpeg"]  # Encoded formats, in <picture> source order
//! source = "images"           # Shared originals directory (relative to site root)
//! output = "img"              # Derived image directory (relative to output)
//! quality = 80                # Lossy encoder quality (1-100)
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::{ConfigDiagnostics, FieldPath};

/// Encoded output format for derived images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Lossless WebP.
    Webp,
    /// Baseline JPEG at the configured quality.
    Jpeg,
    /// AV1 still image at the configured quality.
    Avif,
}

impl ImageFormat {
    /// File extension for derived files.
    pub fn ext(&self) -> &'static str {
        match self {
            Self::Webp => "webp",
            Self::Jpeg => "jpg",
            Self::Avif => "avif",
        }
    }

    /// MIME type for `<source type="...">` attributes.
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Webp => "image/webp",
            Self::Jpeg => "image/jpeg",
            Self::Avif => "image/avif",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// Variant widths in pixels. Sources narrower than a width keep
    /// their own width instead of upscaling.
    pub widths: Vec<u32>,

    /// Formats to encode, in `<picture>` source order.
    /// The last format doubles as the `<img>` fallback.
    pub formats: Vec<ImageFormat>,

    /// Directory holding shared image originals, relative to the site
    /// root. `image(src, ...)` resolves non-relative sources here.
    pub source: PathBuf,

    /// Directory for derived images, relative to the output directory.
    pub output: PathBuf,

    /// Lossy encoder quality (1-100). Applies to JPEG and AVIF;
    /// WebP output is lossless.
    pub quality: u8,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            widths: vec![300, 600, 1020],
            formats: vec![ImageFormat::Webp, ImageFormat::Jpeg],
            source: "images".into(),
            output: "img".into(),
            quality: 80,
        }
    }
}

impl ImagesConfig {
    /// Sort widths ascending and drop duplicates.
    ///
    /// `srcset` lists and variant filenames come out in a stable order
    /// regardless of how quill.toml spells the list.
    pub fn normalize(&mut self) {
        self.widths.sort_unstable();
        self.widths.dedup();
    }

    /// Validate the images configuration.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.widths.is_empty() {
            diag.error(
                FieldPath::new("images.widths"),
                "at least one variant width is required",
            );
        }
        if self.widths.contains(&0) {
            diag.error(FieldPath::new("images.widths"), "width 0 is not a valid variant");
        }

        if self.formats.is_empty() {
            diag.error(
                FieldPath::new("images.formats"),
                "at least one output format is required",
            );
        }

        if self.quality == 0 || self.quality > 100 {
            diag.error(
                FieldPath::new("images.quality"),
                format!("quality {} is out of range (1-100)", self.quality),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.images.widths, vec![300, 600, 1020]);
        assert_eq!(
            config.images.formats,
            vec![ImageFormat::Webp, ImageFormat::Jpeg]
        );
        assert_eq!(config.images.source, PathBuf::from("images"));
        assert_eq!(config.images.output, PathBuf::from("img"));
        assert_eq!(config.images.quality, 80);
    }

    #[test]
    fn test_custom_config() {
        let config = test_parse_config(
            "[images]\nwidths = [480, 960]\nformats = [\"avif\", \"jpeg\"]\nquality = 70",
        );
        assert_eq!(config.images.widths, vec![480, 960]);
        assert_eq!(
            config.images.formats,
            vec![ImageFormat::Avif, ImageFormat::Jpeg]
        );
        assert_eq!(config.images.quality, 70);
    }

    #[test]
    fn test_normalize_sorts_and_dedups() {
        let mut images = ImagesConfig {
            widths: vec![960, 300, 960, 600],
            ..Default::default()
        };
        images.normalize();
        assert_eq!(images.widths, vec![300, 600, 960]);
    }

    #[test]
    fn test_validate_rejects_zero_width() {
        let images = ImagesConfig {
            widths: vec![0, 600],
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        images.validate(&mut diag);
        assert!(diag.has_errors());
    }

    #[test]
    fn test_validate_rejects_bad_quality() {
        let images = ImagesConfig {
            quality: 0,
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        images.validate(&mut diag);
        assert!(diag.has_errors());
    }

    #[test]
    fn test_format_ext_and_mime() {
        assert_eq!(ImageFormat::Webp.ext(), "webp");
        assert_eq!(ImageFormat::Jpeg.ext(), "jpg");
        assert_eq!(ImageFormat::Avif.mime(), "image/avif");
    }
}
