//! Resize and encode a single responsive image variant.

use std::fs;
use std::path::Path;

use anyhow::Result;
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;

use crate::config::ImageFormat;

/// One encoded output file of the responsive image pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// Site-absolute URL of the encoded file.
    pub url: String,
    /// Encoded pixel width.
    pub width: u32,
    /// Encoded pixel height.
    pub height: u32,
}

/// Variant lists for one source image, one list per configured format.
#[derive(Debug, Clone, Default)]
pub struct VariantSet {
    /// `(format, variants)` in configured format order; each list is ordered
    /// by ascending width and contains no duplicate widths.
    pub formats: Vec<(ImageFormat, Vec<Variant>)>,
}

impl VariantSet {
    /// The variant backing the fallback `<img>`: the smallest variant of the
    /// last configured format (the most broadly supported one).
    pub fn fallback(&self) -> Option<&Variant> {
        self.formats.last().and_then(|(_, variants)| variants.first())
    }
}

/// Height preserving the source aspect ratio at `target_w`, rounded to the
/// nearest pixel and clamped to at least 1.
pub fn scaled_height(src_w: u32, src_h: u32, target_w: u32) -> u32 {
    if src_w == 0 {
        return src_h.max(1);
    }
    let height =
        (u64::from(src_h) * u64::from(target_w) + u64::from(src_w) / 2) / u64::from(src_w);
    (height as u32).max(1)
}

/// Resize `img` down to `target_w` and encode it to `dest`.
///
/// `target_w` must not exceed the source width; the caller clamps requested
/// widths beforehand. Returns the encoded `(width, height)`.
pub fn encode(
    img: &DynamicImage,
    target_w: u32,
    format: ImageFormat,
    quality: u8,
    dest: &Path,
) -> Result<(u32, u32)> {
    let height = scaled_height(img.width(), img.height(), target_w);

    let resized;
    let img = if target_w < img.width() {
        resized = img.resize_exact(target_w, height, FilterType::Lanczos3);
        &resized
    } else {
        img
    };

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let bytes = match format {
        ImageFormat::Webp => {
            let mut buf = Vec::new();
            img.to_rgba8().write_with_encoder(WebPEncoder::new_lossless(&mut buf))?;
            buf
        }
        ImageFormat::Jpeg => {
            // JPEG carries no alpha channel.
            let mut buf = Vec::new();
            let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
            encoder.encode_image(&img.to_rgb8())?;
            buf
        }
        ImageFormat::Avif => {
            let rgba = img.to_rgba8();
            let pixmap: Vec<_> = rgba
                .as_raw()
                .chunks(4)
                .map(|chunk| ravif::RGBA8::new(chunk[0], chunk[1], chunk[2], chunk[3]))
                .collect();

            let encoded = ravif::Encoder::new()
                .with_quality(f32::from(quality))
                .with_speed(4)
                .encode_rgba(ravif::Img::new(&pixmap, target_w as usize, height as usize))?;

            encoded.avif_file
        }
    };

    fs::write(dest, bytes)?;
    Ok((target_w, height))
}
