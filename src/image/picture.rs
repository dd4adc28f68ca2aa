//! `<picture>` markup for responsive image variants.

use std::fmt::Write;

use crate::image::variant::VariantSet;
use crate::utils::html::escape_attr;

/// Render a `<picture>` element for `set`.
///
/// Emits one `<source type srcset sizes>` per format in configured order,
/// then a fallback `<img>` built from [`VariantSet::fallback`] with lazy
/// loading hints and the caller's `alt` text.
pub fn markup(set: &VariantSet, alt: &str, sizes: &str) -> String {
    let mut html = String::from("<picture>");

    for (format, variants) in &set.formats {
        if variants.is_empty() {
            continue;
        }

        let srcset = variants
            .iter()
            .map(|v| format!("{} {}w", v.url, v.width))
            .collect::<Vec<_>>()
            .join(", ");

        let _ = write!(
            html,
            r#"<source type="{}" srcset="{}" sizes="{}">"#,
            format.mime(),
            escape_attr(&srcset),
            escape_attr(sizes),
        );
    }

    if let Some(fallback) = set.fallback() {
        let _ = write!(
            html,
            r#"<img src="{}" width="{}" height="{}" loading="lazy" decoding="async" alt="{}">"#,
            escape_attr(&fallback.url),
            fallback.width,
            fallback.height,
            escape_attr(alt),
        );
    }

    html.push_str("</picture>");
    html
}
