//! Template engine setup: layouts, filters and the image shortcode.

use std::collections::HashMap;
use std::path::{Component, Path};
use std::sync::Arc;

use anyhow::{Context as _, Result, bail};
use tera::{Context, Error, Tera, Value};

use crate::config::{MinifyPolicy, SiteConfig};
use crate::content::Document;
use crate::image::{ImageService, picture};
use crate::minify;
use crate::render::current;
use crate::utils::date::DateTimeUtc;
use crate::utils::slug;

/// Name prefix for page bodies registered next to the layout templates.
const BODY_PREFIX: &str = "__body__/";

/// Name of the built-in layout used when the templates directory has none.
const FALLBACK_LAYOUT: &str = "__fallback__";

const FALLBACK_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="{{ site.language }}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{ page.title }}{% if site.title %} | {{ site.title }}{% endif %}</title>
</head>
<body>
<main>{{ content }}</main>
</body>
</html>
"#;

/// Owns the tera instance and every name registered on it.
///
/// Built once per build after scanning: layout templates are loaded from the
/// templates directory, page bodies are added under [`BODY_PREFIX`], and all
/// filters and the `image` function are registered in the constructor. Render
/// workers share it by reference.
pub struct Registry {
    tera: Tera,
}

impl Registry {
    pub fn new(
        config: &Arc<SiteConfig>,
        images: &Arc<ImageService>,
        documents: &[Document],
    ) -> Result<Self> {
        let pattern = format!("{}/**/*.html", config.build.templates.display());
        let mut tera = Tera::new(&pattern).with_context(|| {
            format!("failed to load templates from '{}'", config.build.templates.display())
        })?;
        tera.autoescape_on(vec![]);

        tera.add_raw_template(FALLBACK_LAYOUT, FALLBACK_TEMPLATE)
            .context("invalid built-in fallback layout")?;

        for doc in documents {
            tera.add_raw_template(&body_template(doc), &doc.body)
                .with_context(|| format!("template syntax error in '{}'", doc.relative.display()))?;
        }

        tera.register_filter("post_date", post_date);
        tera.register_filter("deslugify", deslugify);
        tera.register_filter("slugify", slugify);

        let policy = config.minify.css;
        tera.register_filter("cssmin", move |value: &Value, _: &HashMap<String, Value>| {
            let code = string_input(value, "cssmin")?;
            apply_policy(minify::minify_css(code), code, policy, "inline CSS")
        });

        let policy = config.minify.js;
        tera.register_filter("jsmin", move |value: &Value, _: &HashMap<String, Value>| {
            let code = string_input(value, "jsmin")?;
            apply_policy(minify::minify_js(code), code, policy, "inline JS")
        });

        let service = Arc::clone(images);
        let image_config = Arc::clone(config);
        tera.register_function("image", move |args: &HashMap<String, Value>| {
            image_function(args, &image_config, &service)
        });

        Ok(Self { tera })
    }

    /// Render the body of a page registered at construction.
    pub fn render_body(&self, doc: &Document, ctx: &Context) -> Result<String> {
        self.tera
            .render(&body_template(doc), ctx)
            .with_context(|| format!("failed to render '{}'", doc.relative.display()))
    }

    /// Render the layout wrapping a page; `ctx` must carry `content`.
    ///
    /// An explicit `layout` in front matter must exist in the templates
    /// directory. Without one, `base.html` is used when present, else the
    /// built-in fallback.
    pub fn render_layout(&self, doc: &Document, ctx: &Context) -> Result<String> {
        let name = match &doc.meta.layout {
            Some(layout) => {
                let name = if layout.ends_with(".html") {
                    layout.clone()
                } else {
                    format!("{layout}.html")
                };
                if !self.has_template(&name) {
                    bail!(
                        "layout '{name}' for '{}' not found in the templates directory",
                        doc.relative.display()
                    );
                }
                name
            }
            None if self.has_template("base.html") => "base.html".to_string(),
            None => FALLBACK_LAYOUT.to_string(),
        };

        self.tera
            .render(&name, ctx)
            .with_context(|| format!("failed to render layout '{name}'"))
    }

    fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }
}

fn body_template(doc: &Document) -> String {
    format!("{BODY_PREFIX}{}", doc.relative.display())
}

fn string_input<'a>(value: &'a Value, filter: &str) -> tera::Result<&'a str> {
    value.as_str().ok_or_else(|| Error::msg(format!("{filter} expects a string")))
}

/// `post_date` filter: medium-length date with fixed English month names.
fn post_date(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let raw = string_input(value, "post_date")?;
    let date = DateTimeUtc::parse(raw)
        .ok_or_else(|| Error::msg(format!("post_date: invalid date '{raw}'")))?;
    Ok(Value::String(date.to_date_med()))
}

/// `deslugify` filter: `hello-world` becomes `Hello World`.
fn deslugify(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(slug::deslugify(string_input(value, "deslugify")?)))
}

/// `slugify` filter: `Hello World` becomes `hello-world`.
fn slugify(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(slug::slugify(string_input(value, "slugify")?)))
}

fn apply_policy(
    result: Result<String>,
    original: &str,
    policy: MinifyPolicy,
    what: &str,
) -> tera::Result<Value> {
    match minify::with_policy(result, original, policy, what) {
        Ok(code) => Ok(Value::String(code)),
        Err(e) => Err(Error::msg(format!("{e:#}"))),
    }
}

/// The `image` shortcode: generate responsive variants and return `<picture>`
/// markup.
fn image_function(
    args: &HashMap<String, Value>,
    config: &SiteConfig,
    images: &ImageService,
) -> tera::Result<Value> {
    // `alt` is checked before anything touches the filesystem; an image
    // without it fails even when the source does not exist.
    let alt = match args.get("alt") {
        Some(Value::String(alt)) => alt.as_str(),
        Some(_) => return Err(Error::msg("image: `alt` must be a string")),
        None => {
            return Err(Error::msg(
                "image: missing `alt` (use alt=\"\" for decorative images)",
            ));
        }
    };

    let src = args
        .get("src")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::msg("image: missing `src`"))?;
    let relative = match args.get("relative") {
        Some(Value::Bool(relative)) => *relative,
        Some(_) => return Err(Error::msg("image: `relative` must be a boolean")),
        None => false,
    };
    let sizes = match args.get("sizes") {
        Some(Value::String(sizes)) => sizes.as_str(),
        Some(_) => return Err(Error::msg("image: `sizes` must be a string")),
        None => "100vw",
    };

    let src_path = Path::new(src);
    if src_path.is_absolute()
        || src_path.components().any(|c| matches!(c, Component::ParentDir))
    {
        return Err(Error::msg(format!(
            "image: source '{src}' must be a relative path without '..'"
        )));
    }

    let (source, emit_dir, url_base) = if relative {
        let page = current::page().ok_or_else(|| {
            Error::msg("image: relative=true is only available while a page renders")
        })?;
        (page.source_dir.join(src_path), page.output_dir, page.url_base)
    } else {
        (
            config.images.source.join(src_path),
            config.build.output.join(&config.images.output),
            shared_url_base(&config.images.output),
        )
    };

    let set = images
        .variants(&source, &emit_dir, &url_base, config)
        .map_err(|e| Error::msg(format!("image: {e:#}")))?;

    Ok(Value::String(picture::markup(&set, alt, sizes)))
}

fn shared_url_base(output: &Path) -> String {
    let joined =
        output.iter().map(|c| c.to_string_lossy()).collect::<Vec<_>>().join("/");
    format!("/{joined}")
}
