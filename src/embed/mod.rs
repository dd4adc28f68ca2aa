//! Embedded resources: the starter site and dev-server templates.
//!
//! The starter site under `site/` is written out by `quill init`. Its
//! CSS/JS are minified at compile time by `build.rs` with the same
//! lightningcss/oxc toolchain the asset pipeline uses at runtime, so the
//! scaffolded site ships production-ready assets from the first build.
//!
//! Dev-server templates under `serve/` back the directory listing and the
//! empty-output welcome page.

/// One file of the scaffolded starter site.
pub struct StarterFile {
    /// Path relative to the new site root.
    pub path: &'static str,
    pub content: &'static str,
}

/// Placeholder in `site/quill.toml` replaced with the site title.
pub const TITLE_PLACEHOLDER: &str = "{title}";

/// The starter config, written separately so init can inject the title.
pub const CONFIG_TEMPLATE: &str = include_str!("site/quill.toml");

/// Every non-config file of the starter site.
pub const STARTER_FILES: &[StarterFile] = &[
    StarterFile {
        path: "content/index.md",
        content: include_str!("site/content/index.md"),
    },
    StarterFile {
        path: "content/posts/hello-world.md",
        content: include_str!("site/content/posts/hello-world.md"),
    },
    StarterFile {
        path: "templates/base.html",
        content: include_str!("site/templates/base.html"),
    },
    StarterFile {
        path: "templates/post.html",
        content: include_str!("site/templates/post.html"),
    },
    StarterFile {
        path: "static/css/style.css",
        content: include_str!(concat!(env!("OUT_DIR"), "/style.min.css")),
    },
    StarterFile {
        path: "static/js/main.js",
        content: include_str!(concat!(env!("OUT_DIR"), "/main.min.js")),
    },
];

/// Templates used by the development server.
pub mod serve {
    /// Directory listing page; `{path}`, `{parent_link}` and `{entries}`
    /// are replaced per request.
    pub const DIRECTORY_HTML: &str = include_str!("serve/directory.html");

    /// Welcome page shown while the output directory is empty; `{version}`
    /// is replaced with the crate version.
    pub const WELCOME_HTML: &str = include_str!("serve/welcome.html");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_template_parses_with_title_injected() {
        let toml = CONFIG_TEMPLATE.replace(TITLE_PLACEHOLDER, "My Blog");
        let config: crate::config::SiteConfig = toml::from_str(&toml).unwrap();
        assert_eq!(config.site.title, "My Blog");
        assert_eq!(config.build.posts, "posts/**/*.md");
    }

    #[test]
    fn test_starter_assets_are_minified() {
        let css = STARTER_FILES
            .iter()
            .find(|f| f.path.ends_with("style.css"))
            .unwrap();
        assert!(!css.content.contains("\n\n"));
        assert!(!css.content.contains("/*"));

        let js = STARTER_FILES
            .iter()
            .find(|f| f.path.ends_with("main.js"))
            .unwrap();
        assert!(!js.content.contains("//"));
    }

    #[test]
    fn test_starter_paths_are_relative_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for file in STARTER_FILES {
            assert!(!file.path.starts_with('/'));
            assert!(seen.insert(file.path), "duplicate: {}", file.path);
        }
    }

    #[test]
    fn test_serve_templates_carry_placeholders() {
        assert!(serve::DIRECTORY_HTML.contains("{entries}"));
        assert!(serve::DIRECTORY_HTML.contains("{parent_link}"));
        assert!(serve::WELCOME_HTML.contains("{version}"));
    }
}
