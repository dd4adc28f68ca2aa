//! Front matter extraction from YAML-like (`---`) or TOML (`+++`) blocks.

use anyhow::Result;

use super::PageMeta;

/// Extract front matter and return `(metadata, body)`.
///
/// Returns `None` when the source has no front matter block; the caller
/// treats the whole file as body with all-default metadata.
pub fn extract(content: &str) -> Result<Option<(PageMeta, &str)>> {
    match detect(content) {
        Some((fm, body, is_toml)) => {
            let meta = if is_toml {
                parse_toml(fm)?
            } else {
                parse_yaml_like(fm)
            };
            Ok(Some((meta, body)))
        }
        None => Ok(None),
    }
}

/// Detect and split a front matter block.
/// Returns `(front matter, body, is_toml)` if found.
fn detect(content: &str) -> Option<(&str, &str, bool)> {
    let trimmed = content.trim_start();

    // YAML: ---...---
    if trimmed.starts_with("---")
        && let Some(end) = trimmed[3..].find("\n---")
    {
        let fm = trimmed[3..3 + end].trim();
        let body = trimmed[3 + end + 4..].trim_start_matches('\n');
        return Some((fm, body, false));
    }

    // TOML: +++...+++
    if trimmed.starts_with("+++")
        && let Some(end) = trimmed[3..].find("\n+++")
    {
        let fm = trimmed[3..3 + end].trim();
        let body = trimmed[3 + end + 4..].trim_start_matches('\n');
        return Some((fm, body, true));
    }

    None
}

/// Parse simple YAML-like front matter (key: value).
///
/// Supports standard fields (title, date, etc.) and custom fields in `extra`.
fn parse_yaml_like(content: &str) -> PageMeta {
    let mut meta = PageMeta::default();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once(':') {
            let key_lower = key.trim().to_lowercase();
            let value = value.trim();

            match key_lower.as_str() {
                "title" => meta.title = Some(value.to_string()),
                "summary" => meta.summary = Some(value.to_string()),
                "date" => meta.date = Some(value.to_string()),
                "updated" => meta.updated = Some(value.to_string()),
                "author" => meta.author = Some(value.to_string()),
                "layout" => meta.layout = Some(value.to_string()),
                "permalink" => meta.permalink = Some(value.to_string()),
                "draft" => meta.draft = value.eq_ignore_ascii_case("true"),
                "tags" => {
                    meta.tags = value
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect();
                }
                _ => {
                    // Custom field -> extra (preserve original key case)
                    let key = key.trim().to_string();
                    meta.extra.insert(key, parse_yaml_value(value));
                }
            }
        }
    }

    meta
}

/// Parse TOML front matter.
fn parse_toml(content: &str) -> Result<PageMeta> {
    toml::from_str(content).map_err(|e| anyhow::anyhow!("Invalid TOML front matter: {}", e))
}

/// Parse a YAML-like value string to JSON value
///
/// Supports:
/// - Booleans: `true`, `false`
/// - Numbers: `123`, `3.14`
/// - Arrays: `a, b, c` -> `["a", "b", "c"]`
/// - Strings: everything else
fn parse_yaml_value(s: &str) -> serde_json::Value {
    use serde_json::Value;

    // Boolean
    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    // Null
    if s.eq_ignore_ascii_case("null") || s == "~" {
        return Value::Null;
    }

    // Number (integer)
    if let Ok(n) = s.parse::<i64>() {
        return Value::Number(n.into());
    }

    // Number (float)
    if let Ok(n) = s.parse::<f64>()
        && let Some(num) = serde_json::Number::from_f64(n)
    {
        return Value::Number(num);
    }

    // Comma-separated array (if contains comma)
    if s.contains(',') {
        let arr: Vec<Value> = s
            .split(',')
            .map(|item| Value::String(item.trim().to_string()))
            .filter(|v| !matches!(v, Value::String(s) if s.is_empty()))
            .collect();
        return Value::Array(arr);
    }

    // Default: string
    Value::String(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_frontmatter() {
        let content = "---\ntitle: Hello\ndate: 2024-01-01\ntags: a, b\n---\n\n# Body";
        let (meta, body) = extract(content).unwrap().unwrap();

        assert_eq!(meta.title, Some("Hello".to_string()));
        assert_eq!(meta.date, Some("2024-01-01".to_string()));
        assert_eq!(meta.tags, vec!["a", "b"]);
        assert!(body.starts_with("# Body"));
    }

    #[test]
    fn test_toml_frontmatter() {
        let content = "+++\ntitle = \"Hello\"\ntags = [\"a\", \"b\"]\n+++\n\n# Body";
        let (meta, body) = extract(content).unwrap().unwrap();

        assert_eq!(meta.title, Some("Hello".to_string()));
        assert_eq!(meta.tags, vec!["a", "b"]);
        assert!(body.starts_with("# Body"));
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just content";
        assert!(extract(content).unwrap().is_none());
    }

    #[test]
    fn test_invalid_toml_frontmatter() {
        let content = "+++\ntitle = unquoted\n+++\nbody";
        assert!(extract(content).is_err());
    }

    #[test]
    fn test_yaml_draft_and_layout() {
        let content = "---\ndraft: true\nlayout: post.html\n---\nbody";
        let (meta, _) = extract(content).unwrap().unwrap();
        assert!(meta.draft);
        assert_eq!(meta.layout, Some("post.html".to_string()));
    }

    #[test]
    fn test_yaml_extra_fields() {
        let content =
            "---\ntitle: Hello\ncustom: world\ncount: 42\nflag: true\nitems: x, y, z\n---\n";
        let (meta, _) = extract(content).unwrap().unwrap();

        assert_eq!(meta.title, Some("Hello".to_string()));
        assert_eq!(meta.extra.get("custom"), Some(&serde_json::json!("world")));
        assert_eq!(meta.extra.get("count"), Some(&serde_json::json!(42)));
        assert_eq!(meta.extra.get("flag"), Some(&serde_json::json!(true)));
        assert_eq!(
            meta.extra.get("items"),
            Some(&serde_json::json!(["x", "y", "z"]))
        );
    }

    #[test]
    fn test_toml_extra_fields() {
        let content = "+++\ntitle = \"Hello\"\ncustom = \"world\"\ncount = 42\n+++\n";
        let (meta, _) = extract(content).unwrap().unwrap();

        assert_eq!(meta.title, Some("Hello".to_string()));
        assert_eq!(meta.extra.get("custom"), Some(&serde_json::json!("world")));
        assert_eq!(meta.extra.get("count"), Some(&serde_json::json!(42)));
    }
}
