//! Markdown to HTML conversion.

use pulldown_cmark::{Options, Parser, html};

/// Convert markdown to HTML.
///
/// Tables, footnotes, strikethrough, task lists and heading attributes are
/// enabled on top of CommonMark.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

    let parser = Parser::new_ext(markdown, options);
    let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut html_output, parser);
    html_output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let html = to_html("# Hello World\n\nThis is a **test**.");
        assert!(html.contains("<h1"));
        assert!(html.contains("Hello World"));
        assert!(html.contains("<strong>test</strong>"));
    }

    #[test]
    fn test_tables() {
        let md = r#"
| Header 1 | Header 2 |
|----------|----------|
| Cell 1   | Cell 2   |
"#;
        let html = to_html(md);
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>Header 1</th>"));
    }

    #[test]
    fn test_task_lists() {
        let html = to_html("- [x] done\n- [ ] open");
        assert!(html.contains("checkbox"));
    }

    #[test]
    fn test_heading_attributes() {
        let html = to_html("# Intro {#custom-id}");
        assert!(html.contains(r#"id="custom-id""#));
    }

    #[test]
    fn test_footnotes() {
        let html = to_html("text[^1]\n\n[^1]: the note");
        assert!(html.contains("footnote"));
    }
}
