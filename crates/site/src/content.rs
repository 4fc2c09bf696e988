//! Markdown rendering for post bodies.

use comrak::{Options, markdown_to_html};

/// Render markdown to HTML with GitHub Flavored Markdown support.
///
/// Post bodies are rendered at write time and stored alongside the source,
/// so the public renderer never touches markdown.
#[must_use]
pub fn render_markdown(content: &str) -> String {
    let mut options = Options::default();

    // Enable GFM extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.header_ids = Some(String::new());
    options.extension.footnotes = true;

    markdown_to_html(content, &options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_paragraphs() {
        let html = render_markdown("Hello **world**");
        assert!(html.contains("<strong>world</strong>"));
    }

    #[test]
    fn test_renders_gfm_tables() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_autolinks() {
        let html = render_markdown("see https://example.com now");
        assert!(html.contains("<a href=\"https://example.com\">"));
    }
}
