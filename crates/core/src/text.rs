//! Plain-text helpers shared by the site and CLI.

/// Strip HTML tags from a fragment and normalize whitespace.
///
/// Tags are dropped wholesale; runs of whitespace collapse to a single
/// space and the result is trimmed. Not an HTML sanitizer - the input is
/// our own rendered markup, never untrusted.
#[must_use]
pub fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut last_was_space = true;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            _ if c.is_whitespace() => {
                if !last_was_space {
                    out.push(' ');
                    last_was_space = true;
                }
            }
            _ => {
                out.push(c);
                last_was_space = false;
            }
        }
    }

    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Build a plain-text excerpt from an HTML fragment.
///
/// Tags are stripped first, then the text is truncated at the last space at
/// or before `max_len` and `"..."` is appended. Text that already fits is
/// returned unchanged. The result never exceeds `max_len + 3` characters,
/// and a word is only ever split when the text contains no space at all
/// before the limit.
///
/// ```
/// use driftwood_core::excerpt;
///
/// assert_eq!(excerpt("<p>Hello world foo</p>", 8), "Hello...");
/// assert_eq!(excerpt("<p>Short</p>", 40), "Short");
/// ```
#[must_use]
pub fn excerpt(html: &str, max_len: usize) -> String {
    let text = strip_html(html);

    if text.chars().count() <= max_len {
        return text;
    }

    let head: String = text.chars().take(max_len).collect();
    let mut cut = head.rfind(' ').map_or(head.clone(), |pos| {
        head.get(..pos).unwrap_or_default().to_owned()
    });

    while cut.ends_with(' ') {
        cut.pop();
    }

    cut.push_str("...");
    cut
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html_basic() {
        assert_eq!(strip_html("<p>Hello world</p>"), "Hello world");
        assert_eq!(strip_html("plain text"), "plain text");
        assert_eq!(strip_html("<a href=\"/x\">link</a> text"), "link text");
    }

    #[test]
    fn test_strip_html_collapses_whitespace() {
        assert_eq!(strip_html("a\n\n  b"), "a b");
        assert_eq!(strip_html("  <b>a</b>  "), "a");
    }

    #[test]
    fn test_excerpt_spec_example() {
        assert_eq!(excerpt("<p>Hello world foo</p>", 8), "Hello...");
    }

    #[test]
    fn test_excerpt_returns_short_text_unchanged() {
        assert_eq!(excerpt("<p>Hello world</p>", 40), "Hello world");
    }

    #[test]
    fn test_excerpt_never_exceeds_bound() {
        let html = "<p>The quick brown fox jumps over the lazy dog</p>";
        for max_len in 1..50 {
            let e = excerpt(html, max_len);
            assert!(
                e.chars().count() <= max_len + 3,
                "excerpt {e:?} exceeds {max_len} + 3"
            );
        }
    }

    #[test]
    fn test_excerpt_never_splits_words() {
        let e = excerpt("alpha beta gamma delta", 12);
        // "alpha beta g" -> cut back to the last space
        assert_eq!(e, "alpha beta...");
        let body = e.trim_end_matches("...");
        assert!("alpha beta gamma delta".starts_with(body));
        assert!(!body.ends_with(|c: char| c.is_whitespace()));
    }

    #[test]
    fn test_excerpt_single_long_word_hard_cuts() {
        let e = excerpt("supercalifragilistic", 5);
        assert_eq!(e, "super...");
    }

    #[test]
    fn test_excerpt_deterministic() {
        let a = excerpt("<p>Some longer body of text here</p>", 10);
        let b = excerpt("<p>Some longer body of text here</p>", 10);
        assert_eq!(a, b);
    }
}
