//! Tests for the content pipeline: slugs, markdown rendering, excerpts.

use driftwood_core::{Slug, excerpt};
use driftwood_site::content::render_markdown;

#[test]
fn test_slug_generation_is_deterministic() {
    for title in [
        "Hello World",
        "Summer Launch: 2026 Edition",
        "  spaced   out  ",
        "ünïcödé titles",
    ] {
        assert_eq!(Slug::generate(title), Slug::generate(title));
    }
}

#[test]
fn test_generated_slugs_are_canonical() {
    for title in ["Hello, World!", "A -- B", "42 things", "..."] {
        let slug = Slug::generate(title);
        assert!(
            Slug::parse(slug.as_str()).is_ok(),
            "generated slug {slug:?} must parse"
        );
    }
}

#[test]
fn test_excerpt_strips_tags_then_truncates_at_word_boundary() {
    assert_eq!(excerpt("<p>Hello world foo</p>", 8), "Hello...");
}

#[test]
fn test_excerpt_length_bound_holds_for_all_limits() {
    let html = "<p>The quick brown fox jumps over the lazy dog and keeps going</p>";
    for max_len in 1..80 {
        let e = excerpt(html, max_len);
        assert!(
            e.chars().count() <= max_len + 3,
            "excerpt {e:?} exceeds {max_len} + 3"
        );
    }
}

#[test]
fn test_excerpt_over_rendered_markdown() {
    let html = render_markdown("We are **finally** open for business, come see us soon");
    let e = excerpt(&html, 20);

    // Tags from the markdown renderer never survive into the excerpt
    assert!(!e.contains('<'));
    assert!(e.ends_with("..."));
    assert!(e.chars().count() <= 23);
}

#[test]
fn test_markdown_renders_inline_and_block_structure() {
    let html = render_markdown("# Heading\n\nBody with *emphasis*.");
    assert!(html.contains("Heading</h1>"));
    assert!(html.contains("<em>emphasis</em>"));
}

#[test]
fn test_short_bodies_pass_through_without_ellipsis() {
    let html = render_markdown("Tiny note");
    let e = excerpt(&html, 200);
    assert_eq!(e, "Tiny note");
}
