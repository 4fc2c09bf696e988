//! Tests for the segment kind enum and payload sum type.

use std::str::FromStr;

use serde_json::json;

use driftwood_site::models::{SegmentKind, SegmentPayload};

#[test]
fn test_the_fixed_enum_is_closed() {
    // Everything in the enum parses back
    for kind in SegmentKind::ALL {
        assert_eq!(SegmentKind::from_str(kind.as_str()).expect("parses"), kind);
    }

    // Anything else is not a segment kind
    for bogus in ["hero", "video", "POSTS", "text_block", "", "carousel "] {
        assert!(
            SegmentKind::from_str(bogus).is_err(),
            "{bogus:?} must not parse"
        );
    }
}

#[test]
fn test_payload_tag_matches_kind_for_every_variant() {
    for kind in SegmentKind::ALL {
        let payload = SegmentPayload::empty(kind);
        assert_eq!(payload.kind(), kind);

        let wire = serde_json::to_value(&payload).expect("serializes");
        assert_eq!(wire["kind"], kind.as_str());
    }
}

#[test]
fn test_payload_deserialization_is_shape_checked() {
    // Correct shape for the declared kind: accepted
    let carousel = json!({
        "kind": "carousel",
        "slides": [{"image_url": "/a.jpg", "caption": "First"}],
    });
    let payload: SegmentPayload = serde_json::from_value(carousel).expect("valid carousel");
    assert_eq!(payload.kind(), SegmentKind::Carousel);

    // Wrong shape for the declared kind: rejected
    let wrong = json!({
        "kind": "carousel",
        "slides": "not a list",
    });
    assert!(serde_json::from_value::<SegmentPayload>(wrong).is_err());

    // Unknown discriminant: rejected
    let unknown = json!({"kind": "sidebar"});
    assert!(serde_json::from_value::<SegmentPayload>(unknown).is_err());
}

#[test]
fn test_cta_payload_requires_its_fields() {
    let missing_button = json!({"kind": "cta", "heading": "Go"});
    assert!(serde_json::from_value::<SegmentPayload>(missing_button).is_err());

    let complete = json!({
        "kind": "cta",
        "heading": "Go",
        "button_label": "Now",
        "button_url": "/signup",
    });
    assert!(serde_json::from_value::<SegmentPayload>(complete).is_ok());
}

#[test]
fn test_posts_payload_roundtrips_with_defaults() {
    let minimal = json!({"kind": "posts"});
    let payload: SegmentPayload = serde_json::from_value(minimal).expect("valid posts");

    let SegmentPayload::Posts {
        heading,
        page_size,
        show_excerpts,
    } = payload
    else {
        panic!("expected posts payload");
    };

    assert!(heading.is_none());
    assert_eq!(page_size, 10);
    assert!(show_excerpts);
}
