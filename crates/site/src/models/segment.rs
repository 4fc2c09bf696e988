//! Segment domain types.
//!
//! A segment is a typed, reorderable content block attached to a page. The
//! payload is a tagged sum type: one variant per segment kind, each with its
//! own shape. The discriminant is stored alongside the payload so segments
//! can be filtered by kind in SQL without touching the JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use driftwood_core::{PageId, SegmentId, UserId};

/// The fixed set of segment kinds.
///
/// Anything outside this enum is not a segment; routes taking a kind
/// parameter answer not-found for unknown values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentKind {
    Carousel,
    TextBlock,
    Gallery,
    Cta,
    ContactForm,
    Posts,
}

impl SegmentKind {
    /// Every segment kind, in admin display order.
    pub const ALL: [Self; 6] = [
        Self::Carousel,
        Self::TextBlock,
        Self::Gallery,
        Self::Cta,
        Self::ContactForm,
        Self::Posts,
    ];

    /// The kebab-case wire/database name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Carousel => "carousel",
            Self::TextBlock => "text-block",
            Self::Gallery => "gallery",
            Self::Cta => "cta",
            Self::ContactForm => "contact-form",
            Self::Posts => "posts",
        }
    }

    /// Human-readable label for the admin panel.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Carousel => "Carousel",
            Self::TextBlock => "Text block",
            Self::Gallery => "Gallery",
            Self::Cta => "Call to action",
            Self::ContactForm => "Contact form",
            Self::Posts => "Posts",
        }
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SegmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "carousel" => Ok(Self::Carousel),
            "text-block" => Ok(Self::TextBlock),
            "gallery" => Ok(Self::Gallery),
            "cta" => Ok(Self::Cta),
            "contact-form" => Ok(Self::ContactForm),
            "posts" => Ok(Self::Posts),
            _ => Err(format!("unknown segment kind: {s}")),
        }
    }
}

/// A slide in a carousel segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselSlide {
    pub image_url: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
}

/// An image in a gallery segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub image_url: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// Default listing size for posts segments.
const fn default_page_size() -> u32 {
    10
}

const fn default_true() -> bool {
    true
}

/// Typed payload of a segment, discriminated by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SegmentPayload {
    Carousel {
        #[serde(default)]
        slides: Vec<CarouselSlide>,
    },
    TextBlock {
        #[serde(default)]
        heading: Option<String>,
        /// Rendered HTML body.
        body_html: String,
    },
    Gallery {
        #[serde(default)]
        images: Vec<GalleryImage>,
    },
    Cta {
        heading: String,
        #[serde(default)]
        body: Option<String>,
        button_label: String,
        button_url: String,
    },
    ContactForm {
        #[serde(default)]
        heading: Option<String>,
        #[serde(default)]
        intro: Option<String>,
    },
    Posts {
        #[serde(default)]
        heading: Option<String>,
        #[serde(default = "default_page_size")]
        page_size: u32,
        #[serde(default = "default_true")]
        show_excerpts: bool,
    },
}

impl SegmentPayload {
    /// The kind this payload belongs to.
    #[must_use]
    pub const fn kind(&self) -> SegmentKind {
        match self {
            Self::Carousel { .. } => SegmentKind::Carousel,
            Self::TextBlock { .. } => SegmentKind::TextBlock,
            Self::Gallery { .. } => SegmentKind::Gallery,
            Self::Cta { .. } => SegmentKind::Cta,
            Self::ContactForm { .. } => SegmentKind::ContactForm,
            Self::Posts { .. } => SegmentKind::Posts,
        }
    }

    /// An empty payload of the given kind, used to prefill the new-segment
    /// form in the admin panel.
    #[must_use]
    pub fn empty(kind: SegmentKind) -> Self {
        match kind {
            SegmentKind::Carousel => Self::Carousel { slides: Vec::new() },
            SegmentKind::TextBlock => Self::TextBlock {
                heading: None,
                body_html: String::new(),
            },
            SegmentKind::Gallery => Self::Gallery { images: Vec::new() },
            SegmentKind::Cta => Self::Cta {
                heading: String::new(),
                body: None,
                button_label: String::new(),
                button_url: String::new(),
            },
            SegmentKind::ContactForm => Self::ContactForm {
                heading: None,
                intro: None,
            },
            SegmentKind::Posts => Self::Posts {
                heading: None,
                page_size: default_page_size(),
                show_excerpts: true,
            },
        }
    }
}

/// A segment (domain type).
#[derive(Debug, Clone)]
pub struct Segment {
    /// Unique segment ID.
    pub id: SegmentId,
    /// Page this segment is attached to.
    pub page_id: PageId,
    /// Typed payload; its kind is the segment's kind.
    pub payload: SegmentPayload,
    /// Ordering key within the page (ascending).
    pub position: i32,
    /// User who created the segment.
    pub created_by: UserId,
    /// When the segment was created.
    pub created_at: DateTime<Utc>,
    /// When the segment was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Segment {
    /// The segment's kind, taken from its payload.
    #[must_use]
    pub const fn kind(&self) -> SegmentKind {
        self.payload.kind()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_kind_roundtrip() {
        for kind in SegmentKind::ALL {
            assert_eq!(SegmentKind::from_str(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn test_kind_rejects_unknown() {
        assert!(SegmentKind::from_str("hero").is_err());
        assert!(SegmentKind::from_str("TextBlock").is_err());
        assert!(SegmentKind::from_str("").is_err());
    }

    #[test]
    fn test_payload_tagged_serialization() {
        let payload = SegmentPayload::Cta {
            heading: "Get started".to_string(),
            body: None,
            button_label: "Sign up".to_string(),
            button_url: "/signup".to_string(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["kind"], "cta");
        assert_eq!(json["heading"], "Get started");
    }

    #[test]
    fn test_payload_kind_agrees_with_tag() {
        for kind in SegmentKind::ALL {
            let payload = SegmentPayload::empty(kind);
            assert_eq!(payload.kind(), kind);

            let json = serde_json::to_value(&payload).unwrap();
            assert_eq!(json["kind"], kind.as_str());
        }
    }

    #[test]
    fn test_payload_roundtrip_every_kind() {
        for kind in SegmentKind::ALL {
            let payload = SegmentPayload::empty(kind);
            let json = serde_json::to_string(&payload).unwrap();
            let back: SegmentPayload = serde_json::from_str(&json).unwrap();
            assert_eq!(back, payload);
        }
    }

    #[test]
    fn test_payload_rejects_mismatched_shape() {
        // A carousel payload can't claim to be a posts segment.
        let json = serde_json::json!({
            "kind": "posts",
            "slides": [{"image_url": "/x.jpg"}],
            "page_size": "not a number",
        });
        assert!(serde_json::from_value::<SegmentPayload>(json).is_err());
    }

    #[test]
    fn test_payload_rejects_unknown_kind() {
        let json = serde_json::json!({"kind": "hero", "title": "x"});
        assert!(serde_json::from_value::<SegmentPayload>(json).is_err());
    }

    #[test]
    fn test_posts_payload_defaults() {
        let json = serde_json::json!({"kind": "posts"});
        let payload: SegmentPayload = serde_json::from_value(json).unwrap();
        let SegmentPayload::Posts {
            page_size,
            show_excerpts,
            heading,
        } = payload
        else {
            panic!("wrong variant");
        };
        assert_eq!(page_size, 10);
        assert!(show_excerpts);
        assert!(heading.is_none());
    }
}
