//! Publish status for pages and posts.

use serde::{Deserialize, Serialize};

/// Publication state of a page or post.
///
/// Draft content is visible only in the admin panel; published content is
/// rendered on the public site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PublishStatus {
    #[default]
    Draft,
    Published,
}

impl PublishStatus {
    /// Whether content with this status is publicly visible.
    #[must_use]
    pub const fn is_published(self) -> bool {
        matches!(self, Self::Published)
    }
}

impl std::fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Published => write!(f, "published"),
        }
    }
}

impl std::str::FromStr for PublishStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            _ => Err(format!("invalid publish status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_display_from_str_roundtrip() {
        for status in [PublishStatus::Draft, PublishStatus::Published] {
            let parsed = PublishStatus::from_str(&status.to_string()).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!(PublishStatus::from_str("archived").is_err());
        assert!(PublishStatus::from_str("PUBLISHED").is_err());
    }

    #[test]
    fn test_is_published() {
        assert!(PublishStatus::Published.is_published());
        assert!(!PublishStatus::Draft.is_published());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&PublishStatus::Published).unwrap();
        assert_eq!(json, "\"published\"");
    }
}
