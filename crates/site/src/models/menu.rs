//! Navigation menu domain types.

use serde::{Deserialize, Serialize};

use driftwood_core::{MenuItemId, PageId};

/// Where a menu item points: an internal page or an external URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MenuTarget {
    /// An internal page, linked by ID so renames follow automatically.
    Page { page_id: PageId },
    /// An arbitrary URL.
    Url { url: String },
}

/// A navigation menu entry.
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// Unique menu item ID.
    pub id: MenuItemId,
    /// Label shown in the navigation bar.
    pub label: String,
    /// Link target.
    pub target: MenuTarget,
    /// Hidden items stay in the admin panel but are not rendered publicly.
    pub visible: bool,
    /// Ordering key (ascending).
    pub position: i32,
}

/// A resolved navigation link ready for rendering: page targets have been
/// joined to their slug, URL targets pass through.
#[derive(Debug, Clone)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_target_serde_page() {
        let target = MenuTarget::Page {
            page_id: PageId::new(4),
        };
        let json = serde_json::to_value(&target).unwrap();
        assert_eq!(json["type"], "page");
        assert_eq!(json["page_id"], 4);

        let back: MenuTarget = serde_json::from_value(json).unwrap();
        assert_eq!(back, target);
    }

    #[test]
    fn test_target_serde_url() {
        let target = MenuTarget::Url {
            url: "https://example.com".to_string(),
        };
        let json = serde_json::to_string(&target).unwrap();
        let back: MenuTarget = serde_json::from_str(&json).unwrap();
        assert_eq!(back, target);
    }
}
