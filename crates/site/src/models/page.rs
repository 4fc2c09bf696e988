//! Page domain type.

use chrono::{DateTime, Utc};

use driftwood_core::{PageId, PublishStatus, Slug, UserId};

/// A page: a named, sluggable ordered collection of segments with a publish
/// state. The segment list itself lives on the segments (page reference +
/// position), fetched separately when rendering.
#[derive(Debug, Clone)]
pub struct Page {
    /// Unique page ID.
    pub id: PageId,
    /// Page title, shown in navigation and the browser tab.
    pub title: String,
    /// URL slug; unique among published pages.
    pub slug: Slug,
    /// Publication state.
    pub status: PublishStatus,
    /// User who created the page.
    pub created_by: UserId,
    /// When the page was created.
    pub created_at: DateTime<Utc>,
    /// When the page was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Page {
    /// Public path for this page.
    #[must_use]
    pub fn path(&self) -> String {
        if self.slug.as_str() == "home" {
            "/".to_owned()
        } else {
            format!("/{}", self.slug)
        }
    }
}
