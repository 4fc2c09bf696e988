//! Post domain type.

use chrono::{DateTime, Utc};

use driftwood_core::{PostId, PublishStatus, SegmentId, Slug, UserId};

/// A blog-style entry belonging to a posts-kind segment.
#[derive(Debug, Clone)]
pub struct Post {
    /// Unique post ID.
    pub id: PostId,
    /// The posts-kind segment this entry belongs to.
    pub segment_id: SegmentId,
    /// Post title.
    pub title: String,
    /// URL slug; unique within the segment.
    pub slug: Slug,
    /// Markdown source of the body.
    pub body: String,
    /// Body rendered to HTML at write time.
    pub body_html: String,
    /// Plain-text excerpt for listings.
    pub excerpt: String,
    /// Publication state.
    pub status: PublishStatus,
    /// Post author.
    pub author_id: UserId,
    /// When the post was created.
    pub created_at: DateTime<Utc>,
    /// When the post was last updated.
    pub updated_at: DateTime<Utc>,
}
