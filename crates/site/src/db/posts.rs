//! Post repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use driftwood_core::{PostId, PublishStatus, SegmentId, Slug, UserId};

use super::RepositoryError;
use crate::models::Post;

/// Fields for creating a post.
#[derive(Debug)]
pub struct NewPost {
    pub segment_id: SegmentId,
    pub title: String,
    pub slug: Slug,
    pub body: String,
    pub body_html: String,
    pub excerpt: String,
    pub status: PublishStatus,
    pub author_id: UserId,
}

/// Fields for updating a post.
#[derive(Debug)]
pub struct PostUpdate {
    pub title: String,
    pub slug: Slug,
    pub body: String,
    pub body_html: String,
    pub excerpt: String,
    pub status: PublishStatus,
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i32,
    segment_id: i32,
    title: String,
    slug: String,
    body: String,
    body_html: String,
    excerpt: String,
    status: String,
    author_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_domain(self) -> Result<Post, RepositoryError> {
        let slug = Slug::parse(&self.slug).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid slug in database: {e}"))
        })?;
        let status = self.status.parse::<PublishStatus>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;

        Ok(Post {
            id: PostId::new(self.id),
            segment_id: SegmentId::new(self.segment_id),
            title: self.title,
            slug,
            body: self.body,
            body_html: self.body_html,
            excerpt: self.excerpt,
            status,
            author_id: UserId::new(self.author_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const POST_COLUMNS: &str = "id, segment_id, title, slug, body, body_html, excerpt, status, \
                            author_id, created_at, updated_at";

/// Repository for post database operations.
pub struct PostRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PostRepository<'a> {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every post across all segments, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Post>, RepositoryError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM site.post ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(PostRow::into_domain).collect()
    }

    /// List a segment's posts, newest first, optionally published only.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_segment(
        &self,
        segment_id: SegmentId,
        published_only: bool,
    ) -> Result<Vec<Post>, RepositoryError> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM site.post \
             WHERE segment_id = $1 AND (NOT $2 OR status = 'published') \
             ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .bind(segment_id.as_i32())
            .bind(published_only)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(PostRow::into_domain).collect()
    }

    /// Get a post by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: PostId) -> Result<Option<Post>, RepositoryError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM site.post WHERE id = $1");
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        row.map(PostRow::into_domain).transpose()
    }

    /// Get a published post by slug within a segment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_published_by_slug(
        &self,
        segment_id: SegmentId,
        slug: &Slug,
    ) -> Result<Option<Post>, RepositoryError> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM site.post \
             WHERE segment_id = $1 AND slug = $2 AND status = 'published'"
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(segment_id.as_i32())
            .bind(slug.as_str())
            .fetch_optional(self.pool)
            .await?;

        row.map(PostRow::into_domain).transpose()
    }

    /// Create a new post.
    ///
    /// The caller is responsible for having checked that `segment_id`
    /// resolves to a posts-kind segment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug already exists within
    /// the segment or the segment is missing.
    pub async fn create(&self, post: NewPost) -> Result<Post, RepositoryError> {
        let sql = format!(
            "INSERT INTO site.post \
             (segment_id, title, slug, body, body_html, excerpt, status, author_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {POST_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(post.segment_id.as_i32())
            .bind(&post.title)
            .bind(post.slug.as_str())
            .bind(&post.body)
            .bind(&post.body_html)
            .bind(&post.excerpt)
            .bind(post.status.to_string())
            .bind(post.author_id.as_i32())
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_foreign_key_violation()
                {
                    return RepositoryError::Conflict("segment does not exist".to_owned());
                }
                RepositoryError::from_unique_violation(
                    e,
                    "a post in this segment already uses this slug",
                )
            })?;

        row.into_domain()
    }

    /// Update a post.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the post doesn't exist,
    /// `RepositoryError::Conflict` on a slug collision within the segment.
    pub async fn update(&self, id: PostId, update: PostUpdate) -> Result<Post, RepositoryError> {
        let sql = format!(
            "UPDATE site.post \
             SET title = $2, slug = $3, body = $4, body_html = $5, excerpt = $6, \
                 status = $7, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {POST_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id.as_i32())
            .bind(&update.title)
            .bind(update.slug.as_str())
            .bind(&update.body)
            .bind(&update.body_html)
            .bind(&update.excerpt)
            .bind(update.status.to_string())
            .fetch_optional(self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_unique_violation(
                    e,
                    "a post in this segment already uses this slug",
                )
            })?;

        row.ok_or(RepositoryError::NotFound)?.into_domain()
    }

    /// Delete a post.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the post doesn't exist.
    pub async fn delete(&self, id: PostId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM site.post WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
