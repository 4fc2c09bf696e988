//! Page repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use driftwood_core::{PageId, PublishStatus, Slug, UserId};

use super::RepositoryError;
use crate::models::Page;

/// Fields for creating a page.
#[derive(Debug)]
pub struct NewPage {
    pub title: String,
    pub slug: Slug,
    pub status: PublishStatus,
    pub created_by: UserId,
}

/// Fields for updating a page.
#[derive(Debug)]
pub struct PageUpdate {
    pub title: String,
    pub slug: Slug,
    pub status: PublishStatus,
}

#[derive(sqlx::FromRow)]
struct PageRow {
    id: i32,
    title: String,
    slug: String,
    status: String,
    created_by: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PageRow {
    fn into_domain(self) -> Result<Page, RepositoryError> {
        let slug = Slug::parse(&self.slug).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid slug in database: {e}"))
        })?;
        let status = self.status.parse::<PublishStatus>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;

        Ok(Page {
            id: PageId::new(self.id),
            title: self.title,
            slug,
            status,
            created_by: UserId::new(self.created_by),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const PAGE_COLUMNS: &str = "id, title, slug, status, created_by, created_at, updated_at";

/// Repository for page database operations.
pub struct PageRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PageRepository<'a> {
    /// Create a new page repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List pages, optionally filtered by status, ordered by title.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, status: Option<PublishStatus>) -> Result<Vec<Page>, RepositoryError> {
        let sql = format!(
            "SELECT {PAGE_COLUMNS} FROM site.page \
             WHERE $1::text IS NULL OR status = $1 \
             ORDER BY title ASC"
        );
        let rows = sqlx::query_as::<_, PageRow>(&sql)
            .bind(status.map(|s| s.to_string()))
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(PageRow::into_domain).collect()
    }

    /// Get a page by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: PageId) -> Result<Option<Page>, RepositoryError> {
        let sql = format!("SELECT {PAGE_COLUMNS} FROM site.page WHERE id = $1");
        let row = sqlx::query_as::<_, PageRow>(&sql)
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        row.map(PageRow::into_domain).transpose()
    }

    /// Get a published page by slug.
    ///
    /// Draft pages are invisible to this lookup; the public renderer treats
    /// them as absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_published_by_slug(&self, slug: &Slug) -> Result<Option<Page>, RepositoryError> {
        let sql = format!(
            "SELECT {PAGE_COLUMNS} FROM site.page WHERE slug = $1 AND status = 'published'"
        );
        let row = sqlx::query_as::<_, PageRow>(&sql)
            .bind(slug.as_str())
            .fetch_optional(self.pool)
            .await?;

        row.map(PageRow::into_domain).transpose()
    }

    /// First published page in title order, used when no page is named
    /// `home`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn first_published(&self) -> Result<Option<Page>, RepositoryError> {
        let sql = format!(
            "SELECT {PAGE_COLUMNS} FROM site.page WHERE status = 'published' \
             ORDER BY title ASC LIMIT 1"
        );
        let row = sqlx::query_as::<_, PageRow>(&sql)
            .fetch_optional(self.pool)
            .await?;

        row.map(PageRow::into_domain).transpose()
    }

    /// Create a new page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug collides with another
    /// published page, `RepositoryError::Database` for other failures.
    pub async fn create(&self, page: NewPage) -> Result<Page, RepositoryError> {
        let sql = format!(
            "INSERT INTO site.page (title, slug, status, created_by) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {PAGE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PageRow>(&sql)
            .bind(&page.title)
            .bind(page.slug.as_str())
            .bind(page.status.to_string())
            .bind(page.created_by.as_i32())
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_unique_violation(e, "a published page already uses this slug")
            })?;

        row.into_domain()
    }

    /// Update a page's title, slug, and status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the page doesn't exist,
    /// `RepositoryError::Conflict` on a published-slug collision.
    pub async fn update(&self, id: PageId, update: PageUpdate) -> Result<Page, RepositoryError> {
        let sql = format!(
            "UPDATE site.page \
             SET title = $2, slug = $3, status = $4, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {PAGE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PageRow>(&sql)
            .bind(id.as_i32())
            .bind(&update.title)
            .bind(update.slug.as_str())
            .bind(update.status.to_string())
            .fetch_optional(self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_unique_violation(e, "a published page already uses this slug")
            })?;

        row.ok_or(RepositoryError::NotFound)?.into_domain()
    }

    /// Delete a page. Its segments cascade; posts under a posts-kind
    /// segment block the delete.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the page doesn't exist,
    /// `RepositoryError::Conflict` while posts still reference one of its
    /// segments.
    pub async fn delete(&self, id: PageId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM site.page WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_fk_violation(
                    e,
                    "this page still has posts; delete them first",
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
