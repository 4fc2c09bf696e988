//! Segment repository.

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::PgPool;

use driftwood_core::{PageId, SegmentId, UserId};

use super::RepositoryError;
use crate::models::{Segment, SegmentKind, SegmentPayload};

/// Fields for creating a segment. The kind is carried by the payload; the
/// position is assigned at the end of the page.
#[derive(Debug)]
pub struct NewSegment {
    pub page_id: PageId,
    pub payload: SegmentPayload,
    pub created_by: UserId,
}

#[derive(sqlx::FromRow)]
struct SegmentRow {
    id: i32,
    page_id: i32,
    kind: String,
    payload: JsonValue,
    position: i32,
    created_by: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SegmentRow {
    fn into_domain(self) -> Result<Segment, RepositoryError> {
        let payload: SegmentPayload = serde_json::from_value(self.payload).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid segment payload in database: {e}"))
        })?;

        // The kind column exists for SQL filtering; the payload tag is
        // authoritative and the two must agree.
        if payload.kind().as_str() != self.kind {
            return Err(RepositoryError::DataCorruption(format!(
                "segment {} kind column '{}' disagrees with payload '{}'",
                self.id,
                self.kind,
                payload.kind()
            )));
        }

        Ok(Segment {
            id: SegmentId::new(self.id),
            page_id: PageId::new(self.page_id),
            payload,
            position: self.position,
            created_by: UserId::new(self.created_by),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const SEGMENT_COLUMNS: &str =
    "id, page_id, kind, payload, position, created_by, created_at, updated_at";

/// Repository for segment database operations.
pub struct SegmentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SegmentRepository<'a> {
    /// Create a new segment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List segments, optionally filtered by kind, ordered by page and
    /// position.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, kind: Option<SegmentKind>) -> Result<Vec<Segment>, RepositoryError> {
        let sql = format!(
            "SELECT {SEGMENT_COLUMNS} FROM site.segment \
             WHERE $1::text IS NULL OR kind = $1 \
             ORDER BY page_id ASC, position ASC"
        );
        let rows = sqlx::query_as::<_, SegmentRow>(&sql)
            .bind(kind.map(|k| k.as_str().to_owned()))
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(SegmentRow::into_domain).collect()
    }

    /// List a page's segments in render order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_page(&self, page_id: PageId) -> Result<Vec<Segment>, RepositoryError> {
        let sql = format!(
            "SELECT {SEGMENT_COLUMNS} FROM site.segment \
             WHERE page_id = $1 ORDER BY position ASC"
        );
        let rows = sqlx::query_as::<_, SegmentRow>(&sql)
            .bind(page_id.as_i32())
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(SegmentRow::into_domain).collect()
    }

    /// Get a segment by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: SegmentId) -> Result<Option<Segment>, RepositoryError> {
        let sql = format!("SELECT {SEGMENT_COLUMNS} FROM site.segment WHERE id = $1");
        let row = sqlx::query_as::<_, SegmentRow>(&sql)
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        row.map(SegmentRow::into_domain).transpose()
    }

    /// Create a segment at the end of its page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the page doesn't exist,
    /// `RepositoryError::Database` for other failures.
    pub async fn create(&self, segment: NewSegment) -> Result<Segment, RepositoryError> {
        let payload_json = serde_json::to_value(&segment.payload).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize payload: {e}"))
        })?;

        let sql = format!(
            "INSERT INTO site.segment (page_id, kind, payload, position, created_by) \
             SELECT $1, $2, $3, COALESCE(MAX(position) + 1, 0), $4 \
             FROM site.segment WHERE page_id = $1 \
             RETURNING {SEGMENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, SegmentRow>(&sql)
            .bind(segment.page_id.as_i32())
            .bind(segment.payload.kind().as_str())
            .bind(&payload_json)
            .bind(segment.created_by.as_i32())
            .fetch_one(self.pool)
            .await
            .map_err(|e| RepositoryError::from_fk_violation(e, "page does not exist"))?;

        row.into_domain()
    }

    /// Replace a segment's payload. The kind cannot change after creation;
    /// a payload of a different kind is rejected.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the segment doesn't exist,
    /// `RepositoryError::Conflict` when the payload kind differs from the
    /// stored kind.
    pub async fn update_payload(
        &self,
        id: SegmentId,
        payload: &SegmentPayload,
    ) -> Result<Segment, RepositoryError> {
        let payload_json = serde_json::to_value(payload).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize payload: {e}"))
        })?;

        let sql = format!(
            "UPDATE site.segment SET payload = $2, updated_at = NOW() \
             WHERE id = $1 AND kind = $3 \
             RETURNING {SEGMENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, SegmentRow>(&sql)
            .bind(id.as_i32())
            .bind(&payload_json)
            .bind(payload.kind().as_str())
            .fetch_optional(self.pool)
            .await?;

        match row {
            Some(r) => r.into_domain(),
            None => {
                // Distinguish a missing segment from a kind mismatch.
                if self.get_by_id(id).await?.is_some() {
                    Err(RepositoryError::Conflict(
                        "a segment's kind cannot change".to_owned(),
                    ))
                } else {
                    Err(RepositoryError::NotFound)
                }
            }
        }
    }

    /// Move a segment to a new position within its page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the segment doesn't exist.
    pub async fn update_position(
        &self,
        id: SegmentId,
        position: i32,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE site.segment SET position = $2, updated_at = NOW() WHERE id = $1")
                .bind(id.as_i32())
                .bind(position)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Count posts attached to a segment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn post_count(&self, id: SegmentId) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM site.post WHERE segment_id = $1")
            .bind(id.as_i32())
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Delete a segment.
    ///
    /// A posts-kind segment that still has posts is not deleted; the posts
    /// must go first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the segment doesn't exist,
    /// `RepositoryError::Conflict` while posts still reference it.
    pub async fn delete(&self, id: SegmentId) -> Result<(), RepositoryError> {
        if self.post_count(id).await? > 0 {
            return Err(RepositoryError::Conflict(
                "this segment still has posts; delete them first".to_owned(),
            ));
        }

        let result = sqlx::query("DELETE FROM site.segment WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_fk_violation(
                    e,
                    "this segment still has posts; delete them first",
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
