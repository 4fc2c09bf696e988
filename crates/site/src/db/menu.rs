//! Navigation menu repository.

use sqlx::PgPool;

use driftwood_core::{MenuItemId, PageId};

use super::RepositoryError;
use crate::models::{MenuItem, MenuTarget, NavLink};

/// Fields for creating or updating a menu item.
#[derive(Debug)]
pub struct MenuItemInput {
    pub label: String,
    pub target: MenuTarget,
    pub visible: bool,
}

#[derive(sqlx::FromRow)]
struct MenuItemRow {
    id: i32,
    label: String,
    page_id: Option<i32>,
    url: Option<String>,
    visible: bool,
    position: i32,
}

impl MenuItemRow {
    fn into_domain(self) -> Result<MenuItem, RepositoryError> {
        let target = match (self.page_id, self.url) {
            (Some(page_id), None) => MenuTarget::Page {
                page_id: PageId::new(page_id),
            },
            (None, Some(url)) => MenuTarget::Url { url },
            _ => {
                return Err(RepositoryError::DataCorruption(format!(
                    "menu item {} must have exactly one of page_id and url",
                    self.id
                )));
            }
        };

        Ok(MenuItem {
            id: MenuItemId::new(self.id),
            label: self.label,
            target,
            visible: self.visible,
            position: self.position,
        })
    }
}

/// Split a target into its nullable column pair.
fn target_columns(target: &MenuTarget) -> (Option<i32>, Option<&String>) {
    match target {
        MenuTarget::Page { page_id } => (Some(page_id.as_i32()), None),
        MenuTarget::Url { url } => (None, Some(url)),
    }
}

const MENU_COLUMNS: &str = "id, label, page_id, url, visible, position";

/// Repository for navigation menu database operations.
pub struct MenuRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MenuRepository<'a> {
    /// Create a new menu repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all menu items in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<MenuItem>, RepositoryError> {
        let sql = format!("SELECT {MENU_COLUMNS} FROM site.menu_item ORDER BY position ASC");
        let rows = sqlx::query_as::<_, MenuItemRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(MenuItemRow::into_domain).collect()
    }

    /// Get a menu item by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: MenuItemId) -> Result<Option<MenuItem>, RepositoryError> {
        let sql = format!("SELECT {MENU_COLUMNS} FROM site.menu_item WHERE id = $1");
        let row = sqlx::query_as::<_, MenuItemRow>(&sql)
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        row.map(MenuItemRow::into_domain).transpose()
    }

    /// Resolved navigation links for the public site: visible items only,
    /// page targets joined to their published slug. Page targets whose page
    /// is missing or unpublished are skipped.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn nav_links(&self) -> Result<Vec<NavLink>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct NavRow {
            label: String,
            url: Option<String>,
            slug: Option<String>,
        }

        let rows = sqlx::query_as::<_, NavRow>(
            "SELECT m.label, m.url, p.slug \
             FROM site.menu_item m \
             LEFT JOIN site.page p ON p.id = m.page_id AND p.status = 'published' \
             WHERE m.visible \
             ORDER BY m.position ASC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|r| {
                let href = match (r.url, r.slug) {
                    (Some(url), _) => url,
                    (None, Some(slug)) if slug == "home" => "/".to_owned(),
                    (None, Some(slug)) => format!("/{slug}"),
                    (None, None) => return None,
                };
                Some(NavLink {
                    label: r.label,
                    href,
                })
            })
            .collect())
    }

    /// Create a menu item at the end of the menu.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a page target doesn't exist.
    pub async fn create(&self, input: MenuItemInput) -> Result<MenuItem, RepositoryError> {
        let (page_id, url) = target_columns(&input.target);

        let sql = format!(
            "INSERT INTO site.menu_item (label, page_id, url, visible, position) \
             SELECT $1, $2, $3, $4, COALESCE(MAX(position) + 1, 0) \
             FROM site.menu_item \
             RETURNING {MENU_COLUMNS}"
        );
        let row = sqlx::query_as::<_, MenuItemRow>(&sql)
            .bind(&input.label)
            .bind(page_id)
            .bind(url)
            .bind(input.visible)
            .fetch_one(self.pool)
            .await
            .map_err(|e| RepositoryError::from_fk_violation(e, "page does not exist"))?;

        row.into_domain()
    }

    /// Update a menu item's label, target, and visibility.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist,
    /// `RepositoryError::Conflict` if a page target doesn't exist.
    pub async fn update(
        &self,
        id: MenuItemId,
        input: MenuItemInput,
    ) -> Result<MenuItem, RepositoryError> {
        let (page_id, url) = target_columns(&input.target);

        let sql = format!(
            "UPDATE site.menu_item \
             SET label = $2, page_id = $3, url = $4, visible = $5 \
             WHERE id = $1 \
             RETURNING {MENU_COLUMNS}"
        );
        let row = sqlx::query_as::<_, MenuItemRow>(&sql)
            .bind(id.as_i32())
            .bind(&input.label)
            .bind(page_id)
            .bind(url)
            .bind(input.visible)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| RepositoryError::from_fk_violation(e, "page does not exist"))?;

        row.ok_or(RepositoryError::NotFound)?.into_domain()
    }

    /// Move a menu item to a new position.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    pub async fn update_position(
        &self,
        id: MenuItemId,
        position: i32,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE site.menu_item SET position = $2 WHERE id = $1")
            .bind(id.as_i32())
            .bind(position)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a menu item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    pub async fn delete(&self, id: MenuItemId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM site.menu_item WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
