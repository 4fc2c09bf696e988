//! Site settings repository.
//!
//! Settings are a singleton row; theming tokens are stored as JSONB.

use serde_json::Value as JsonValue;
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::{SiteSettings, ThemeTokens};

#[derive(sqlx::FromRow)]
struct SettingsRow {
    site_name: String,
    tagline: String,
    logo_url: Option<String>,
    theme: JsonValue,
}

impl SettingsRow {
    fn into_domain(self) -> Result<SiteSettings, RepositoryError> {
        let theme: ThemeTokens = serde_json::from_value(self.theme).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid theme in database: {e}"))
        })?;

        Ok(SiteSettings {
            site_name: self.site_name,
            tagline: self.tagline,
            logo_url: self.logo_url,
            theme,
        })
    }
}

const SETTINGS_COLUMNS: &str = "site_name, tagline, logo_url, theme";

/// Repository for the site settings singleton.
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the settings row, if it exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self) -> Result<Option<SiteSettings>, RepositoryError> {
        let sql = format!("SELECT {SETTINGS_COLUMNS} FROM site.settings WHERE id");
        let row = sqlx::query_as::<_, SettingsRow>(&sql)
            .fetch_optional(self.pool)
            .await?;

        row.map(SettingsRow::into_domain).transpose()
    }

    /// Get the settings, creating the singleton with defaults on first use.
    ///
    /// The insert is `ON CONFLICT DO NOTHING`, so concurrent first visits
    /// create the row exactly once.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_or_create(&self) -> Result<SiteSettings, RepositoryError> {
        if let Some(settings) = self.get().await? {
            return Ok(settings);
        }

        let defaults = SiteSettings::defaults();
        let theme_json = serde_json::to_value(&defaults.theme).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize theme: {e}"))
        })?;

        sqlx::query(
            "INSERT INTO site.settings (id, site_name, tagline, logo_url, theme) \
             VALUES (TRUE, $1, $2, $3, $4) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(&defaults.site_name)
        .bind(&defaults.tagline)
        .bind(&defaults.logo_url)
        .bind(&theme_json)
        .execute(self.pool)
        .await?;

        tracing::info!("Site settings created with defaults");

        // Re-read: a concurrent request may have won the insert.
        self.get().await?.ok_or(RepositoryError::NotFound)
    }

    /// Replace the settings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update(&self, settings: &SiteSettings) -> Result<SiteSettings, RepositoryError> {
        let theme_json = serde_json::to_value(&settings.theme).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize theme: {e}"))
        })?;

        let sql = format!(
            "INSERT INTO site.settings (id, site_name, tagline, logo_url, theme) \
             VALUES (TRUE, $1, $2, $3, $4) \
             ON CONFLICT (id) DO UPDATE \
             SET site_name = $1, tagline = $2, logo_url = $3, theme = $4, updated_at = NOW() \
             RETURNING {SETTINGS_COLUMNS}"
        );
        let row = sqlx::query_as::<_, SettingsRow>(&sql)
            .bind(&settings.site_name)
            .bind(&settings.tagline)
            .bind(&settings.logo_url)
            .bind(&theme_json)
            .fetch_one(self.pool)
            .await?;

        row.into_domain()
    }
}
