//! Database operations for the site `PostgreSQL` instance.
//!
//! # Tables (schema `site`)
//!
//! - `user` - Admin-panel authentication
//! - `page` - Pages with publish state
//! - `segment` - Typed content blocks attached to pages (JSONB payload)
//! - `post` - Blog-style entries under posts-kind segments
//! - `menu_item` - Navigation entries
//! - `settings` - Singleton site settings row
//! - `tower_sessions.session` - Session storage (tower-sessions)
//!
//! All queries use the runtime sqlx API (`query`/`query_as`) so the
//! workspace builds without a live database.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/site/migrations/` and run via:
//! ```bash
//! cargo run -p driftwood-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod menu;
pub mod pages;
pub mod posts;
pub mod segments;
pub mod settings;
pub mod users;

pub use menu::MenuRepository;
pub use pages::PageRepository;
pub use posts::PostRepository;
pub use segments::SegmentRepository;
pub use settings::SettingsRepository;
pub use users::UserRepository;

/// Error type shared by all repositories.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Query failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The requested entity does not exist.
    #[error("not found")]
    NotFound,

    /// A uniqueness or reference constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A stored value failed to parse back into its domain type.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

impl RepositoryError {
    /// Map a sqlx error to `Conflict` when it is a unique violation,
    /// passing other errors through as `Database`.
    pub(crate) fn from_unique_violation(e: sqlx::Error, message: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return Self::Conflict(message.to_owned());
        }
        Self::Database(e)
    }

    /// Map a sqlx error to `Conflict` when it is a foreign-key violation.
    pub(crate) fn from_fk_violation(e: sqlx::Error, message: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_foreign_key_violation()
        {
            return Self::Conflict(message.to_owned());
        }
        Self::Database(e)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
