//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use crate::config::SiteConfig;
use crate::services::MailerClient;

/// Maximum number of rendered public pages kept in the cache.
const RENDER_CACHE_CAPACITY: u64 = 256;

/// Time-to-live for cached renders; writes invalidate affected paths long
/// before this expires, the TTL only bounds staleness after missed
/// invalidations.
const RENDER_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration. No
/// authoritative entity state lives here - every request re-fetches from
/// the store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    pool: PgPool,
    mailer: Option<MailerClient>,
    render_cache: Cache<String, String>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the mailer client cannot be constructed from the
    /// configured credentials.
    pub fn new(config: SiteConfig, pool: PgPool) -> Result<Self, crate::services::MailerError> {
        let mailer = config
            .mailer
            .as_ref()
            .map(MailerClient::new)
            .transpose()?;

        let render_cache = Cache::builder()
            .max_capacity(RENDER_CACHE_CAPACITY)
            .time_to_live(RENDER_CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                mailer,
                render_cache,
            }),
        })
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get the mailer client, if one is configured.
    #[must_use]
    pub fn mailer(&self) -> Option<&MailerClient> {
        self.inner.mailer.as_ref()
    }

    /// Look up a cached render of a public path.
    pub async fn cached_render(&self, path: &str) -> Option<String> {
        self.inner.render_cache.get(path).await
    }

    /// Store a rendered public page under its path.
    pub async fn store_render(&self, path: String, html: String) {
        self.inner.render_cache.insert(path, html).await;
    }

    /// Drop cached renders for the given public paths.
    ///
    /// Server actions call this after every successful write so the public
    /// site reflects the change on the next request.
    pub async fn invalidate_paths(&self, paths: &[String]) {
        for path in paths {
            self.inner.render_cache.invalidate(path).await;
        }
        tracing::debug!(?paths, "render cache invalidated");
    }

    /// Drop every cached render. Used by writes with site-wide effect
    /// (settings, navigation).
    pub fn invalidate_all_renders(&self) {
        self.inner.render_cache.invalidate_all();
        tracing::debug!("render cache fully invalidated");
    }
}
