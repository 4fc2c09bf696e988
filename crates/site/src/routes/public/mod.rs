//! Public site route handlers.
//!
//! Everything here renders published content only and is safe for
//! anonymous visitors. Rendered pages are cached by path; server actions
//! invalidate affected paths on every write.

pub mod contact;
pub mod page;

use crate::db::{MenuRepository, SettingsRepository};
use crate::error::Result;
use crate::models::SiteSettings;
use crate::state::AppState;

/// A resolved navigation link for templates.
pub struct NavLinkView {
    pub label: String,
    pub href: String,
}

/// Shared chrome of every public page: settings plus navigation.
pub struct SiteChrome {
    pub site_name: String,
    pub tagline: String,
    pub logo_url: Option<String>,
    pub primary_color: String,
    pub accent_color: String,
    pub font_family: String,
    pub nav: Vec<NavLinkView>,
}

/// Load the chrome. Settings and navigation have no ordering dependency,
/// so both reads run concurrently.
pub async fn load_chrome(state: &AppState) -> Result<SiteChrome> {
    let settings_repo = SettingsRepository::new(state.pool());
    let menu_repo = MenuRepository::new(state.pool());

    let (settings, nav_links) = tokio::join!(settings_repo.get(), menu_repo.nav_links());

    // A site that has never seen an admin renders with defaults.
    let settings = settings?.unwrap_or_else(SiteSettings::defaults);
    let nav_links = nav_links?;

    Ok(SiteChrome {
        site_name: settings.site_name,
        tagline: settings.tagline,
        logo_url: settings.logo_url,
        primary_color: settings.theme.primary_color,
        accent_color: settings.theme.accent_color,
        font_family: settings.theme.font_family,
        nav: nav_links
            .into_iter()
            .map(|link| NavLinkView {
                label: link.label,
                href: link.href,
            })
            .collect(),
    })
}
