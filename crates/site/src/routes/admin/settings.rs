//! Admin site settings.
//!
//! Visiting the settings page creates the singleton with defaults on first
//! use; the upsert in the repository makes that happen exactly once even
//! under concurrent first visits.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use crate::actions;
use crate::actions::settings::SettingsInput;
use crate::db::SettingsRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

use super::{FlashQuery, with_error, with_notice};

/// Settings page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/settings.html")]
pub struct SettingsTemplate {
    pub site_name: String,
    pub tagline: String,
    pub logo_url: String,
    pub primary_color: String,
    pub accent_color: String,
    pub font_family: String,
    pub error: Option<String>,
    pub notice: Option<String>,
}

/// Display the settings page, creating defaults on first visit.
#[instrument(skip_all)]
pub async fn index(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Query(flash): Query<FlashQuery>,
) -> Result<SettingsTemplate> {
    let settings = SettingsRepository::new(state.pool()).get_or_create().await?;

    Ok(SettingsTemplate {
        site_name: settings.site_name,
        tagline: settings.tagline,
        logo_url: settings.logo_url.unwrap_or_default(),
        primary_color: settings.theme.primary_color,
        accent_color: settings.theme.accent_color,
        font_family: settings.theme.font_family,
        error: flash.error,
        notice: flash.notice,
    })
}

/// Update the settings.
#[instrument(skip_all)]
pub async fn update(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Form(input): Form<SettingsInput>,
) -> Response {
    let response = actions::settings::update(&state, input).await;
    if response.success {
        Redirect::to(&with_notice("/admin/settings", "Settings saved")).into_response()
    } else {
        let error = response.error.unwrap_or_default();
        Redirect::to(&with_error("/admin/settings", &error)).into_response()
    }
}
