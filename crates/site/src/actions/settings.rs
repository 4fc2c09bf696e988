//! Site settings actions.

use serde::{Deserialize, Serialize};

use crate::db::SettingsRepository;
use crate::models::{SiteSettings, ThemeTokens};
use crate::state::AppState;

use super::ActionResponse;

/// Form input for updating the site settings.
#[derive(Debug, Deserialize)]
pub struct SettingsInput {
    pub site_name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    pub primary_color: String,
    pub accent_color: String,
    pub font_family: String,
}

/// Settings echoed back to the form.
#[derive(Debug, Serialize)]
pub struct SettingsData {
    pub site_name: String,
    pub tagline: String,
    pub logo_url: Option<String>,
    pub theme: ThemeTokens,
}

impl From<&SiteSettings> for SettingsData {
    fn from(settings: &SiteSettings) -> Self {
        Self {
            site_name: settings.site_name.clone(),
            tagline: settings.tagline.clone(),
            logo_url: settings.logo_url.clone(),
            theme: settings.theme.clone(),
        }
    }
}

fn validate(input: &SettingsInput) -> Result<SiteSettings, String> {
    let site_name = input.site_name.trim();
    if site_name.is_empty() {
        return Err("Site name is required.".to_owned());
    }

    for (field, value) in [
        ("Primary color", &input.primary_color),
        ("Accent color", &input.accent_color),
    ] {
        let v = value.trim();
        if !v.starts_with('#') || !(4..=9).contains(&v.len()) {
            return Err(format!("{field} must be a hex color like #0ea5e9."));
        }
    }

    let logo_url = input
        .logo_url
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned);

    Ok(SiteSettings {
        site_name: site_name.to_owned(),
        tagline: input.tagline.trim().to_owned(),
        logo_url,
        theme: ThemeTokens {
            primary_color: input.primary_color.trim().to_owned(),
            accent_color: input.accent_color.trim().to_owned(),
            font_family: input.font_family.trim().to_owned(),
        },
    })
}

/// Update the site settings singleton.
pub async fn update(state: &AppState, input: SettingsInput) -> ActionResponse<SettingsData> {
    let validated = match validate(&input) {
        Ok(v) => v,
        Err(e) => return ActionResponse::fail(e),
    };

    let repo = SettingsRepository::new(state.pool());
    match repo.update(&validated).await {
        Ok(settings) => {
            // Settings render on every public page.
            state.invalidate_all_renders();
            tracing::info!("site settings updated");
            ActionResponse::ok(SettingsData::from(&settings))
        }
        Err(e) => ActionResponse::from_repo_error(&e),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input() -> SettingsInput {
        SettingsInput {
            site_name: "Driftwood".to_owned(),
            tagline: "A small marketing site".to_owned(),
            logo_url: None,
            primary_color: "#1f2937".to_owned(),
            accent_color: "#0ea5e9".to_owned(),
            font_family: "system-ui".to_owned(),
        }
    }

    #[test]
    fn test_validate_ok() {
        let settings = validate(&input()).unwrap();
        assert_eq!(settings.site_name, "Driftwood");
        assert_eq!(settings.theme.accent_color, "#0ea5e9");
    }

    #[test]
    fn test_validate_requires_site_name() {
        let mut bad = input();
        bad.site_name = "  ".to_owned();
        assert!(validate(&bad).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_colors() {
        let mut bad = input();
        bad.primary_color = "blue".to_owned();
        assert!(validate(&bad).is_err());
    }

    #[test]
    fn test_validate_blank_logo_is_none() {
        let mut with_blank = input();
        with_blank.logo_url = Some("   ".to_owned());
        assert!(validate(&with_blank).unwrap().logo_url.is_none());
    }
}
