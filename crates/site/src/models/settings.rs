//! Site settings domain type.

use serde::{Deserialize, Serialize};

/// Theming tokens applied to the public site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeTokens {
    pub primary_color: String,
    pub accent_color: String,
    pub font_family: String,
}

impl Default for ThemeTokens {
    fn default() -> Self {
        Self {
            primary_color: "#1f2937".to_owned(),
            accent_color: "#0ea5e9".to_owned(),
            font_family: "system-ui, sans-serif".to_owned(),
        }
    }
}

/// Singleton document holding site-wide settings.
///
/// Created lazily with [`SiteSettings::defaults`] the first time an admin
/// visits the settings page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSettings {
    pub site_name: String,
    pub tagline: String,
    pub logo_url: Option<String>,
    pub theme: ThemeTokens,
}

impl SiteSettings {
    /// The settings a fresh site starts with.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            site_name: "Driftwood".to_owned(),
            tagline: "A small marketing site".to_owned(),
            logo_url: None,
            theme: ThemeTokens::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_complete() {
        let settings = SiteSettings::defaults();
        assert!(!settings.site_name.is_empty());
        assert!(!settings.theme.primary_color.is_empty());
        assert!(settings.logo_url.is_none());
    }

    #[test]
    fn test_theme_serde_roundtrip() {
        let theme = ThemeTokens::default();
        let json = serde_json::to_string(&theme).unwrap();
        let back: ThemeTokens = serde_json::from_str(&json).unwrap();
        assert_eq!(back, theme);
    }
}
