//! Navigation menu actions.

use serde::{Deserialize, Serialize};

use driftwood_core::{MenuItemId, PageId};

use crate::db::menu::{MenuItemInput, MenuRepository};
use crate::models::{MenuItem, MenuTarget};
use crate::state::AppState;

use super::ActionResponse;

/// Form input for creating or updating a menu item. Exactly one of
/// `page_id` and `url` must be set. An unchecked `visible` box sends
/// nothing, which deserializes to hidden.
#[derive(Debug, Deserialize)]
pub struct NavigationInput {
    pub label: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page_id: Option<i32>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub visible: bool,
}

/// HTML selects submit their empty option as an empty string.
fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<i32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Menu item fields echoed back to the form.
#[derive(Debug, Serialize)]
pub struct NavigationData {
    pub id: MenuItemId,
    pub label: String,
    pub target: MenuTarget,
    pub visible: bool,
    pub position: i32,
}

impl From<&MenuItem> for NavigationData {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id,
            label: item.label.clone(),
            target: item.target.clone(),
            visible: item.visible,
            position: item.position,
        }
    }
}

fn validate(input: &NavigationInput) -> Result<MenuItemInput, String> {
    let label = input.label.trim();
    if label.is_empty() {
        return Err("Label is required.".to_owned());
    }

    let url = input.url.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let target = match (input.page_id, url) {
        (Some(page_id), None) => MenuTarget::Page {
            page_id: PageId::new(page_id),
        },
        (None, Some(url)) => MenuTarget::Url {
            url: url.to_owned(),
        },
        _ => return Err("Choose either a page or a URL, not both.".to_owned()),
    };

    Ok(MenuItemInput {
        label: label.to_owned(),
        target,
        visible: input.visible,
    })
}

/// Create a menu item at the end of the menu.
pub async fn create(state: &AppState, input: NavigationInput) -> ActionResponse<NavigationData> {
    let validated = match validate(&input) {
        Ok(v) => v,
        Err(e) => return ActionResponse::fail(e),
    };

    let repo = MenuRepository::new(state.pool());
    match repo.create(validated).await {
        Ok(item) => {
            // Navigation renders on every public page.
            state.invalidate_all_renders();
            tracing::info!(menu_item_id = %item.id, "menu item created");
            ActionResponse::ok(NavigationData::from(&item))
        }
        Err(e) => ActionResponse::from_repo_error(&e),
    }
}

/// Update a menu item.
pub async fn update(
    state: &AppState,
    id: MenuItemId,
    input: NavigationInput,
) -> ActionResponse<NavigationData> {
    let validated = match validate(&input) {
        Ok(v) => v,
        Err(e) => return ActionResponse::fail(e),
    };

    let repo = MenuRepository::new(state.pool());
    match repo.update(id, validated).await {
        Ok(item) => {
            state.invalidate_all_renders();
            tracing::info!(menu_item_id = %item.id, "menu item updated");
            ActionResponse::ok(NavigationData::from(&item))
        }
        Err(e) => ActionResponse::from_repo_error(&e),
    }
}

/// Move a menu item to a new position.
pub async fn reorder(state: &AppState, id: MenuItemId, position: i32) -> ActionResponse<()> {
    let repo = MenuRepository::new(state.pool());
    match repo.update_position(id, position).await {
        Ok(()) => {
            state.invalidate_all_renders();
            ActionResponse::ok_empty()
        }
        Err(e) => ActionResponse::from_repo_error(&e),
    }
}

/// Delete a menu item.
pub async fn delete(state: &AppState, id: MenuItemId) -> ActionResponse<()> {
    let repo = MenuRepository::new(state.pool());
    match repo.delete(id).await {
        Ok(()) => {
            state.invalidate_all_renders();
            tracing::info!(menu_item_id = %id, "menu item deleted");
            ActionResponse::ok_empty()
        }
        Err(e) => ActionResponse::from_repo_error(&e),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_label() {
        let input = NavigationInput {
            label: " ".to_owned(),
            page_id: Some(1),
            url: None,
            visible: true,
        };
        assert!(validate(&input).is_err());
    }

    #[test]
    fn test_validate_requires_exactly_one_target() {
        let both = NavigationInput {
            label: "Home".to_owned(),
            page_id: Some(1),
            url: Some("https://example.com".to_owned()),
            visible: true,
        };
        assert!(validate(&both).is_err());

        let neither = NavigationInput {
            label: "Home".to_owned(),
            page_id: None,
            url: None,
            visible: true,
        };
        assert!(validate(&neither).is_err());
    }

    #[test]
    fn test_validate_page_target() {
        let input = NavigationInput {
            label: "Home".to_owned(),
            page_id: Some(3),
            url: None,
            visible: true,
        };
        let validated = validate(&input).unwrap();
        assert_eq!(
            validated.target,
            MenuTarget::Page {
                page_id: PageId::new(3)
            }
        );
    }

    #[test]
    fn test_validate_blank_url_counts_as_unset() {
        let input = NavigationInput {
            label: "Home".to_owned(),
            page_id: Some(3),
            url: Some("  ".to_owned()),
            visible: false,
        };
        let validated = validate(&input).unwrap();
        assert!(!validated.visible);
        assert!(matches!(validated.target, MenuTarget::Page { .. }));
    }
}
