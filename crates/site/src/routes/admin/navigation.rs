//! Admin navigation menu management.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use driftwood_core::MenuItemId;

use crate::actions;
use crate::actions::ActionResponse;
use crate::actions::navigation::NavigationInput;
use crate::db::{MenuRepository, PageRepository};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::MenuTarget;
use crate::state::AppState;

use super::{FlashQuery, with_error, with_notice};

/// A menu item row in the listing.
pub struct MenuRow {
    pub id: i32,
    pub label: String,
    pub target: String,
    pub visible: bool,
    pub position: i32,
}

/// A page option in the menu form.
pub struct PageOption {
    pub id: i32,
    pub title: String,
}

/// Navigation listing + form template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/navigation.html")]
pub struct NavigationTemplate {
    pub items: Vec<MenuRow>,
    pub pages: Vec<PageOption>,
    pub error: Option<String>,
    pub notice: Option<String>,
}

/// JSON body for reordering.
#[derive(Debug, Deserialize)]
pub struct PositionBody {
    pub position: i32,
}

/// List menu items and show the add form.
#[instrument(skip_all)]
pub async fn index(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Query(flash): Query<FlashQuery>,
) -> Result<NavigationTemplate> {
    let items = MenuRepository::new(state.pool()).list().await?;
    let pages = PageRepository::new(state.pool()).list(None).await?;

    let rows = items
        .iter()
        .map(|item| {
            let target = match &item.target {
                MenuTarget::Page { page_id } => pages
                    .iter()
                    .find(|p| p.id == *page_id)
                    .map_or_else(|| format!("page {page_id}"), |p| p.title.clone()),
                MenuTarget::Url { url } => url.clone(),
            };
            MenuRow {
                id: item.id.as_i32(),
                label: item.label.clone(),
                target,
                visible: item.visible,
                position: item.position,
            }
        })
        .collect();

    Ok(NavigationTemplate {
        items: rows,
        pages: pages
            .iter()
            .map(|p| PageOption {
                id: p.id.as_i32(),
                title: p.title.clone(),
            })
            .collect(),
        error: flash.error,
        notice: flash.notice,
    })
}

/// Create a menu item.
#[instrument(skip_all)]
pub async fn create(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Form(input): Form<NavigationInput>,
) -> Response {
    let response = actions::navigation::create(&state, input).await;
    if response.success {
        Redirect::to(&with_notice("/admin/navigation", "Menu item added")).into_response()
    } else {
        let error = response.error.unwrap_or_default();
        Redirect::to(&with_error("/admin/navigation", &error)).into_response()
    }
}

/// Update a menu item.
#[instrument(skip_all)]
pub async fn update(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(input): Form<NavigationInput>,
) -> Response {
    let response = actions::navigation::update(&state, MenuItemId::new(id), input).await;
    if response.success {
        Redirect::to(&with_notice("/admin/navigation", "Menu item saved")).into_response()
    } else {
        let error = response.error.unwrap_or_default();
        Redirect::to(&with_error("/admin/navigation", &error)).into_response()
    }
}

/// Delete a menu item.
#[instrument(skip_all)]
pub async fn delete(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Response {
    let response = actions::navigation::delete(&state, MenuItemId::new(id)).await;
    if response.success {
        Redirect::to(&with_notice("/admin/navigation", "Menu item removed")).into_response()
    } else {
        let error = response.error.unwrap_or_default();
        Redirect::to(&with_error("/admin/navigation", &error)).into_response()
    }
}

/// Reorder a menu item (JSON API).
#[instrument(skip_all)]
pub async fn reorder(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<PositionBody>,
) -> Json<ActionResponse<()>> {
    Json(actions::navigation::reorder(&state, MenuItemId::new(id), body.position).await)
}
