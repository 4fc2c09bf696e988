//! Admin page management.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use driftwood_core::PageId;

use crate::actions;
use crate::actions::pages::PageInput;
use crate::db::PageRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

use super::{FlashQuery, with_error, with_notice};

/// A page row in the listing.
pub struct PageRow {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub status: String,
    pub path: String,
}

/// Page listing template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/pages/index.html")]
pub struct PagesIndexTemplate {
    pub pages: Vec<PageRow>,
    pub error: Option<String>,
    pub notice: Option<String>,
}

/// New page form template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/pages/new.html")]
pub struct PageNewTemplate {
    pub error: Option<String>,
}

/// Edit page form template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/pages/edit.html")]
pub struct PageEditTemplate {
    pub page: PageRow,
    pub error: Option<String>,
}

/// List all pages.
#[instrument(skip_all)]
pub async fn index(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Query(flash): Query<FlashQuery>,
) -> Result<PagesIndexTemplate> {
    let pages = PageRepository::new(state.pool()).list(None).await?;

    Ok(PagesIndexTemplate {
        pages: pages
            .iter()
            .map(|p| PageRow {
                id: p.id.as_i32(),
                title: p.title.clone(),
                slug: p.slug.as_str().to_owned(),
                status: p.status.to_string(),
                path: p.path(),
            })
            .collect(),
        error: flash.error,
        notice: flash.notice,
    })
}

/// Display the new page form.
pub async fn new_page(
    RequireAdmin(_user): RequireAdmin,
    Query(flash): Query<FlashQuery>,
) -> PageNewTemplate {
    PageNewTemplate { error: flash.error }
}

/// Create a page.
#[instrument(skip_all)]
pub async fn create(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Form(input): Form<PageInput>,
) -> Response {
    let response = actions::pages::create(&state, &user, input).await;
    if response.success {
        Redirect::to(&with_notice("/admin/pages", "Page created")).into_response()
    } else {
        let error = response.error.unwrap_or_default();
        Redirect::to(&with_error("/admin/pages/new", &error)).into_response()
    }
}

/// Display the edit page form.
#[instrument(skip_all)]
pub async fn edit(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(flash): Query<FlashQuery>,
) -> Result<PageEditTemplate> {
    let page = PageRepository::new(state.pool())
        .get_by_id(PageId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("page {id}")))?;

    Ok(PageEditTemplate {
        page: PageRow {
            id: page.id.as_i32(),
            title: page.title.clone(),
            slug: page.slug.as_str().to_owned(),
            status: page.status.to_string(),
            path: page.path(),
        },
        error: flash.error,
    })
}

/// Update a page.
#[instrument(skip_all)]
pub async fn update(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(input): Form<PageInput>,
) -> Response {
    let response = actions::pages::update(&state, PageId::new(id), input).await;
    if response.success {
        Redirect::to(&with_notice("/admin/pages", "Page saved")).into_response()
    } else {
        let error = response.error.unwrap_or_default();
        Redirect::to(&with_error(&format!("/admin/pages/{id}/edit"), &error)).into_response()
    }
}

/// Delete a page.
#[instrument(skip_all)]
pub async fn delete(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Response {
    let response = actions::pages::delete(&state, PageId::new(id)).await;
    if response.success {
        Redirect::to(&with_notice("/admin/pages", "Page deleted")).into_response()
    } else {
        let error = response.error.unwrap_or_default();
        Redirect::to(&with_error("/admin/pages", &error)).into_response()
    }
}
