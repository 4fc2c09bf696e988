//! Admin segment management.

use std::collections::HashMap;
use std::str::FromStr;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::instrument;

use driftwood_core::SegmentId;

use crate::actions;
use crate::actions::ActionResponse;
use crate::actions::segments::SegmentInput;
use crate::db::{PageRepository, SegmentRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::{SegmentKind, SegmentPayload};
use crate::state::AppState;

use super::{FlashQuery, with_error, with_notice};

/// A segment row in the listing.
pub struct SegmentRow {
    pub id: i32,
    pub kind: &'static str,
    pub kind_label: &'static str,
    pub page_title: String,
    pub position: i32,
    pub is_posts: bool,
}

/// A page option in the new-segment form.
pub struct PageOption {
    pub id: i32,
    pub title: String,
}

/// Segment listing template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/segments/index.html")]
pub struct SegmentsIndexTemplate {
    pub segments: Vec<SegmentRow>,
    pub kinds: Vec<KindOption>,
    pub error: Option<String>,
    pub notice: Option<String>,
}

/// A segment kind option for the "new segment" links.
pub struct KindOption {
    pub kind: &'static str,
    pub label: &'static str,
}

/// New segment form template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/segments/new.html")]
pub struct SegmentNewTemplate {
    pub kind: &'static str,
    pub kind_label: &'static str,
    pub pages: Vec<PageOption>,
    pub payload_json: String,
    pub error: Option<String>,
}

/// Edit segment form template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/segments/edit.html")]
pub struct SegmentEditTemplate {
    pub id: i32,
    pub kind: &'static str,
    pub kind_label: &'static str,
    pub page_title: String,
    pub payload_json: String,
    pub is_posts: bool,
    pub error: Option<String>,
}

/// Form input for creating a segment; the payload arrives as a JSON string
/// from a textarea.
#[derive(Debug, Deserialize)]
pub struct SegmentForm {
    pub page_id: i32,
    pub kind: String,
    pub payload: String,
}

/// Form input for updating a segment's payload.
#[derive(Debug, Deserialize)]
pub struct SegmentUpdateForm {
    pub payload: String,
}

/// JSON body for reordering.
#[derive(Debug, Deserialize)]
pub struct PositionBody {
    pub position: i32,
}

/// Pretty-print a payload for the editor textarea, without the internal
/// discriminant field (the kind is fixed by the route).
fn payload_editor_json(payload: &SegmentPayload) -> String {
    let mut value = serde_json::to_value(payload).unwrap_or(JsonValue::Null);
    if let JsonValue::Object(ref mut map) = value {
        map.remove("kind");
    }
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_owned())
}

/// Page titles keyed by page ID, for the listing.
async fn page_titles(state: &AppState) -> Result<HashMap<i32, String>> {
    let pages = PageRepository::new(state.pool()).list(None).await?;
    Ok(pages
        .into_iter()
        .map(|p| (p.id.as_i32(), p.title))
        .collect())
}

/// List all segments.
#[instrument(skip_all)]
pub async fn index(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Query(flash): Query<FlashQuery>,
) -> Result<SegmentsIndexTemplate> {
    let segments = SegmentRepository::new(state.pool()).list(None).await?;
    let titles = page_titles(&state).await?;

    Ok(SegmentsIndexTemplate {
        segments: segments
            .iter()
            .map(|s| SegmentRow {
                id: s.id.as_i32(),
                kind: s.kind().as_str(),
                kind_label: s.kind().label(),
                page_title: titles
                    .get(&s.page_id.as_i32())
                    .cloned()
                    .unwrap_or_else(|| format!("page {}", s.page_id)),
                position: s.position,
                is_posts: s.kind() == SegmentKind::Posts,
            })
            .collect(),
        kinds: SegmentKind::ALL
            .iter()
            .map(|k| KindOption {
                kind: k.as_str(),
                label: k.label(),
            })
            .collect(),
        error: flash.error,
        notice: flash.notice,
    })
}

/// Display the new segment form for a kind.
///
/// A kind outside the fixed enum is not a route: not-found.
#[instrument(skip_all)]
pub async fn new_segment(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(flash): Query<FlashQuery>,
) -> Result<SegmentNewTemplate> {
    let kind = SegmentKind::from_str(&kind)
        .map_err(|_| AppError::NotFound(format!("segment type {kind}")))?;

    let pages = PageRepository::new(state.pool()).list(None).await?;

    Ok(SegmentNewTemplate {
        kind: kind.as_str(),
        kind_label: kind.label(),
        pages: pages
            .iter()
            .map(|p| PageOption {
                id: p.id.as_i32(),
                title: p.title.clone(),
            })
            .collect(),
        payload_json: payload_editor_json(&SegmentPayload::empty(kind)),
        error: flash.error,
    })
}

/// Create a segment.
#[instrument(skip_all)]
pub async fn create(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<SegmentForm>,
) -> Response {
    let payload = match serde_json::from_str::<JsonValue>(&form.payload) {
        Ok(v) => v,
        Err(e) => {
            let back = format!("/admin/segments/new/{}", form.kind);
            return Redirect::to(&with_error(&back, &format!("Payload is not valid JSON: {e}.")))
                .into_response();
        }
    };

    let response = actions::segments::create(
        &state,
        &user,
        SegmentInput {
            page_id: form.page_id,
            kind: form.kind.clone(),
            payload,
        },
    )
    .await;

    if response.success {
        Redirect::to(&with_notice("/admin/segments", "Segment created")).into_response()
    } else {
        let error = response.error.unwrap_or_default();
        let back = format!("/admin/segments/new/{}", form.kind);
        Redirect::to(&with_error(&back, &error)).into_response()
    }
}

/// Display the edit segment form.
#[instrument(skip_all)]
pub async fn edit(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(flash): Query<FlashQuery>,
) -> Result<SegmentEditTemplate> {
    let segment = SegmentRepository::new(state.pool())
        .get_by_id(SegmentId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("segment {id}")))?;

    let page = PageRepository::new(state.pool())
        .get_by_id(segment.page_id)
        .await?;

    Ok(SegmentEditTemplate {
        id: segment.id.as_i32(),
        kind: segment.kind().as_str(),
        kind_label: segment.kind().label(),
        page_title: page.map_or_else(
            || format!("page {}", segment.page_id),
            |p| p.title,
        ),
        payload_json: payload_editor_json(&segment.payload),
        is_posts: segment.kind() == SegmentKind::Posts,
        error: flash.error,
    })
}

/// Update a segment's payload.
#[instrument(skip_all)]
pub async fn update(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<SegmentUpdateForm>,
) -> Response {
    let back = format!("/admin/segments/{id}/edit");

    let payload = match serde_json::from_str::<JsonValue>(&form.payload) {
        Ok(v) => v,
        Err(e) => {
            return Redirect::to(&with_error(&back, &format!("Payload is not valid JSON: {e}.")))
                .into_response();
        }
    };

    let response = actions::segments::update(&state, SegmentId::new(id), payload).await;
    if response.success {
        Redirect::to(&with_notice("/admin/segments", "Segment saved")).into_response()
    } else {
        let error = response.error.unwrap_or_default();
        Redirect::to(&with_error(&back, &error)).into_response()
    }
}

/// Delete a segment.
#[instrument(skip_all)]
pub async fn delete(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Response {
    let response = actions::segments::delete(&state, SegmentId::new(id)).await;
    if response.success {
        Redirect::to(&with_notice("/admin/segments", "Segment deleted")).into_response()
    } else {
        let error = response.error.unwrap_or_default();
        Redirect::to(&with_error("/admin/segments", &error)).into_response()
    }
}

/// Reorder a segment (JSON API).
#[instrument(skip_all)]
pub async fn reorder(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<PositionBody>,
) -> Json<ActionResponse<()>> {
    Json(actions::segments::reorder(&state, SegmentId::new(id), body.position).await)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_editor_json_strips_discriminant() {
        let payload = SegmentPayload::empty(SegmentKind::Posts);
        let json = payload_editor_json(&payload);
        let value: JsonValue = serde_json::from_str(&json).unwrap();
        assert!(value.get("kind").is_none());
        assert_eq!(value["page_size"], 10);
    }
}
