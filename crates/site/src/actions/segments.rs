//! Segment actions.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use driftwood_core::{PageId, SegmentId};

use crate::db::pages::PageRepository;
use crate::db::segments::{NewSegment, SegmentRepository};
use crate::models::{CurrentUser, Segment, SegmentKind, SegmentPayload};
use crate::state::AppState;

use super::ActionResponse;

/// Form input for creating a segment.
#[derive(Debug, Deserialize)]
pub struct SegmentInput {
    pub page_id: i32,
    pub kind: String,
    /// Kind-specific fields, shaped per [`SegmentPayload`].
    pub payload: JsonValue,
}

/// Segment fields echoed back to the form.
#[derive(Debug, Serialize)]
pub struct SegmentData {
    pub id: SegmentId,
    pub page_id: PageId,
    pub kind: &'static str,
    pub position: i32,
}

impl From<&Segment> for SegmentData {
    fn from(segment: &Segment) -> Self {
        Self {
            id: segment.id,
            page_id: segment.page_id,
            kind: segment.kind().as_str(),
            position: segment.position,
        }
    }
}

/// Validate a kind string plus loose payload JSON into a typed payload.
///
/// The discriminant is taken from the `kind` field, not from the payload
/// body; whatever tag the client put inside the payload is overwritten
/// before parsing, so the payload shape must match the declared kind.
fn validate_payload(kind: &str, payload: &JsonValue) -> Result<SegmentPayload, String> {
    let kind: SegmentKind = kind
        .parse()
        .map_err(|_| format!("'{kind}' is not a segment type."))?;

    let mut tagged = match payload {
        JsonValue::Object(map) => map.clone(),
        JsonValue::Null => serde_json::Map::new(),
        _ => return Err("Segment payload must be an object.".to_owned()),
    };
    tagged.insert(
        "kind".to_owned(),
        JsonValue::String(kind.as_str().to_owned()),
    );

    serde_json::from_value(JsonValue::Object(tagged))
        .map_err(|e| format!("Invalid {} payload: {e}.", kind.label().to_lowercase()))
}

/// Invalidate the public path of the page owning a segment.
async fn invalidate_owning_page(state: &AppState, page_id: PageId) {
    let repo = PageRepository::new(state.pool());
    if let Ok(Some(page)) = repo.get_by_id(page_id).await {
        state
            .invalidate_paths(&["/".to_owned(), page.path()])
            .await;
    }
}

/// Create a segment at the end of its page.
pub async fn create(
    state: &AppState,
    user: &CurrentUser,
    input: SegmentInput,
) -> ActionResponse<SegmentData> {
    let payload = match validate_payload(&input.kind, &input.payload) {
        Ok(p) => p,
        Err(e) => return ActionResponse::fail(e),
    };

    let repo = SegmentRepository::new(state.pool());
    match repo
        .create(NewSegment {
            page_id: PageId::new(input.page_id),
            payload,
            created_by: user.id,
        })
        .await
    {
        Ok(segment) => {
            invalidate_owning_page(state, segment.page_id).await;
            tracing::info!(segment_id = %segment.id, kind = %segment.kind(), "segment created");
            ActionResponse::ok(SegmentData::from(&segment))
        }
        Err(e) => ActionResponse::from_repo_error(&e),
    }
}

/// Replace a segment's payload. The kind is fixed at creation.
pub async fn update(
    state: &AppState,
    id: SegmentId,
    payload: JsonValue,
) -> ActionResponse<SegmentData> {
    let repo = SegmentRepository::new(state.pool());

    let existing = match repo.get_by_id(id).await {
        Ok(Some(segment)) => segment,
        Ok(None) => return ActionResponse::fail("Not found".to_owned()),
        Err(e) => return ActionResponse::from_repo_error(&e),
    };

    let payload = match validate_payload(existing.kind().as_str(), &payload) {
        Ok(p) => p,
        Err(e) => return ActionResponse::fail(e),
    };

    match repo.update_payload(id, &payload).await {
        Ok(segment) => {
            invalidate_owning_page(state, segment.page_id).await;
            tracing::info!(segment_id = %segment.id, "segment updated");
            ActionResponse::ok(SegmentData::from(&segment))
        }
        Err(e) => ActionResponse::from_repo_error(&e),
    }
}

/// Move a segment within its page.
pub async fn reorder(state: &AppState, id: SegmentId, position: i32) -> ActionResponse<()> {
    let repo = SegmentRepository::new(state.pool());

    let existing = match repo.get_by_id(id).await {
        Ok(Some(segment)) => segment,
        Ok(None) => return ActionResponse::fail("Not found".to_owned()),
        Err(e) => return ActionResponse::from_repo_error(&e),
    };

    match repo.update_position(id, position).await {
        Ok(()) => {
            invalidate_owning_page(state, existing.page_id).await;
            ActionResponse::ok_empty()
        }
        Err(e) => ActionResponse::from_repo_error(&e),
    }
}

/// Delete a segment. A posts-kind segment with live posts is blocked.
pub async fn delete(state: &AppState, id: SegmentId) -> ActionResponse<()> {
    let repo = SegmentRepository::new(state.pool());

    let existing = match repo.get_by_id(id).await {
        Ok(Some(segment)) => segment,
        Ok(None) => return ActionResponse::fail("Not found".to_owned()),
        Err(e) => return ActionResponse::from_repo_error(&e),
    };

    match repo.delete(id).await {
        Ok(()) => {
            invalidate_owning_page(state, existing.page_id).await;
            tracing::info!(segment_id = %id, "segment deleted");
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
    fn test_validate_payload_rejects_unknown_kind() {
        let err = validate_payload("hero", &serde_json::json!({})).unwrap_err();
        assert!(err.contains("not a segment type"));
    }

    #[test]
    fn test_validate_payload_accepts_every_kind_with_empty_object() {
        // cta requires its fields; everything else defaults
        for kind in ["carousel", "gallery", "contact-form", "posts"] {
            assert!(
                validate_payload(kind, &serde_json::json!({})).is_ok(),
                "kind {kind} should accept an empty payload"
            );
        }
    }

    #[test]
    fn test_validate_payload_requires_cta_fields() {
        assert!(validate_payload("cta", &serde_json::json!({})).is_err());
        assert!(
            validate_payload(
                "cta",
                &serde_json::json!({
                    "heading": "Go",
                    "button_label": "Now",
                    "button_url": "/signup",
                })
            )
            .is_ok()
        );
    }

    #[test]
    fn test_validate_payload_ignores_client_supplied_tag() {
        // A payload claiming to be a different kind is parsed as the
        // declared kind, and fails if the shape doesn't fit.
        let payload = serde_json::json!({"kind": "carousel", "body_html": "<p>x</p>"});
        let parsed = validate_payload("text-block", &payload).unwrap();
        assert_eq!(parsed.kind(), SegmentKind::TextBlock);
    }

    #[test]
    fn test_validate_payload_rejects_non_object() {
        assert!(validate_payload("gallery", &serde_json::json!([1, 2])).is_err());
        assert!(validate_payload("gallery", &serde_json::json!("x")).is_err());
    }
}
