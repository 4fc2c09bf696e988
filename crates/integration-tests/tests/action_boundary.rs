//! Tests for the server-action result boundary.
//!
//! Every mutation returns `{success, data?, error?}` as a value; these
//! tests pin the wire shape consumers rely on.

use serde_json::json;

use driftwood_site::actions::ActionResponse;
use driftwood_site::db::RepositoryError;

#[test]
fn test_success_carries_data_and_no_error() {
    let response = ActionResponse::ok(json!({"id": 7, "slug": "about-us"}));
    let wire = serde_json::to_value(&response).expect("serializes");

    assert_eq!(wire["success"], true);
    assert_eq!(wire["data"]["slug"], "about-us");
    assert!(
        wire.get("error").is_none(),
        "successful responses must omit the error field"
    );
}

#[test]
fn test_empty_success_has_neither_field() {
    let response: ActionResponse<()> = ActionResponse::ok_empty();
    let wire = serde_json::to_value(&response).expect("serializes");

    assert_eq!(wire, json!({"success": true}));
}

#[test]
fn test_failure_carries_error_and_no_data() {
    let response: ActionResponse<()> = ActionResponse::fail("Title is required.".to_owned());
    let wire = serde_json::to_value(&response).expect("serializes");

    assert_eq!(wire["success"], false);
    assert_eq!(wire["error"], "Title is required.");
    assert!(wire.get("data").is_none());
}

#[test]
fn test_not_found_becomes_failure_value() {
    let response: ActionResponse<()> = ActionResponse::from_repo_error(&RepositoryError::NotFound);
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("Not found"));
}

#[test]
fn test_conflict_message_reaches_the_form() {
    let err = RepositoryError::Conflict("a published page already uses this slug".to_owned());
    let response: ActionResponse<()> = ActionResponse::from_repo_error(&err);

    assert!(!response.success);
    assert_eq!(
        response.error.as_deref(),
        Some("a published page already uses this slug")
    );
}

#[test]
fn test_internal_errors_never_leak_details() {
    let err = RepositoryError::DataCorruption("segment 3 payload failed to parse".to_owned());
    let response: ActionResponse<()> = ActionResponse::from_repo_error(&err);

    assert!(!response.success);
    let message = response.error.expect("has message");
    assert!(!message.contains("segment 3"));
    assert!(!message.contains("payload"));
}
