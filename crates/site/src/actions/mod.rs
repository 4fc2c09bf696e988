//! Server actions: the mutation entry points behind the admin panel and the
//! public contact form.
//!
//! Every action authenticates through the extractors in
//! [`crate::middleware`], validates its input, delegates to a repository in
//! [`crate::db`], and finally invalidates the render cache for affected
//! public paths. Failures are always *values* - an action returns an
//! [`ActionResponse`] with `success: false` rather than erroring across the
//! boundary.

use serde::Serialize;

use crate::db::RepositoryError;

pub mod contact;
pub mod navigation;
pub mod pages;
pub mod posts;
pub mod segments;
pub mod settings;

/// Wire shape of every action result: `{success, data?, error?}`.
#[derive(Debug, Serialize)]
pub struct ActionResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ActionResponse<T> {
    /// A successful action with its payload.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// A successful action with nothing to return (deletes).
    #[must_use]
    pub const fn ok_empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    /// A failed action with a user-facing message.
    #[must_use]
    pub const fn fail(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }

    /// Fold a repository error into a failure value.
    ///
    /// Conflicts and not-founds carry their message to the form; real
    /// database failures are captured and reported generically.
    #[must_use]
    pub fn from_repo_error(e: &RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => Self::fail("Not found".to_owned()),
            RepositoryError::Conflict(msg) => Self::fail(msg.clone()),
            RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
                let event_id = sentry::capture_error(e);
                tracing::error!(error = %e, sentry_event_id = %event_id, "action failed");
                Self::fail("Something went wrong. Please try again.".to_owned())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_shape() {
        let response = ActionResponse::ok(serde_json::json!({"id": 1}));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["id"], 1);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_fail_shape() {
        let response: ActionResponse<()> = ActionResponse::fail("title is required".to_owned());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "title is required");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_conflict_message_passes_through() {
        let err = RepositoryError::Conflict("slug already in use".to_owned());
        let response: ActionResponse<()> = ActionResponse::from_repo_error(&err);
        assert!(!response.success);
        assert_eq!(response.error.unwrap(), "slug already in use");
    }

    #[test]
    fn test_database_error_is_generic() {
        let err = RepositoryError::DataCorruption("bad payload".to_owned());
        let response: ActionResponse<()> = ActionResponse::from_repo_error(&err);
        assert!(!response.success);
        assert!(!response.error.unwrap().contains("bad payload"));
    }
}
