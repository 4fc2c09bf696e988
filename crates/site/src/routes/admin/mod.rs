//! Admin panel route handlers.
//!
//! Every handler takes the [`RequireAdmin`] extractor; unauthenticated
//! requests never reach a handler body. Mutations delegate to
//! [`crate::actions`] and translate the action result into a redirect:
//! success goes to the canonical listing, failure goes back to the form
//! with the error message in the query string.

pub mod dashboard;
pub mod navigation;
pub mod pages;
pub mod posts;
pub mod segments;
pub mod settings;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Redirect target carrying a flash error message.
pub(crate) fn with_error(path: &str, error: &str) -> String {
    format!("{path}?error={}", urlencoding::encode(error))
}

/// Redirect target carrying a flash notice.
pub(crate) fn with_notice(path: &str, notice: &str) -> String {
    format!("{path}?notice={}", urlencoding::encode(notice))
}

/// Query parameters for flash display.
#[derive(Debug, serde::Deserialize)]
pub struct FlashQuery {
    pub error: Option<String>,
    pub notice: Option<String>,
}

/// Create the admin panel router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Dashboard
        .route("/", get(dashboard::index))
        // Pages
        .route("/pages", get(pages::index).post(pages::create))
        .route("/pages/new", get(pages::new_page))
        .route("/pages/{id}/edit", get(pages::edit))
        .route("/pages/{id}", post(pages::update))
        .route("/pages/{id}/delete", post(pages::delete))
        // Posts (cross-segment listing)
        .route("/posts", get(posts::index))
        // Segments
        .route("/segments", get(segments::index).post(segments::create))
        .route("/segments/new/{kind}", get(segments::new_segment))
        .route("/segments/{id}/edit", get(segments::edit))
        .route("/segments/{id}", post(segments::update))
        .route("/segments/{id}/delete", post(segments::delete))
        // Posts under a segment
        .route(
            "/segments/{id}/posts",
            get(posts::segment_index).post(posts::create),
        )
        .route("/segments/{id}/posts/new", get(posts::new_post))
        .route("/segments/{id}/posts/{post_id}/edit", get(posts::edit))
        .route("/segments/{id}/posts/{post_id}", post(posts::update))
        .route("/segments/{id}/posts/{post_id}/delete", post(posts::delete))
        // Settings
        .route("/settings", get(settings::index).post(settings::update))
        // Navigation
        .route(
            "/navigation",
            get(navigation::index).post(navigation::create),
        )
        .route("/navigation/{id}", post(navigation::update))
        .route("/navigation/{id}/delete", post(navigation::delete))
        // JSON API (reordering)
        .route("/api/segments/{id}/position", post(segments::reorder))
        .route("/api/navigation/{id}/position", post(navigation::reorder))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_error_encodes() {
        assert_eq!(
            with_error("/admin/pages", "Title is required."),
            "/admin/pages?error=Title%20is%20required."
        );
    }

    #[test]
    fn test_with_notice_encodes() {
        assert_eq!(
            with_notice("/admin/settings", "Saved"),
            "/admin/settings?notice=Saved"
        );
    }
}
