//! Public contact form submission.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::actions;
use crate::actions::ActionResponse;
use crate::actions::contact::ContactInput;
use crate::state::AppState;

/// Submit the contact form.
///
/// POST /contact
///
/// Returns the action result as JSON; the form swaps in the message
/// client-side. Failures - including the fixed "mailer unconfigured"
/// failure - are values, never error responses.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<ContactInput>,
) -> Json<ActionResponse<()>> {
    Json(actions::contact::submit(&state, input).await)
}
