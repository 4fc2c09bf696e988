//! Authentication route handlers.
//!
//! Email + password login against the local user table, argon2-verified.
//! The session carries the resolved identity; nothing else holds it.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use driftwood_core::Email;

use crate::db::UserRepository;
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalUser, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Display the login page.
///
/// Already-authenticated admins have no business here and go to the panel.
pub async fn login_page(
    OptionalUser(user): OptionalUser,
    Query(query): Query<MessageQuery>,
) -> Response {
    if user.is_some_and(|u| u.role.is_admin()) {
        return Redirect::to("/admin").into_response();
    }

    LoginTemplate { error: query.error }.into_response()
}

/// Handle login form submission.
#[tracing::instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let Ok(email) = Email::parse(form.email.trim()) else {
        return Redirect::to("/login?error=Invalid+credentials").into_response();
    };

    let repo = UserRepository::new(state.pool());
    let found = match repo.get_with_password_hash(&email).await {
        Ok(found) => found,
        Err(e) => {
            tracing::error!(error = %e, "login lookup failed");
            return Redirect::to("/login?error=Something+went+wrong").into_response();
        }
    };

    // Verify against a constant dummy hash when the user is unknown so both
    // paths cost the same.
    let Some((user, password_hash)) = found else {
        let _ = verify_password(&form.password, DUMMY_HASH);
        return Redirect::to("/login?error=Invalid+credentials").into_response();
    };

    if !verify_password(&form.password, &password_hash) {
        return Redirect::to("/login?error=Invalid+credentials").into_response();
    }

    let current = CurrentUser::from_user(&user);
    if let Err(e) = set_current_user(&session, &current).await {
        tracing::error!(error = %e, "failed to set session");
        return Redirect::to("/login?error=Session+error").into_response();
    }

    set_sentry_user(&user.id, Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, "login succeeded");

    Redirect::to("/admin").into_response()
}

/// Handle logout.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!(error = %e, "failed to clear session");
    }
    clear_sentry_user();
    Redirect::to("/login").into_response()
}

/// An argon2 hash of no valid password, for timing-equalized rejections.
const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$GH8vpJlE2T9sKYO9dB1hFX3vHl2Rb2sgCM4eyAIZGzs";

/// Verify a password against an argon2 hash.
fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use argon2::PasswordHasher;
    use argon2::password_hash::SaltString;

    #[test]
    fn test_verify_password_roundtrip() {
        let salt = SaltString::from_b64("c29tZXNhbHRzb21lc2FsdA").unwrap();
        let hash = Argon2::default()
            .hash_password(b"hunter2hunter2", &salt)
            .unwrap()
            .to_string();

        assert!(verify_password("hunter2hunter2", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_verify_password_bad_hash() {
        assert!(!verify_password("anything", "not-a-hash"));
    }

    #[test]
    fn test_dummy_hash_parses() {
        assert!(PasswordHash::new(DUMMY_HASH).is_ok());
    }
}
