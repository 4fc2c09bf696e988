//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (verifies database)
//!
//! # Auth
//! GET  /login                  - Login page (authenticated admins -> /admin)
//! POST /login                  - Login action
//! POST /logout                 - Logout action
//!
//! # Admin (session-gated)
//! GET  /admin                  - Dashboard
//! GET  /admin/pages            - Page listing
//! GET  /admin/pages/new        - New page form
//! POST /admin/pages            - Create page
//! GET  /admin/pages/{id}/edit  - Edit page form
//! POST /admin/pages/{id}      - Update page
//! POST /admin/pages/{id}/delete - Delete page
//! GET  /admin/posts            - Cross-segment post listing
//! GET  /admin/segments         - Segment listing
//! GET  /admin/segments/new/{kind} - New segment form (404 for unknown kind)
//! POST /admin/segments         - Create segment
//! GET  /admin/segments/{id}/edit - Edit segment form
//! POST /admin/segments/{id}   - Update segment
//! POST /admin/segments/{id}/delete - Delete segment
//! GET  /admin/segments/{id}/posts - Posts of a posts-kind segment
//! GET  /admin/segments/{id}/posts/new - New post form
//! POST /admin/segments/{id}/posts - Create post
//! GET  /admin/segments/{id}/posts/{post_id}/edit - Edit post form
//! POST /admin/segments/{id}/posts/{post_id} - Update post
//! POST /admin/segments/{id}/posts/{post_id}/delete - Delete post
//! GET  /admin/settings         - Settings page (lazily created)
//! POST /admin/settings         - Update settings
//! GET  /admin/navigation       - Menu listing
//! POST /admin/navigation       - Create menu item
//! POST /admin/navigation/{id} - Update menu item
//! POST /admin/navigation/{id}/delete - Delete menu item
//! POST /admin/api/segments/{id}/position - Reorder segment (JSON)
//! POST /admin/api/navigation/{id}/position - Reorder menu item (JSON)
//!
//! # Public
//! GET  /                       - Home page
//! GET  /{slug}                 - Published page
//! GET  /{page_slug}/{post_slug} - Published post
//! POST /contact                - Contact form submission (JSON result)
//! ```

pub mod admin;
pub mod auth;
pub mod public;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Admin panel
        .nest("/admin", admin::routes())
        // Auth
        .merge(auth_routes())
        // Contact form
        .route("/contact", post(public::contact::submit))
        // Public site; the page catch-alls go last
        .route("/", get(public::page::home))
        .route("/{slug}", get(public::page::show_page))
        .route("/{page_slug}/{post_slug}", get(public::page::show_post))
}
