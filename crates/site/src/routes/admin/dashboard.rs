//! Admin dashboard.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::db::{PageRepository, PostRepository, SegmentRepository};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// A recent post row on the dashboard.
pub struct RecentPost {
    pub id: i32,
    pub segment_id: i32,
    pub title: String,
    pub status: String,
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub user_name: String,
    pub page_count: usize,
    pub segment_count: usize,
    pub post_count: usize,
    pub recent_posts: Vec<RecentPost>,
}

/// Number of recent posts shown on the dashboard.
const RECENT_POSTS_COUNT: usize = 5;

/// Display the dashboard overview.
#[instrument(skip_all)]
pub async fn index(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
) -> Result<DashboardTemplate> {
    let pages = PageRepository::new(state.pool()).list(None).await?;
    let segments = SegmentRepository::new(state.pool()).list(None).await?;
    let posts = PostRepository::new(state.pool()).list_all().await?;

    let recent_posts = posts
        .iter()
        .take(RECENT_POSTS_COUNT)
        .map(|p| RecentPost {
            id: p.id.as_i32(),
            segment_id: p.segment_id.as_i32(),
            title: p.title.clone(),
            status: p.status.to_string(),
        })
        .collect();

    Ok(DashboardTemplate {
        user_name: user.display_name,
        page_count: pages.len(),
        segment_count: segments.len(),
        post_count: posts.len(),
        recent_posts,
    })
}
