//! Admin post management.
//!
//! Post routes are nested under their segment. Requests for a segment that
//! is missing or not posts-kind, and requests for a post that belongs to a
//! different segment, redirect to the canonical listing instead of
//! rendering.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use driftwood_core::{PostId, SegmentId};

use crate::actions;
use crate::actions::posts::PostInput;
use crate::db::{PostRepository, SegmentRepository};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::{Post, Segment, SegmentKind};
use crate::state::AppState;

use super::{FlashQuery, with_error, with_notice};

/// A post row in listings.
pub struct PostRowView {
    pub id: i32,
    pub segment_id: i32,
    pub title: String,
    pub slug: String,
    pub status: String,
    pub created_at: String,
}

impl PostRowView {
    fn from_post(post: &Post) -> Self {
        Self {
            id: post.id.as_i32(),
            segment_id: post.segment_id.as_i32(),
            title: post.title.clone(),
            slug: post.slug.as_str().to_owned(),
            status: post.status.to_string(),
            created_at: post.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Cross-segment post listing template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/posts/index.html")]
pub struct PostsIndexTemplate {
    pub posts: Vec<PostRowView>,
}

/// Per-segment post listing template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/posts/segment_index.html")]
pub struct SegmentPostsTemplate {
    pub segment_id: i32,
    pub posts: Vec<PostRowView>,
    pub error: Option<String>,
    pub notice: Option<String>,
}

/// New post form template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/posts/new.html")]
pub struct PostNewTemplate {
    pub segment_id: i32,
    pub error: Option<String>,
}

/// Edit post form template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/posts/edit.html")]
pub struct PostEditTemplate {
    pub segment_id: i32,
    pub post_id: i32,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub status: String,
    pub error: Option<String>,
}

/// Resolve a segment that must exist and be posts-kind; anything else
/// redirects to the segment listing.
async fn resolve_posts_segment(
    state: &AppState,
    id: SegmentId,
) -> std::result::Result<Segment, Response> {
    let repo = SegmentRepository::new(state.pool());
    match repo.get_by_id(id).await {
        Ok(Some(segment)) if segment.kind() == SegmentKind::Posts => Ok(segment),
        Ok(Some(_)) | Ok(None) => Err(Redirect::to("/admin/segments").into_response()),
        Err(e) => Err(crate::error::AppError::from(e).into_response()),
    }
}

/// Resolve a post that must belong to the routed segment; a mismatched or
/// missing post redirects to the segment's post listing.
async fn resolve_segment_post(
    state: &AppState,
    segment_id: SegmentId,
    post_id: PostId,
) -> std::result::Result<Post, Response> {
    let listing = format!("/admin/segments/{segment_id}/posts");
    let repo = PostRepository::new(state.pool());
    match repo.get_by_id(post_id).await {
        Ok(Some(post)) if post.segment_id == segment_id => Ok(post),
        Ok(Some(_)) | Ok(None) => Err(Redirect::to(&listing).into_response()),
        Err(e) => Err(crate::error::AppError::from(e).into_response()),
    }
}

/// List every post across segments.
#[instrument(skip_all)]
pub async fn index(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
) -> Result<PostsIndexTemplate> {
    let posts = PostRepository::new(state.pool()).list_all().await?;

    Ok(PostsIndexTemplate {
        posts: posts.iter().map(PostRowView::from_post).collect(),
    })
}

/// List a segment's posts.
#[instrument(skip_all)]
pub async fn segment_index(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(flash): Query<FlashQuery>,
) -> Response {
    let segment = match resolve_posts_segment(&state, SegmentId::new(id)).await {
        Ok(s) => s,
        Err(redirect) => return redirect,
    };

    let posts = match PostRepository::new(state.pool())
        .list_for_segment(segment.id, false)
        .await
    {
        Ok(posts) => posts,
        Err(e) => return crate::error::AppError::from(e).into_response(),
    };

    SegmentPostsTemplate {
        segment_id: segment.id.as_i32(),
        posts: posts.iter().map(PostRowView::from_post).collect(),
        error: flash.error,
        notice: flash.notice,
    }
    .into_response()
}

/// Display the new post form.
#[instrument(skip_all)]
pub async fn new_post(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(flash): Query<FlashQuery>,
) -> Response {
    let segment = match resolve_posts_segment(&state, SegmentId::new(id)).await {
        Ok(s) => s,
        Err(redirect) => return redirect,
    };

    PostNewTemplate {
        segment_id: segment.id.as_i32(),
        error: flash.error,
    }
    .into_response()
}

/// Create a post under a segment.
#[instrument(skip_all)]
pub async fn create(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(input): Form<PostInput>,
) -> Response {
    let segment = match resolve_posts_segment(&state, SegmentId::new(id)).await {
        Ok(s) => s,
        Err(redirect) => return redirect,
    };

    let listing = format!("/admin/segments/{}/posts", segment.id);
    let response = actions::posts::create(&state, &user, segment.id, input).await;
    if response.success {
        Redirect::to(&with_notice(&listing, "Post created")).into_response()
    } else {
        let error = response.error.unwrap_or_default();
        let back = format!("/admin/segments/{}/posts/new", segment.id);
        Redirect::to(&with_error(&back, &error)).into_response()
    }
}

/// Display the edit post form.
#[instrument(skip_all)]
pub async fn edit(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path((id, post_id)): Path<(i32, i32)>,
    Query(flash): Query<FlashQuery>,
) -> Response {
    let segment = match resolve_posts_segment(&state, SegmentId::new(id)).await {
        Ok(s) => s,
        Err(redirect) => return redirect,
    };
    let post = match resolve_segment_post(&state, segment.id, PostId::new(post_id)).await {
        Ok(p) => p,
        Err(redirect) => return redirect,
    };

    PostEditTemplate {
        segment_id: segment.id.as_i32(),
        post_id: post.id.as_i32(),
        title: post.title.clone(),
        slug: post.slug.as_str().to_owned(),
        body: post.body.clone(),
        status: post.status.to_string(),
        error: flash.error,
    }
    .into_response()
}

/// Update a post.
#[instrument(skip_all)]
pub async fn update(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path((id, post_id)): Path<(i32, i32)>,
    Form(input): Form<PostInput>,
) -> Response {
    let segment = match resolve_posts_segment(&state, SegmentId::new(id)).await {
        Ok(s) => s,
        Err(redirect) => return redirect,
    };
    let post = match resolve_segment_post(&state, segment.id, PostId::new(post_id)).await {
        Ok(p) => p,
        Err(redirect) => return redirect,
    };

    let listing = format!("/admin/segments/{}/posts", segment.id);
    let response = actions::posts::update(&state, post.id, input).await;
    if response.success {
        Redirect::to(&with_notice(&listing, "Post saved")).into_response()
    } else {
        let error = response.error.unwrap_or_default();
        let back = format!("/admin/segments/{}/posts/{}/edit", segment.id, post.id);
        Redirect::to(&with_error(&back, &error)).into_response()
    }
}

/// Delete a post.
#[instrument(skip_all)]
pub async fn delete(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path((id, post_id)): Path<(i32, i32)>,
) -> Response {
    let segment = match resolve_posts_segment(&state, SegmentId::new(id)).await {
        Ok(s) => s,
        Err(redirect) => return redirect,
    };
    let post = match resolve_segment_post(&state, segment.id, PostId::new(post_id)).await {
        Ok(p) => p,
        Err(redirect) => return redirect,
    };

    let listing = format!("/admin/segments/{}/posts", segment.id);
    let response = actions::posts::delete(&state, post.id).await;
    if response.success {
        Redirect::to(&with_notice(&listing, "Post deleted")).into_response()
    } else {
        let error = response.error.unwrap_or_default();
        Redirect::to(&with_error(&listing, &error)).into_response()
    }
}
