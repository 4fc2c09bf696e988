//! Post actions.

use serde::{Deserialize, Serialize};

use driftwood_core::{PostId, PublishStatus, SegmentId, Slug, excerpt};

use crate::content::render_markdown;
use crate::db::posts::{NewPost, PostRepository, PostUpdate};
use crate::db::segments::SegmentRepository;
use crate::models::{CurrentUser, Post, SegmentKind};
use crate::state::AppState;

use super::ActionResponse;

/// Length of the generated listing excerpt.
const EXCERPT_LENGTH: usize = 200;

/// Form input for creating or updating a post.
#[derive(Debug, Deserialize)]
pub struct PostInput {
    pub title: String,
    /// Explicit slug; left empty, one is generated from the title.
    #[serde(default)]
    pub slug: Option<String>,
    /// Markdown body.
    pub body: String,
    pub status: String,
}

/// Post fields echoed back to the form.
#[derive(Debug, Serialize)]
pub struct PostData {
    pub id: PostId,
    pub segment_id: SegmentId,
    pub title: String,
    pub slug: String,
    pub status: PublishStatus,
}

impl From<&Post> for PostData {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            segment_id: post.segment_id,
            title: post.title.clone(),
            slug: post.slug.as_str().to_owned(),
            status: post.status,
        }
    }
}

struct ValidatedPost {
    title: String,
    slug: Slug,
    body: String,
    body_html: String,
    excerpt: String,
    status: PublishStatus,
}

fn validate(input: &PostInput) -> Result<ValidatedPost, String> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err("Title is required.".to_owned());
    }

    if input.body.trim().is_empty() {
        return Err("Body is required.".to_owned());
    }

    let status = input
        .status
        .parse::<PublishStatus>()
        .map_err(|_| "Status must be draft or published.".to_owned())?;

    let slug = match input.slug.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => {
            Slug::parse(raw).map_err(|e| format!("Invalid slug: {e}."))?
        }
        _ => Slug::generate(title),
    };

    let body_html = render_markdown(&input.body);
    let excerpt = excerpt(&body_html, EXCERPT_LENGTH);

    Ok(ValidatedPost {
        title: title.to_owned(),
        slug,
        body: input.body.clone(),
        body_html,
        excerpt,
        status,
    })
}

/// Check that a segment exists and is a posts segment; posts cannot attach
/// to anything else.
async fn require_posts_segment(state: &AppState, segment_id: SegmentId) -> Result<(), String> {
    let repo = SegmentRepository::new(state.pool());
    match repo.get_by_id(segment_id).await {
        Ok(Some(segment)) if segment.kind() == SegmentKind::Posts => Ok(()),
        Ok(Some(_)) => Err("Posts can only be added to a posts segment.".to_owned()),
        Ok(None) => Err("Segment does not exist.".to_owned()),
        Err(e) => {
            tracing::error!(error = %e, "segment lookup failed");
            Err("Something went wrong. Please try again.".to_owned())
        }
    }
}

/// Invalidate the public paths affected by a post change.
async fn invalidate_post_paths(state: &AppState, segment_id: SegmentId, slug: &Slug) {
    use crate::db::pages::PageRepository;

    let segments = SegmentRepository::new(state.pool());
    let Ok(Some(segment)) = segments.get_by_id(segment_id).await else {
        return;
    };
    let pages = PageRepository::new(state.pool());
    if let Ok(Some(page)) = pages.get_by_id(segment.page_id).await {
        let page_path = page.path();
        let post_path = format!("/{}/{}", page.slug, slug);
        state
            .invalidate_paths(&["/".to_owned(), page_path, post_path])
            .await;
    }
}

/// Create a post under a posts-kind segment.
pub async fn create(
    state: &AppState,
    user: &CurrentUser,
    segment_id: SegmentId,
    input: PostInput,
) -> ActionResponse<PostData> {
    let validated = match validate(&input) {
        Ok(v) => v,
        Err(e) => return ActionResponse::fail(e),
    };

    if let Err(e) = require_posts_segment(state, segment_id).await {
        return ActionResponse::fail(e);
    }

    let repo = PostRepository::new(state.pool());
    match repo
        .create(NewPost {
            segment_id,
            title: validated.title,
            slug: validated.slug,
            body: validated.body,
            body_html: validated.body_html,
            excerpt: validated.excerpt,
            status: validated.status,
            author_id: user.id,
        })
        .await
    {
        Ok(post) => {
            invalidate_post_paths(state, post.segment_id, &post.slug).await;
            tracing::info!(post_id = %post.id, slug = %post.slug, "post created");
            ActionResponse::ok(PostData::from(&post))
        }
        Err(e) => ActionResponse::from_repo_error(&e),
    }
}

/// Update a post.
pub async fn update(state: &AppState, id: PostId, input: PostInput) -> ActionResponse<PostData> {
    let validated = match validate(&input) {
        Ok(v) => v,
        Err(e) => return ActionResponse::fail(e),
    };

    let repo = PostRepository::new(state.pool());

    let previous = match repo.get_by_id(id).await {
        Ok(Some(post)) => post,
        Ok(None) => return ActionResponse::fail("Not found".to_owned()),
        Err(e) => return ActionResponse::from_repo_error(&e),
    };

    match repo
        .update(
            id,
            PostUpdate {
                title: validated.title,
                slug: validated.slug,
                body: validated.body,
                body_html: validated.body_html,
                excerpt: validated.excerpt,
                status: validated.status,
            },
        )
        .await
    {
        Ok(post) => {
            invalidate_post_paths(state, post.segment_id, &previous.slug).await;
            invalidate_post_paths(state, post.segment_id, &post.slug).await;
            tracing::info!(post_id = %post.id, slug = %post.slug, "post updated");
            ActionResponse::ok(PostData::from(&post))
        }
        Err(e) => ActionResponse::from_repo_error(&e),
    }
}

/// Delete a post.
pub async fn delete(state: &AppState, id: PostId) -> ActionResponse<()> {
    let repo = PostRepository::new(state.pool());

    let previous = match repo.get_by_id(id).await {
        Ok(Some(post)) => post,
        Ok(None) => return ActionResponse::fail("Not found".to_owned()),
        Err(e) => return ActionResponse::from_repo_error(&e),
    };

    match repo.delete(id).await {
        Ok(()) => {
            invalidate_post_paths(state, previous.segment_id, &previous.slug).await;
            tracing::info!(post_id = %id, "post deleted");
            ActionResponse::ok_empty()
        }
        Err(e) => ActionResponse::from_repo_error(&e),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input(title: &str, body: &str, status: &str) -> PostInput {
        PostInput {
            title: title.to_owned(),
            slug: None,
            body: body.to_owned(),
            status: status.to_owned(),
        }
    }

    #[test]
    fn test_validate_requires_title_and_body() {
        assert!(validate(&input("", "body", "draft")).is_err());
        assert!(validate(&input("Title", "  ", "draft")).is_err());
    }

    #[test]
    fn test_validate_renders_markdown() {
        let validated = validate(&input("Launch", "We are **live**!", "published")).unwrap();
        assert!(validated.body_html.contains("<strong>live</strong>"));
        assert_eq!(validated.body, "We are **live**!");
    }

    #[test]
    fn test_validate_builds_excerpt_from_rendered_body() {
        let body = "word ".repeat(100);
        let validated = validate(&input("Launch", &body, "draft")).unwrap();
        assert!(validated.excerpt.chars().count() <= EXCERPT_LENGTH + 3);
        assert!(validated.excerpt.ends_with("..."));
        assert!(!validated.excerpt.contains('<'));
    }

    #[test]
    fn test_validate_slug_from_title() {
        let validated = validate(&input("Summer Launch!", "body", "draft")).unwrap();
        assert_eq!(validated.slug.as_str(), "summer-launch");
    }
}
