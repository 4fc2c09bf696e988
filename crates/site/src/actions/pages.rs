//! Page actions.

use serde::{Deserialize, Serialize};

use driftwood_core::{PageId, PublishStatus, Slug};

use crate::db::pages::{NewPage, PageRepository, PageUpdate};
use crate::models::{CurrentUser, Page};
use crate::state::AppState;

use super::ActionResponse;

/// Form input for creating or updating a page.
#[derive(Debug, Deserialize)]
pub struct PageInput {
    pub title: String,
    /// Explicit slug; left empty, one is generated from the title.
    #[serde(default)]
    pub slug: Option<String>,
    pub status: String,
}

/// Page fields echoed back to the form.
#[derive(Debug, Serialize)]
pub struct PageData {
    pub id: PageId,
    pub title: String,
    pub slug: String,
    pub status: PublishStatus,
}

impl From<&Page> for PageData {
    fn from(page: &Page) -> Self {
        Self {
            id: page.id,
            title: page.title.clone(),
            slug: page.slug.as_str().to_owned(),
            status: page.status,
        }
    }
}

struct ValidatedPage {
    title: String,
    slug: Slug,
    status: PublishStatus,
}

/// Validate the input shape: required title, parsable status, and a slug
/// that is either explicit and canonical or generated from the title.
fn validate(input: &PageInput) -> Result<ValidatedPage, String> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err("Title is required.".to_owned());
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

    Ok(ValidatedPage {
        title: title.to_owned(),
        slug,
        status,
    })
}

/// Create a page.
pub async fn create(
    state: &AppState,
    user: &CurrentUser,
    input: PageInput,
) -> ActionResponse<PageData> {
    let validated = match validate(&input) {
        Ok(v) => v,
        Err(e) => return ActionResponse::fail(e),
    };

    let repo = PageRepository::new(state.pool());
    match repo
        .create(NewPage {
            title: validated.title,
            slug: validated.slug,
            status: validated.status,
            created_by: user.id,
        })
        .await
    {
        Ok(page) => {
            state
                .invalidate_paths(&["/".to_owned(), page.path()])
                .await;
            tracing::info!(page_id = %page.id, slug = %page.slug, "page created");
            ActionResponse::ok(PageData::from(&page))
        }
        Err(e) => ActionResponse::from_repo_error(&e),
    }
}

/// Update a page's title, slug, and status.
pub async fn update(state: &AppState, id: PageId, input: PageInput) -> ActionResponse<PageData> {
    let validated = match validate(&input) {
        Ok(v) => v,
        Err(e) => return ActionResponse::fail(e),
    };

    let repo = PageRepository::new(state.pool());

    // The previous slug's path needs invalidating too when the slug moves.
    let previous = match repo.get_by_id(id).await {
        Ok(Some(page)) => page,
        Ok(None) => return ActionResponse::fail("Not found".to_owned()),
        Err(e) => return ActionResponse::from_repo_error(&e),
    };

    match repo
        .update(
            id,
            PageUpdate {
                title: validated.title,
                slug: validated.slug,
                status: validated.status,
            },
        )
        .await
    {
        Ok(page) => {
            state
                .invalidate_paths(&["/".to_owned(), previous.path(), page.path()])
                .await;
            tracing::info!(page_id = %page.id, slug = %page.slug, "page updated");
            ActionResponse::ok(PageData::from(&page))
        }
        Err(e) => ActionResponse::from_repo_error(&e),
    }
}

/// Delete a page. Blocked while posts still live under one of its segments.
pub async fn delete(state: &AppState, id: PageId) -> ActionResponse<()> {
    let repo = PageRepository::new(state.pool());

    let previous = match repo.get_by_id(id).await {
        Ok(Some(page)) => page,
        Ok(None) => return ActionResponse::fail("Not found".to_owned()),
        Err(e) => return ActionResponse::from_repo_error(&e),
    };

    match repo.delete(id).await {
        Ok(()) => {
            state
                .invalidate_paths(&["/".to_owned(), previous.path()])
                .await;
            tracing::info!(page_id = %id, "page deleted");
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
    fn test_validate_requires_title() {
        let input = PageInput {
            title: "   ".to_owned(),
            slug: None,
            status: "draft".to_owned(),
        };
        assert!(validate(&input).is_err());
    }

    #[test]
    fn test_validate_generates_slug_from_title() {
        let input = PageInput {
            title: "About Us".to_owned(),
            slug: None,
            status: "published".to_owned(),
        };
        let validated = validate(&input).unwrap();
        assert_eq!(validated.slug.as_str(), "about-us");
        assert_eq!(validated.status, PublishStatus::Published);
    }

    #[test]
    fn test_validate_rejects_bad_status() {
        let input = PageInput {
            title: "About".to_owned(),
            slug: None,
            status: "live".to_owned(),
        };
        assert!(validate(&input).is_err());
    }

    #[test]
    fn test_validate_rejects_malformed_slug() {
        let input = PageInput {
            title: "About".to_owned(),
            slug: Some("About Us".to_owned()),
            status: "draft".to_owned(),
        };
        assert!(validate(&input).is_err());
    }

    #[test]
    fn test_validate_accepts_explicit_slug() {
        let input = PageInput {
            title: "About".to_owned(),
            slug: Some("who-we-are".to_owned()),
            status: "draft".to_owned(),
        };
        assert_eq!(validate(&input).unwrap().slug.as_str(), "who-we-are");
    }
}
