//! Public page and post rendering.

use askama::Template;
use axum::{
    extract::{Path, State},
    response::Html,
};
use tracing::instrument;

use driftwood_core::{Slug, excerpt};

use crate::db::{PageRepository, PostRepository, SegmentRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::{Page, Segment, SegmentKind, SegmentPayload};
use crate::state::AppState;

use super::{SiteChrome, load_chrome};

// =============================================================================
// Segment partials
// =============================================================================

/// A carousel slide for templates.
pub struct SlideView {
    pub image_url: String,
    pub caption: Option<String>,
    pub link_url: Option<String>,
}

#[derive(Template)]
#[template(path = "segments/carousel.html")]
struct CarouselPartial {
    slides: Vec<SlideView>,
}

#[derive(Template)]
#[template(path = "segments/text_block.html")]
struct TextBlockPartial {
    heading: Option<String>,
    body_html: String,
}

/// A gallery image for templates.
pub struct GalleryImageView {
    pub image_url: String,
    pub alt: String,
}

#[derive(Template)]
#[template(path = "segments/gallery.html")]
struct GalleryPartial {
    images: Vec<GalleryImageView>,
}

#[derive(Template)]
#[template(path = "segments/cta.html")]
struct CtaPartial {
    heading: String,
    body: Option<String>,
    button_label: String,
    button_url: String,
}

#[derive(Template)]
#[template(path = "segments/contact_form.html")]
struct ContactFormPartial {
    heading: Option<String>,
    intro: Option<String>,
}

/// A post card in a posts segment.
pub struct PostCard {
    pub title: String,
    pub href: String,
    pub excerpt: Option<String>,
    pub published_on: String,
}

#[derive(Template)]
#[template(path = "segments/posts.html")]
struct PostsPartial {
    heading: Option<String>,
    posts: Vec<PostCard>,
}

/// Render one segment to an HTML fragment.
async fn render_segment(state: &AppState, page: &Page, segment: &Segment) -> Result<String> {
    let html = match &segment.payload {
        SegmentPayload::Carousel { slides } => CarouselPartial {
            slides: slides
                .iter()
                .map(|s| SlideView {
                    image_url: s.image_url.clone(),
                    caption: s.caption.clone(),
                    link_url: s.link_url.clone(),
                })
                .collect(),
        }
        .render(),
        SegmentPayload::TextBlock { heading, body_html } => TextBlockPartial {
            heading: heading.clone(),
            body_html: body_html.clone(),
        }
        .render(),
        SegmentPayload::Gallery { images } => GalleryPartial {
            images: images
                .iter()
                .map(|i| GalleryImageView {
                    image_url: i.image_url.clone(),
                    alt: i.alt.clone().unwrap_or_default(),
                })
                .collect(),
        }
        .render(),
        SegmentPayload::Cta {
            heading,
            body,
            button_label,
            button_url,
        } => CtaPartial {
            heading: heading.clone(),
            body: body.clone(),
            button_label: button_label.clone(),
            button_url: button_url.clone(),
        }
        .render(),
        SegmentPayload::ContactForm { heading, intro } => ContactFormPartial {
            heading: heading.clone(),
            intro: intro.clone(),
        }
        .render(),
        SegmentPayload::Posts {
            heading,
            page_size,
            show_excerpts,
        } => {
            let posts = PostRepository::new(state.pool())
                .list_for_segment(segment.id, true)
                .await?;

            let cards = posts
                .iter()
                .take(*page_size as usize)
                .map(|post| PostCard {
                    title: post.title.clone(),
                    href: format!("/{}/{}", page.slug, post.slug),
                    excerpt: show_excerpts.then(|| post.excerpt.clone()),
                    published_on: post.created_at.format("%B %e, %Y").to_string(),
                })
                .collect();

            PostsPartial {
                heading: heading.clone(),
                posts: cards,
            }
            .render()
        }
    };

    html.map_err(|e| AppError::Internal(format!("template render failed: {e}")))
}

// =============================================================================
// Page templates
// =============================================================================

/// Public page template.
#[derive(Template)]
#[template(path = "public/page.html")]
pub struct PageTemplate {
    pub chrome: SiteChrome,
    pub title: String,
    pub segments_html: Vec<String>,
}

/// Public post template.
#[derive(Template)]
#[template(path = "public/post.html")]
pub struct PostTemplate {
    pub chrome: SiteChrome,
    pub title: String,
    pub body_html: String,
    pub author: Option<String>,
    pub published_on: String,
    pub back_href: String,
    pub description: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Render a page and cache it under `path`.
async fn render_page(state: &AppState, page: &Page, path: &str) -> Result<Html<String>> {
    let segments_repo = SegmentRepository::new(state.pool());

    // Chrome and segments have no ordering dependency.
    let (chrome, segments) = tokio::join!(load_chrome(state), segments_repo.list_for_page(page.id));
    let chrome = chrome?;
    let segments = segments?;

    let mut segments_html = Vec::with_capacity(segments.len());
    for segment in &segments {
        segments_html.push(render_segment(state, page, segment).await?);
    }

    let html = PageTemplate {
        chrome,
        title: page.title.clone(),
        segments_html,
    }
    .render()
    .map_err(|e| AppError::Internal(format!("template render failed: {e}")))?;

    state.store_render(path.to_owned(), html.clone()).await;
    Ok(Html(html))
}

/// Display the home page: the page whose slug is `home`, or the first
/// published page.
#[instrument(skip_all)]
pub async fn home(State(state): State<AppState>) -> Result<Html<String>> {
    if let Some(cached) = state.cached_render("/").await {
        return Ok(Html(cached));
    }

    let repo = PageRepository::new(state.pool());
    let home_slug = Slug::generate("home");
    let page = match repo.get_published_by_slug(&home_slug).await? {
        Some(page) => page,
        None => repo
            .first_published()
            .await?
            .ok_or_else(|| AppError::NotFound("no published pages".to_owned()))?,
    };

    render_page(&state, &page, "/").await
}

/// Display a published page by slug.
#[instrument(skip(state))]
pub async fn show_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>> {
    let path = format!("/{slug}");
    if let Some(cached) = state.cached_render(&path).await {
        return Ok(Html(cached));
    }

    let slug = Slug::parse(&slug).map_err(|_| AppError::NotFound(format!("page {slug}")))?;

    let page = PageRepository::new(state.pool())
        .get_published_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("page {slug}")))?;

    render_page(&state, &page, &path).await
}

/// Display a published post: `/{page_slug}/{post_slug}` resolves the page,
/// its posts-kind segment, then the post within that segment.
#[instrument(skip(state))]
pub async fn show_post(
    State(state): State<AppState>,
    Path((page_slug, post_slug)): Path<(String, String)>,
) -> Result<Html<String>> {
    let path = format!("/{page_slug}/{post_slug}");
    if let Some(cached) = state.cached_render(&path).await {
        return Ok(Html(cached));
    }

    let not_found = || AppError::NotFound(format!("post {page_slug}/{post_slug}"));

    let page_slug = Slug::parse(&page_slug).map_err(|_| not_found())?;
    let post_slug = Slug::parse(&post_slug).map_err(|_| not_found())?;

    let page = PageRepository::new(state.pool())
        .get_published_by_slug(&page_slug)
        .await?
        .ok_or_else(not_found)?;

    // The page's first posts-kind segment owns its posts.
    let segments = SegmentRepository::new(state.pool())
        .list_for_page(page.id)
        .await?;
    let posts_segment = segments
        .iter()
        .find(|s| s.kind() == SegmentKind::Posts)
        .ok_or_else(not_found)?;

    let post = PostRepository::new(state.pool())
        .get_published_by_slug(posts_segment.id, &post_slug)
        .await?
        .ok_or_else(not_found)?;

    let user_repo = UserRepository::new(state.pool());
    let (chrome, author) = tokio::join!(
        load_chrome(&state),
        user_repo.get_by_id(post.author_id)
    );
    let chrome = chrome?;
    let author = author.ok().flatten().map(|u| u.display_name);

    let description = excerpt(&post.body_html, 160);

    let html = PostTemplate {
        chrome,
        title: post.title.clone(),
        body_html: post.body_html.clone(),
        author,
        published_on: post.created_at.format("%B %e, %Y").to_string(),
        back_href: page.path(),
        description,
    }
    .render()
    .map_err(|e| AppError::Internal(format!("template render failed: {e}")))?;

    state.store_render(path.clone(), html.clone()).await;
    Ok(Html(html))
}
