//! Demo content seeding.
//!
//! Creates a published `home` page with one segment of each kind, a couple
//! of posts, and a navigation menu. Idempotent: a database that already has
//! a `home` page is left alone.

use secrecy::ExposeSecret;
use sqlx::PgPool;

use driftwood_core::{Email, PublishStatus, Slug};
use driftwood_site::db::pages::NewPage;
use driftwood_site::db::posts::NewPost;
use driftwood_site::db::segments::NewSegment;
use driftwood_site::db::menu::MenuItemInput;
use driftwood_site::db::{
    MenuRepository, PageRepository, PostRepository, SegmentRepository, SettingsRepository,
    UserRepository,
};
use driftwood_site::content::render_markdown;
use driftwood_site::models::{
    MenuTarget, SegmentPayload,
    segment::{CarouselSlide, GalleryImage},
};

use super::{CommandError, database_url};

/// Seed demo content authored by the user with the given email.
///
/// # Errors
///
/// Returns an error if the author doesn't exist or a write fails.
pub async fn run(author_email: &str) -> Result<(), CommandError> {
    let email = Email::parse(author_email)
        .map_err(|e| CommandError::InvalidInput(format!("author email: {e}")))?;

    let url = database_url()?;
    let pool = PgPool::connect(url.expose_secret()).await?;

    let author = UserRepository::new(&pool)
        .get_by_email(&email)
        .await?
        .ok_or_else(|| {
            CommandError::InvalidInput(format!(
                "no user with email {email}; create one with `driftwood admin create`"
            ))
        })?;

    let pages = PageRepository::new(&pool);
    let home_slug = Slug::generate("home");
    if pages.get_published_by_slug(&home_slug).await?.is_some() {
        tracing::info!("home page already exists, nothing to seed");
        return Ok(());
    }

    // Settings singleton, same lazy path the admin panel takes.
    SettingsRepository::new(&pool).get_or_create().await?;

    let home = pages
        .create(NewPage {
            title: "Home".to_owned(),
            slug: home_slug,
            status: PublishStatus::Published,
            created_by: author.id,
        })
        .await?;
    tracing::info!(page_id = %home.id, "created home page");

    let news = pages
        .create(NewPage {
            title: "News".to_owned(),
            slug: Slug::generate("News"),
            status: PublishStatus::Published,
            created_by: author.id,
        })
        .await?;

    seed_home_segments(&pool, home.id.as_i32(), author.id.as_i32()).await?;

    // News page: a posts segment with two sample entries.
    let segments = SegmentRepository::new(&pool);
    let posts_segment = segments
        .create(NewSegment {
            page_id: news.id,
            payload: SegmentPayload::Posts {
                heading: Some("Latest news".to_owned()),
                page_size: 10,
                show_excerpts: true,
            },
            created_by: author.id,
        })
        .await?;

    let posts = PostRepository::new(&pool);
    for (title, body) in [
        (
            "Welcome to the new site",
            "We have rebuilt our site from the ground up. Expect fresh \
             updates here every month.",
        ),
        (
            "Opening hours for the summer",
            "From June onwards we are open **seven days a week**. Drop by \
             and say hello!",
        ),
    ] {
        let body_html = render_markdown(body);
        let excerpt = driftwood_core::excerpt(&body_html, 200);
        posts
            .create(NewPost {
                segment_id: posts_segment.id,
                title: title.to_owned(),
                slug: Slug::generate(title),
                body: body.to_owned(),
                body_html,
                excerpt,
                status: PublishStatus::Published,
                author_id: author.id,
            })
            .await?;
    }

    let menu = MenuRepository::new(&pool);
    menu.create(MenuItemInput {
        label: "Home".to_owned(),
        target: MenuTarget::Page { page_id: home.id },
        visible: true,
    })
    .await?;
    menu.create(MenuItemInput {
        label: "News".to_owned(),
        target: MenuTarget::Page { page_id: news.id },
        visible: true,
    })
    .await?;

    tracing::info!("seeding complete");
    Ok(())
}

/// One segment of each remaining kind on the home page.
async fn seed_home_segments(
    pool: &PgPool,
    home_page_id: i32,
    author_id: i32,
) -> Result<(), CommandError> {
    use driftwood_core::{PageId, UserId};

    let segments = SegmentRepository::new(pool);
    let page_id = PageId::new(home_page_id);
    let created_by = UserId::new(author_id);

    let payloads = vec![
        SegmentPayload::Carousel {
            slides: vec![
                CarouselSlide {
                    image_url: "/static/images/hero-1.jpg".to_owned(),
                    caption: Some("Hand-made, every time".to_owned()),
                    link_url: None,
                },
                CarouselSlide {
                    image_url: "/static/images/hero-2.jpg".to_owned(),
                    caption: None,
                    link_url: Some("/news".to_owned()),
                },
            ],
        },
        SegmentPayload::TextBlock {
            heading: Some("Who we are".to_owned()),
            body_html: render_markdown(
                "A small studio doing one thing well. We care about craft, \
                 materials, and the people we work with.",
            ),
        },
        SegmentPayload::Gallery {
            images: vec![
                GalleryImage {
                    image_url: "/static/images/work-1.jpg".to_owned(),
                    alt: Some("Workshop bench".to_owned()),
                },
                GalleryImage {
                    image_url: "/static/images/work-2.jpg".to_owned(),
                    alt: Some("Finished piece".to_owned()),
                },
            ],
        },
        SegmentPayload::Cta {
            heading: "Come visit the studio".to_owned(),
            body: Some("Open Tuesday to Saturday, 10:00-18:00.".to_owned()),
            button_label: "Plan your visit".to_owned(),
            button_url: "/news".to_owned(),
        },
        SegmentPayload::ContactForm {
            heading: Some("Get in touch".to_owned()),
            intro: Some("Questions, commissions, anything - we read it all.".to_owned()),
        },
    ];

    for payload in payloads {
        segments
            .create(NewSegment {
                page_id,
                payload,
                created_by,
            })
            .await?;
    }

    Ok(())
}
