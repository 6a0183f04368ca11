use flowcms_application::CmsProvider;
use flowcms_core::AppResult;
use flowcms_domain::{Collection, CustomDomain, FieldDescriptor, ItemSubmission, Site};
use flowcms_infrastructure::InMemoryCmsProvider;
use serde_json::{Map, Value, json};
use tracing::info;

const DEV_SEED_SITE_ID: &str = "demo-site";
const DEV_SEED_SITE_NAME: &str = "Northwind Journal";
const DEV_SEED_DOMAIN_ID: &str = "demo-domain";
const DEV_SEED_DOMAIN_URL: &str = "journal.northwind.test";
const DEV_SEED_POSTS_ID: &str = "demo-posts";
const DEV_SEED_AUTHORS_ID: &str = "demo-authors";

/// Seeds the in-memory provider with a demo site used by `CMS_PROVIDER=memory`.
pub async fn run(provider: &InMemoryCmsProvider) -> AppResult<()> {
    provider
        .save_site(Site::new(
            DEV_SEED_SITE_ID,
            DEV_SEED_SITE_NAME,
            "northwind-journal",
            None,
            vec![CustomDomain::new(DEV_SEED_DOMAIN_ID, DEV_SEED_DOMAIN_URL)?],
        )?)
        .await;

    provider
        .save_collection(
            DEV_SEED_SITE_ID,
            Collection::new(DEV_SEED_AUTHORS_ID, "Authors", "Author", "authors")?,
            vec![
                field("name", "Name", "PlainText", true)?,
                field("email", "Email", "Email", false)?,
                field("avatar", "Avatar", "Image", false)?,
            ],
        )
        .await?;

    provider
        .save_collection(
            DEV_SEED_SITE_ID,
            Collection::new(DEV_SEED_POSTS_ID, "Blog Posts", "Blog Post", "blog-posts")?,
            vec![
                field("name", "Title", "PlainText", true)?,
                field("slug", "Slug", "PlainText", true)?,
                field("summary", "Summary", "RichText", false)?,
                field("cover", "Cover", "Image", false)?,
                field("gallery", "Gallery", "MultiImage", false)?,
                field("video", "Video", "VideoLink", false)?,
                field("featured", "Featured", "Switch", false)?,
                field("published-on", "Published On", "DateTime", false)?,
                field("accent", "Accent", "Color", false)?,
                field("reading-time", "Reading Time", "Number", false)?,
                field("author", "Author", "ItemRef", false)?,
                field("tags", "Tags", "ItemRefSet", false)?,
                field("source", "Source", "Link", false)?,
                field("attachment", "Attachment", "File", false)?,
                field("category", "Category", "Option", false)?,
            ],
        )
        .await?;

    let author = provider
        .create_item(
            DEV_SEED_AUTHORS_ID,
            submission(false, json!({
                "name": "Ada Byron",
                "email": "ada@northwind.test",
                "avatar": { "url": "https://images.northwind.test/ada.png", "alt": "Ada" }
            })),
        )
        .await?;

    provider
        .create_item(
            DEV_SEED_POSTS_ID,
            submission(false, json!({
                "name": "Launching the journal",
                "slug": "launching-the-journal",
                "summary": "<p>Why we started <strong>writing</strong> in public.</p>",
                "cover": { "url": "https://images.northwind.test/launch.jpg", "alt": "Launch" },
                "gallery": [
                    { "url": "https://images.northwind.test/one.jpg" },
                    { "url": "https://images.northwind.test/two.jpg" }
                ],
                "video": "https://youtu.be/dQw4w9WgXcQ",
                "featured": true,
                "published-on": "2024-03-15T14:30:00.000Z",
                "accent": "#1d4ed8",
                "reading-time": 4,
                "author": author.id().as_str(),
                "tags": ["launch", "company"],
                "source": "https://northwind.test/about",
                "category": "announcements"
            })),
        )
        .await?;

    provider
        .create_item(
            DEV_SEED_POSTS_ID,
            submission(true, json!({
                "name": "Notes from the warehouse floor",
                "slug": "notes-from-the-warehouse-floor",
                "video": "https://vimeo.com/76979871",
                "featured": false,
                "reading-time": 12.5
            })),
        )
        .await?;

    info!(site_id = DEV_SEED_SITE_ID, "seeded demo cms content");
    Ok(())
}

fn field(
    slug: &str,
    display_name: &str,
    type_tag: &str,
    is_required: bool,
) -> AppResult<FieldDescriptor> {
    FieldDescriptor::new(
        None,
        slug,
        Some(display_name.to_owned()),
        type_tag,
        is_required,
        None,
    )
}

fn submission(is_draft: bool, field_data: Value) -> ItemSubmission {
    let field_data = match field_data {
        Value::Object(field_data) => field_data,
        _ => Map::new(),
    };
    ItemSubmission::new(false, is_draft, field_data)
}
