use flowcms_application::CmsProvider;
use flowcms_core::AppError;
use flowcms_domain::{FieldType, ItemSubmission};
use serde_json::{Map, json};
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{WebflowClientConfig, WebflowCmsProvider};

fn provider(server: &MockServer, publish_live: bool) -> WebflowCmsProvider {
    let base_url = Url::parse(&server.uri()).unwrap_or_else(|_| unreachable!());
    WebflowCmsProvider::new(
        reqwest::Client::new(),
        WebflowClientConfig {
            api_base_url: base_url.clone(),
            legacy_api_base_url: base_url,
            access_token: "test-token".to_owned(),
            publish_live,
        },
    )
}

#[tokio::test]
async fn list_collections_sends_bearer_token_and_unwraps_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/sites/site-1/collections"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collections": [
                { "id": "c1", "displayName": "Posts", "singularName": "Post", "slug": "posts" }
            ]
        })))
        .mount(&server)
        .await;

    let collections = provider(&server, true)
        .list_collections("site-1")
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0].display_name(), "Posts");
}

#[tokio::test]
async fn fields_come_from_the_fields_endpoint_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/collections/c1/fields"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "f1", "slug": "name", "displayName": "Name", "type": "PlainText", "isRequired": true },
            { "id": "f2", "slug": "cover", "displayName": "Cover", "type": "Image" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let fields = provider(&server, true)
        .get_collection_fields("c1")
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(fields.len(), 2);
    assert_eq!(fields[1].field_type(), FieldType::Image);
}

#[tokio::test]
async fn fields_fall_back_to_the_collection_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/collections/c1/fields"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/collections/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "c1",
            "displayName": "Posts",
            "fields": [{ "slug": "name", "displayName": "Name", "type": "PlainText" }]
        })))
        .mount(&server)
        .await;

    let fields = provider(&server, true)
        .get_collection_fields("c1")
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].slug().as_str(), "name");
}

#[tokio::test]
async fn fields_fall_back_to_the_legacy_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/collections/c1/fields"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/collections/c1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/collections/c1/fields"))
        .and(header("accept-version", "1.0.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fields": [{ "_id": "f1", "slug": "featured", "name": "Featured", "type": "Bool", "required": false }]
        })))
        .mount(&server)
        .await;

    let fields = provider(&server, true)
        .get_collection_fields("c1")
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].field_type(), FieldType::Switch);
}

#[tokio::test]
async fn legacy_failure_is_returned_as_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let result = provider(&server, true).get_collection_fields("c1").await;

    assert!(matches!(
        result,
        Err(AppError::Upstream(ref message)) if message.contains("bad gateway")
    ));
}

#[tokio::test]
async fn status_codes_map_to_error_categories() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/collections/c1/items/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/sites/site-1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let provider = provider(&server, true);

    let missing = provider.get_item("c1", "missing").await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    let unauthorized = provider.get_site("site-1").await;
    assert!(matches!(unauthorized, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn live_create_posts_to_the_live_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/collections/c1/items/live"))
        .and(body_json(json!({
            "isArchived": false,
            "isDraft": false,
            "fieldData": { "name": "Hello" }
        })))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "id": "i1",
            "isDraft": false,
            "isArchived": false,
            "fieldData": { "name": "Hello" },
            "createdOn": "2024-05-01T10:00:00.000Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut field_data = Map::new();
    field_data.insert("name".to_owned(), json!("Hello"));
    let item = provider(&server, true)
        .create_item("c1", ItemSubmission::new(false, false, field_data))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(item.id().as_str(), "i1");
    assert!(item.created_on().is_some());
}

#[tokio::test]
async fn staged_update_patches_the_item() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/v2/collections/c1/items/i1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "i1",
            "isDraft": true,
            "fieldData": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let item = provider(&server, false)
        .update_item("c1", "i1", ItemSubmission::new(false, true, Map::new()))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert!(item.is_draft());
}

#[tokio::test]
async fn delete_accepts_empty_no_content_response() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/collections/c1/items/i1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let result = provider(&server, true).delete_item("c1", "i1").await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn publish_targets_domains_and_subdomain() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/sites/site-1/publish"))
        .and(body_json(json!({
            "customDomains": ["d1"],
            "publishToWebflowSubdomain": true
        })))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "customDomains": [{ "id": "d1", "url": "example.com" }],
            "publishToWebflowSubdomain": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = provider(&server, true)
        .publish_site("site-1", vec!["d1".to_owned()])
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(result.custom_domain_ids(), ["d1".to_owned()]);
    assert!(result.published_to_subdomain());
}
