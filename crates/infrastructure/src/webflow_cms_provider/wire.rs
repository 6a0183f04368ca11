use chrono::{DateTime, Utc};
use flowcms_core::{AppError, AppResult};
use flowcms_domain::{Collection, CustomDomain, FieldDescriptor, Item, PublishResult, Site};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// List response that is either wrapped in a named key or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum Listing<T> {
    Wrapped(Envelope<T>),
    Bare(Vec<T>),
}

#[derive(Debug, Deserialize)]
pub(super) struct Envelope<T> {
    #[serde(alias = "collections", alias = "items", alias = "fields")]
    entries: Vec<T>,
}

impl<T> Listing<T> {
    pub(super) fn into_entries(self) -> Vec<T> {
        match self {
            Self::Wrapped(envelope) => envelope.entries,
            Self::Bare(entries) => entries,
        }
    }
}

/// Field definition as sent by the v2 API and the legacy v1 API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WebflowField {
    #[serde(default, alias = "_id")]
    id: Option<String>,
    #[serde(default)]
    slug: String,
    #[serde(default, alias = "name")]
    display_name: Option<String>,
    #[serde(default, rename = "type")]
    type_tag: String,
    #[serde(default, alias = "required")]
    is_required: bool,
    #[serde(default)]
    help_text: Option<String>,
}

impl TryFrom<WebflowField> for FieldDescriptor {
    type Error = AppError;

    fn try_from(field: WebflowField) -> AppResult<Self> {
        FieldDescriptor::new(
            field.id,
            field.slug,
            field.display_name,
            field.type_tag,
            field.is_required,
            field.help_text,
        )
    }
}

/// Collection response; fields may be embedded under either key.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WebflowCollection {
    id: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    singular_name: String,
    #[serde(default)]
    slug: String,
    #[serde(default, alias = "collectionFields")]
    pub(super) fields: Option<Vec<WebflowField>>,
    #[serde(default)]
    last_updated: Option<String>,
}

impl TryFrom<WebflowCollection> for Collection {
    type Error = AppError;

    fn try_from(collection: WebflowCollection) -> AppResult<Self> {
        let fields = collection
            .fields
            .unwrap_or_default()
            .into_iter()
            .map(FieldDescriptor::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Collection::new(
            collection.id,
            collection.display_name,
            collection.singular_name,
            collection.slug,
        )?
        .with_fields(fields)
        .with_last_updated(parse_instant(collection.last_updated.as_deref())))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WebflowItem {
    id: String,
    #[serde(default)]
    field_data: Map<String, Value>,
    #[serde(default)]
    is_draft: bool,
    #[serde(default)]
    is_archived: bool,
    #[serde(default)]
    created_on: Option<String>,
    #[serde(default)]
    last_updated: Option<String>,
    #[serde(default)]
    last_published: Option<String>,
}

impl TryFrom<WebflowItem> for Item {
    type Error = AppError;

    fn try_from(item: WebflowItem) -> AppResult<Self> {
        Ok(
            Item::new(item.id, item.field_data, item.is_draft, item.is_archived)?.with_timestamps(
                parse_instant(item.created_on.as_deref()),
                parse_instant(item.last_updated.as_deref()),
                parse_instant(item.last_published.as_deref()),
            ),
        )
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct WebflowCustomDomain {
    id: String,
    #[serde(default)]
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WebflowSite {
    id: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    short_name: String,
    #[serde(default)]
    last_published: Option<String>,
    #[serde(default)]
    custom_domains: Vec<WebflowCustomDomain>,
}

impl TryFrom<WebflowSite> for Site {
    type Error = AppError;

    fn try_from(site: WebflowSite) -> AppResult<Self> {
        let custom_domains = site
            .custom_domains
            .into_iter()
            .map(|domain| CustomDomain::new(domain.id, domain.url))
            .collect::<AppResult<Vec<_>>>()?;

        Site::new(
            site.id,
            site.display_name,
            site.short_name,
            parse_instant(site.last_published.as_deref()),
            custom_domains,
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PublishRequest {
    pub(super) custom_domains: Vec<String>,
    pub(super) publish_to_webflow_subdomain: bool,
}

/// Publish acknowledgement; domains are echoed as ids or as domain objects.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PublishResponse {
    #[serde(default)]
    custom_domains: Vec<Value>,
    #[serde(default)]
    publish_to_webflow_subdomain: bool,
}

impl From<PublishResponse> for PublishResult {
    fn from(response: PublishResponse) -> Self {
        let custom_domain_ids = response
            .custom_domains
            .into_iter()
            .filter_map(|domain| match domain {
                Value::String(id) => Some(id),
                Value::Object(object) => object
                    .get("id")
                    .and_then(Value::as_str)
                    .map(str::to_owned),
                _ => None,
            })
            .collect();

        PublishResult::new(custom_domain_ids, response.publish_to_webflow_subdomain)
    }
}

fn parse_instant(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
        .map(|value| value.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use flowcms_domain::{Collection, FieldDescriptor, FieldType, PublishResult};
    use serde_json::json;

    use super::{Listing, PublishResponse, WebflowCollection, WebflowField};

    #[test]
    fn listings_accept_wrapped_and_bare_shapes() {
        let wrapped: Listing<WebflowField> = serde_json::from_value(json!({
            "fields": [{ "slug": "name", "type": "PlainText" }]
        }))
        .unwrap_or_else(|_| unreachable!());
        let bare: Listing<WebflowField> =
            serde_json::from_value(json!([{ "slug": "name", "type": "PlainText" }]))
                .unwrap_or_else(|_| unreachable!());

        assert_eq!(wrapped.into_entries().len(), 1);
        assert_eq!(bare.into_entries().len(), 1);
    }

    #[test]
    fn legacy_field_shape_maps_to_descriptor() {
        let field: WebflowField = serde_json::from_value(json!({
            "_id": "f1",
            "slug": "featured",
            "name": "Featured",
            "type": "Bool",
            "required": true
        }))
        .unwrap_or_else(|_| unreachable!());
        let descriptor = FieldDescriptor::try_from(field).unwrap_or_else(|_| unreachable!());

        assert_eq!(descriptor.id(), Some("f1"));
        assert_eq!(descriptor.display_name().as_str(), "Featured");
        assert_eq!(descriptor.field_type(), FieldType::Switch);
        assert!(descriptor.is_required());
    }

    #[test]
    fn collection_reads_embedded_collection_fields() {
        let collection: WebflowCollection = serde_json::from_value(json!({
            "id": "c1",
            "displayName": "Posts",
            "singularName": "Post",
            "slug": "posts",
            "collectionFields": [{ "slug": "name", "displayName": "Name", "type": "PlainText", "isRequired": true }],
            "lastUpdated": "2024-01-01T00:00:00.000Z"
        }))
        .unwrap_or_else(|_| unreachable!());
        let collection = Collection::try_from(collection).unwrap_or_else(|_| unreachable!());

        assert_eq!(collection.fields().len(), 1);
        assert!(collection.last_updated().is_some());
    }

    #[test]
    fn publish_response_accepts_domain_objects() {
        let response: PublishResponse = serde_json::from_value(json!({
            "customDomains": [{ "id": "d1", "url": "example.com" }, "d2"],
            "publishToWebflowSubdomain": true
        }))
        .unwrap_or_else(|_| unreachable!());
        let result = PublishResult::from(response);

        assert_eq!(result.custom_domain_ids(), ["d1".to_owned(), "d2".to_owned()]);
        assert!(result.published_to_subdomain());
    }
}
