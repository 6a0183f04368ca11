use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

/// API representation of a collection field definition.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/field-response.ts"
)]
pub struct FieldResponse {
    pub id: Option<String>,
    pub slug: String,
    pub display_name: String,
    /// Provider type tag as received.
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Registry type the tag resolved to.
    pub field_type: String,
    /// Editor input kind for the field type.
    pub input_kind: String,
    pub is_required: bool,
    pub help_text: Option<String>,
}

/// API representation of a collection.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/collection-response.ts"
)]
pub struct CollectionResponse {
    pub id: String,
    pub display_name: String,
    pub singular_name: String,
    pub slug: String,
    pub fields: Vec<FieldResponse>,
    pub last_updated: Option<String>,
}

/// API representation of a stored item.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/item-response.ts"
)]
pub struct ItemResponse {
    pub id: String,
    pub title: String,
    pub is_draft: bool,
    pub is_archived: bool,
    #[ts(type = "Record<string, unknown>")]
    pub field_data: Map<String, Value>,
    pub created_on: Option<String>,
    pub last_updated: Option<String>,
    pub last_published: Option<String>,
}

/// Incoming provider-shaped item payload, forwarded as-is.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/item-payload-request.ts"
)]
pub struct ItemPayloadRequest {
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub is_draft: bool,
    #[serde(default)]
    #[ts(type = "Record<string, unknown>")]
    pub field_data: Map<String, Value>,
}

/// API representation of a custom domain.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/custom-domain-response.ts"
)]
pub struct CustomDomainResponse {
    pub id: String,
    pub url: String,
}

/// API representation of a site.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/site-response.ts"
)]
pub struct SiteResponse {
    pub id: String,
    pub display_name: String,
    pub short_name: String,
    pub last_published: Option<String>,
    pub custom_domains: Vec<CustomDomainResponse>,
}

/// Incoming payload for site publishing.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/publish-site-request.ts"
)]
pub struct PublishSiteRequest {
    #[serde(default)]
    pub domains: Option<Vec<String>>,
}

/// Publish acknowledgement returned by the provider.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/publish-result-response.ts"
)]
pub struct PublishResultResponse {
    pub custom_domains: Vec<String>,
    pub publish_to_webflow_subdomain: bool,
}

/// Response of the publish route.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/publish-site-response.ts"
)]
pub struct PublishSiteResponse {
    pub success: bool,
    pub message: String,
    pub data: PublishResultResponse,
}
