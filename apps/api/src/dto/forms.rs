use flowcms_application::{ItemForm, SchemaLoad};
use flowcms_domain::{EditState, FieldIssue};
use serde::Serialize;
use ts_rs::TS;

use super::FieldResponse;

/// Schema load outcome of a collection.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/schema-status-response.ts"
)]
pub struct SchemaStatusResponse {
    /// One of `ready`, `no_fields` or `failed`.
    pub status: &'static str,
    pub reason: Option<String>,
    pub fields: Vec<FieldResponse>,
}

impl From<&SchemaLoad> for SchemaStatusResponse {
    fn from(schema: &SchemaLoad) -> Self {
        match schema {
            SchemaLoad::Ready(schema) => Self {
                status: "ready",
                reason: None,
                fields: schema.fields().iter().map(FieldResponse::from).collect(),
            },
            SchemaLoad::NoFields => Self {
                status: "no_fields",
                reason: None,
                fields: Vec::new(),
            },
            SchemaLoad::Failed { reason } => Self {
                status: "failed",
                reason: Some(reason.clone()),
                fields: Vec::new(),
            },
        }
    }
}

/// Create or edit form of a collection item.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/item-form-response.ts"
)]
pub struct ItemFormResponse {
    pub schema: SchemaStatusResponse,
    #[ts(type = "unknown")]
    pub state: Option<EditState>,
}

impl From<ItemForm> for ItemFormResponse {
    fn from(form: ItemForm) -> Self {
        Self {
            schema: SchemaStatusResponse::from(&form.schema),
            state: form.state,
        }
    }
}

/// Required field left empty by a form submission.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/field-issue-response.ts"
)]
pub struct FieldIssueResponse {
    pub slug: String,
    pub display_name: String,
    pub message: String,
}

impl From<FieldIssue> for FieldIssueResponse {
    fn from(issue: FieldIssue) -> Self {
        Self {
            slug: issue.slug().to_owned(),
            display_name: issue.display_name().to_owned(),
            message: issue.message().to_owned(),
        }
    }
}
