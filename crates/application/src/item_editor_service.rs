use flowcms_core::{AppError, AppResult};
use flowcms_domain::{EditState, FieldIssue, FieldSchema, Item, ItemSubmission, item_field_codec};
use tracing::info;

use crate::cms_service::{CmsService, SchemaLoad};


/// Create or edit form for one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemForm {
    /// Schema load outcome.
    pub schema: SchemaLoad,
    /// Edit state; present only when the schema is ready.
    pub state: Option<EditState>,
}

/// Application service running the create and edit form flows.
#[derive(Clone)]
pub struct ItemEditorService {
    cms_service: CmsService,
}

impl ItemEditorService {
    /// Creates a new editor service.
    #[must_use]
    pub fn new(cms_service: CmsService) -> Self {
        Self { cms_service }
    }

    /// Builds the empty form for a new item.
    pub async fn new_item_form(&self, collection_id: &str) -> ItemForm {
        let schema = self.cms_service.load_schema(collection_id).await;
        let state = schema.schema().map(item_field_codec::build_defaults);
        ItemForm { schema, state }
    }

    /// Builds the form for an existing item.
    pub async fn edit_item_form(&self, collection_id: &str, item_id: &str) -> AppResult<ItemForm> {
        let (schema, item) = futures::join!(
            self.cms_service.load_schema(collection_id),
            self.cms_service.get_item(collection_id, item_id)
        );
        let item = item?;

        let state = schema
            .schema()
            .map(|schema| item_field_codec::hydrate(schema, &item));
        Ok(ItemForm { schema, state })
    }

    /// Lists required fields the edit state leaves empty.
    pub async fn validate(
        &self,
        collection_id: &str,
        state: &EditState,
    ) -> AppResult<Vec<FieldIssue>> {
        let schema = self.ready_schema(collection_id).await?;
        let submission = item_field_codec::serialize(&schema, state);
        Ok(item_field_codec::validate_required(&schema, &submission))
    }

    /// Serializes the edit state and creates the item.
    pub async fn submit_new(&self, collection_id: &str, state: &EditState) -> AppResult<Item> {
        let submission = self.checked_submission(collection_id, state).await?;
        self.cms_service.create_item(collection_id, submission).await
    }

    /// Serializes the edit state and updates the item.
    pub async fn submit_update(
        &self,
        collection_id: &str,
        item_id: &str,
        state: &EditState,
    ) -> AppResult<Item> {
        let submission = self.checked_submission(collection_id, state).await?;
        self.cms_service
            .update_item(collection_id, item_id, submission)
            .await
    }

    async fn ready_schema(&self, collection_id: &str) -> AppResult<FieldSchema> {
        self.cms_service
            .load_schema(collection_id)
            .await
            .into_schema(collection_id)
    }

    async fn checked_submission(
        &self,
        collection_id: &str,
        state: &EditState,
    ) -> AppResult<ItemSubmission> {
        let schema = self.ready_schema(collection_id).await?;
        let submission = item_field_codec::serialize(&schema, state);

        let issues = item_field_codec::validate_required(&schema, &submission);
        if !issues.is_empty() {
            info!(
                collection_id,
                issue_count = issues.len(),
                "rejected item submission with missing required fields"
            );
            let messages: Vec<&str> = issues.iter().map(FieldIssue::message).collect();
            return Err(AppError::Validation(messages.join("; ")));
        }

        Ok(submission)
    }
}
