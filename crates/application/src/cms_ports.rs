use async_trait::async_trait;
use flowcms_core::AppResult;
use flowcms_domain::{Collection, FieldDescriptor, Item, ItemSubmission, PublishResult, Site};

/// Port for the headless CMS that owns collections, items and sites.
///
/// Implementations surface provider failures once; callers do not retry.
#[async_trait]
pub trait CmsProvider: Send + Sync {
    /// Lists collections of a site.
    async fn list_collections(&self, site_id: &str) -> AppResult<Vec<Collection>>;

    /// Returns collection metadata.
    async fn get_collection(&self, collection_id: &str) -> AppResult<Collection>;

    /// Returns the field definitions of a collection in provider order.
    async fn get_collection_fields(&self, collection_id: &str) -> AppResult<Vec<FieldDescriptor>>;

    /// Lists items of a collection.
    async fn list_items(&self, collection_id: &str) -> AppResult<Vec<Item>>;

    /// Returns one item.
    async fn get_item(&self, collection_id: &str, item_id: &str) -> AppResult<Item>;

    /// Creates an item and returns the stored result.
    async fn create_item(
        &self,
        collection_id: &str,
        submission: ItemSubmission,
    ) -> AppResult<Item>;

    /// Replaces an item's field data and flags.
    async fn update_item(
        &self,
        collection_id: &str,
        item_id: &str,
        submission: ItemSubmission,
    ) -> AppResult<Item>;

    /// Deletes an item.
    async fn delete_item(&self, collection_id: &str, item_id: &str) -> AppResult<()>;

    /// Returns site metadata.
    async fn get_site(&self, site_id: &str) -> AppResult<Site>;

    /// Publishes a site to the given custom domains and its `webflow.io` subdomain.
    async fn publish_site(&self, site_id: &str, domains: Vec<String>) -> AppResult<PublishResult>;
}
