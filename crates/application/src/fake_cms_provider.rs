use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use flowcms_core::{AppError, AppResult};
use flowcms_domain::{Collection, FieldDescriptor, Item, ItemSubmission, PublishResult, Site};
use tokio::sync::Mutex;

use crate::CmsProvider;

/// Scripted provider shared by the service tests.
pub(crate) struct FakeCmsProvider {
    pub(crate) site: Mutex<Option<Site>>,
    pub(crate) collections: Mutex<Vec<Collection>>,
    pub(crate) fields: Mutex<HashMap<String, Vec<FieldDescriptor>>>,
    pub(crate) items: Mutex<HashMap<String, Vec<Item>>>,
    pub(crate) failing_fields: Mutex<HashSet<String>>,
    pub(crate) failing_items: Mutex<HashSet<String>>,
    pub(crate) submissions: Mutex<Vec<ItemSubmission>>,
    pub(crate) published_domains: Mutex<Vec<Vec<String>>>,
}

impl FakeCmsProvider {
    pub(crate) fn new() -> Self {
        Self {
            site: Mutex::new(None),
            collections: Mutex::new(Vec::new()),
            fields: Mutex::new(HashMap::new()),
            items: Mutex::new(HashMap::new()),
            failing_fields: Mutex::new(HashSet::new()),
            failing_items: Mutex::new(HashSet::new()),
            submissions: Mutex::new(Vec::new()),
            published_domains: Mutex::new(Vec::new()),
        }
    }
}

pub(crate) fn field(slug: &str, type_tag: &str, is_required: bool) -> FieldDescriptor {
    FieldDescriptor::new(None, slug, None, type_tag, is_required, None)
        .unwrap_or_else(|_| unreachable!())
}

fn stored_item(id: &str, submission: ItemSubmission) -> AppResult<Item> {
    Item::new(
        id,
        submission.field_data().clone(),
        submission.is_draft(),
        submission.is_archived(),
    )
}

#[async_trait]
impl CmsProvider for FakeCmsProvider {
    async fn list_collections(&self, _site_id: &str) -> AppResult<Vec<Collection>> {
        Ok(self.collections.lock().await.clone())
    }

    async fn get_collection(&self, collection_id: &str) -> AppResult<Collection> {
        self.collections
            .lock()
            .await
            .iter()
            .find(|collection| collection.id().as_str() == collection_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("collection '{collection_id}'")))
    }

    async fn get_collection_fields(&self, collection_id: &str) -> AppResult<Vec<FieldDescriptor>> {
        if self.failing_fields.lock().await.contains(collection_id) {
            return Err(AppError::Upstream("status 500".to_owned()));
        }

        Ok(self
            .fields
            .lock()
            .await
            .get(collection_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_items(&self, collection_id: &str) -> AppResult<Vec<Item>> {
        if self.failing_items.lock().await.contains(collection_id) {
            return Err(AppError::Upstream("status 503".to_owned()));
        }

        Ok(self
            .items
            .lock()
            .await
            .get(collection_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_item(&self, collection_id: &str, item_id: &str) -> AppResult<Item> {
        self.list_items(collection_id)
            .await?
            .into_iter()
            .find(|item| item.id().as_str() == item_id)
            .ok_or_else(|| AppError::NotFound(format!("item '{item_id}'")))
    }

    async fn create_item(
        &self,
        _collection_id: &str,
        submission: ItemSubmission,
    ) -> AppResult<Item> {
        self.submissions.lock().await.push(submission.clone());
        stored_item("created-item", submission)
    }

    async fn update_item(
        &self,
        _collection_id: &str,
        item_id: &str,
        submission: ItemSubmission,
    ) -> AppResult<Item> {
        self.submissions.lock().await.push(submission.clone());
        stored_item(item_id, submission)
    }

    async fn delete_item(&self, collection_id: &str, item_id: &str) -> AppResult<()> {
        let mut items = self.items.lock().await;
        let collection_items = items
            .get_mut(collection_id)
            .ok_or_else(|| AppError::NotFound(format!("collection '{collection_id}'")))?;
        collection_items.retain(|item| item.id().as_str() != item_id);
        Ok(())
    }

    async fn get_site(&self, site_id: &str) -> AppResult<Site> {
        self.site
            .lock()
            .await
            .clone()
            .ok_or_else(|| AppError::NotFound(format!("site '{site_id}'")))
    }

    async fn publish_site(&self, _site_id: &str, domains: Vec<String>) -> AppResult<PublishResult> {
        self.published_domains.lock().await.push(domains.clone());
        Ok(PublishResult::new(domains, true))
    }
}
