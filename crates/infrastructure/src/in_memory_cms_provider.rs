use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use flowcms_application::CmsProvider;
use flowcms_core::{AppError, AppResult};
use flowcms_domain::{Collection, FieldDescriptor, Item, ItemSubmission, PublishResult, Site};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory CMS provider for tests and local demo mode.
///
/// Collections keep insertion order per site; items keep insertion order per
/// collection.
#[derive(Debug, Default)]
pub struct InMemoryCmsProvider {
    sites: RwLock<HashMap<String, Site>>,
    collections: RwLock<Vec<(String, Collection)>>,
    fields: RwLock<HashMap<String, Vec<FieldDescriptor>>>,
    items: RwLock<HashMap<String, Vec<Item>>>,
}

impl InMemoryCmsProvider {
    /// Creates an empty in-memory provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores or replaces a site.
    pub async fn save_site(&self, site: Site) {
        self.sites
            .write()
            .await
            .insert(site.id().as_str().to_owned(), site);
    }

    /// Stores a collection of a site with its field definitions.
    pub async fn save_collection(
        &self,
        site_id: &str,
        collection: Collection,
        fields: Vec<FieldDescriptor>,
    ) -> AppResult<()> {
        let collection_id = collection.id().as_str().to_owned();
        let mut collections = self.collections.write().await;
        if collections
            .iter()
            .any(|(_, stored)| stored.id().as_str() == collection_id)
        {
            return Err(AppError::Conflict(format!(
                "collection '{collection_id}' already exists"
            )));
        }

        collections.push((site_id.to_owned(), collection));
        self.fields.write().await.insert(collection_id.clone(), fields);
        self.items.write().await.entry(collection_id).or_default();
        Ok(())
    }

    async fn require_collection(&self, collection_id: &str) -> AppResult<()> {
        let exists = self
            .collections
            .read()
            .await
            .iter()
            .any(|(_, collection)| collection.id().as_str() == collection_id);
        if exists {
            Ok(())
        } else {
            Err(AppError::NotFound(format!(
                "collection '{collection_id}' does not exist"
            )))
        }
    }
}

fn stored_item(
    id: &str,
    submission: ItemSubmission,
    created_on: Option<DateTime<Utc>>,
) -> AppResult<Item> {
    let is_draft = submission.is_draft();
    let is_archived = submission.is_archived();
    let now = Utc::now();
    Ok(
        Item::new(id, submission.into_field_data(), is_draft, is_archived)?.with_timestamps(
            created_on.or(Some(now)),
            Some(now),
            (!is_draft).then_some(now),
        ),
    )
}

#[async_trait]
impl CmsProvider for InMemoryCmsProvider {
    async fn list_collections(&self, site_id: &str) -> AppResult<Vec<Collection>> {
        Ok(self
            .collections
            .read()
            .await
            .iter()
            .filter_map(|(stored_site_id, collection)| {
                (stored_site_id == site_id).then_some(collection.clone())
            })
            .collect())
    }

    async fn get_collection(&self, collection_id: &str) -> AppResult<Collection> {
        let collection = self
            .collections
            .read()
            .await
            .iter()
            .find(|(_, collection)| collection.id().as_str() == collection_id)
            .map(|(_, collection)| collection.clone())
            .ok_or_else(|| {
                AppError::NotFound(format!("collection '{collection_id}' does not exist"))
            })?;

        let fields = self
            .fields
            .read()
            .await
            .get(collection_id)
            .cloned()
            .unwrap_or_default();
        Ok(collection.with_fields(fields))
    }

    async fn get_collection_fields(&self, collection_id: &str) -> AppResult<Vec<FieldDescriptor>> {
        self.require_collection(collection_id).await?;
        Ok(self
            .fields
            .read()
            .await
            .get(collection_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_items(&self, collection_id: &str) -> AppResult<Vec<Item>> {
        self.require_collection(collection_id).await?;
        Ok(self
            .items
            .read()
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
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "item '{item_id}' does not exist in collection '{collection_id}'"
                ))
            })
    }

    async fn create_item(
        &self,
        collection_id: &str,
        submission: ItemSubmission,
    ) -> AppResult<Item> {
        self.require_collection(collection_id).await?;
        let item = stored_item(&Uuid::new_v4().simple().to_string(), submission, None)?;
        self.items
            .write()
            .await
            .entry(collection_id.to_owned())
            .or_default()
            .push(item.clone());
        Ok(item)
    }

    async fn update_item(
        &self,
        collection_id: &str,
        item_id: &str,
        submission: ItemSubmission,
    ) -> AppResult<Item> {
        self.require_collection(collection_id).await?;
        let mut items = self.items.write().await;
        let stored = items
            .get_mut(collection_id)
            .and_then(|items| items.iter_mut().find(|item| item.id().as_str() == item_id))
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "item '{item_id}' does not exist in collection '{collection_id}'"
                ))
            })?;

        let updated = stored_item(item_id, submission, stored.created_on())?;
        *stored = updated.clone();
        Ok(updated)
    }

    async fn delete_item(&self, collection_id: &str, item_id: &str) -> AppResult<()> {
        self.require_collection(collection_id).await?;
        let mut items = self.items.write().await;
        let collection_items = items.entry(collection_id.to_owned()).or_default();
        let before = collection_items.len();
        collection_items.retain(|item| item.id().as_str() != item_id);

        if collection_items.len() == before {
            return Err(AppError::NotFound(format!(
                "item '{item_id}' does not exist in collection '{collection_id}'"
            )));
        }

        Ok(())
    }

    async fn get_site(&self, site_id: &str) -> AppResult<Site> {
        self.sites
            .read()
            .await
            .get(site_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("site '{site_id}' does not exist")))
    }

    async fn publish_site(&self, site_id: &str, domains: Vec<String>) -> AppResult<PublishResult> {
        let site = self.get_site(site_id).await?;
        let unknown_domain = domains.iter().find(|domain_id| {
            !site
                .custom_domains()
                .iter()
                .any(|domain| domain.id().as_str() == domain_id.as_str())
        });
        if let Some(domain_id) = unknown_domain {
            return Err(AppError::Validation(format!(
                "domain '{domain_id}' is not attached to site '{site_id}'"
            )));
        }

        Ok(PublishResult::new(domains, true))
    }
}
