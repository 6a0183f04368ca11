use std::sync::Arc;

use flowcms_core::{AppError, AppResult};
use flowcms_domain::{
    Collection, FieldDescriptor, FieldSchema, Item, ItemSubmission, PublishResult, Site,
};
use tracing::{info, warn};

use crate::cms_ports::CmsProvider;

mod overview;
mod rendering;


pub use overview::{CollectionOverview, CollectionStats, SiteOverview};
pub use rendering::{ItemListing, RenderedField, RenderedItem};

/// Outcome of loading a collection schema.
///
/// A collection without fields and a failed fetch are distinct states.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaLoad {
    /// Schema loaded with at least one field.
    Ready(FieldSchema),
    /// The provider returned no fields.
    NoFields,
    /// Fields could not be fetched or were inconsistent.
    Failed {
        /// Human-readable failure reason.
        reason: String,
    },
}

impl SchemaLoad {
    /// Returns the loaded schema, if any.
    #[must_use]
    pub fn schema(&self) -> Option<&FieldSchema> {
        match self {
            Self::Ready(schema) => Some(schema),
            Self::NoFields | Self::Failed { .. } => None,
        }
    }

    /// Converts the load outcome into a schema or an error.
    pub fn into_schema(self, collection_id: &str) -> AppResult<FieldSchema> {
        match self {
            Self::Ready(schema) => Ok(schema),
            Self::NoFields => Err(AppError::Validation(format!(
                "collection '{collection_id}' has no fields"
            ))),
            Self::Failed { reason } => Err(AppError::Upstream(format!(
                "failed to load fields of collection '{collection_id}': {reason}"
            ))),
        }
    }
}

/// Application service forwarding CMS operations to the configured provider.
#[derive(Clone)]
pub struct CmsService {
    provider: Arc<dyn CmsProvider>,
}

impl CmsService {
    /// Creates a new CMS service from a provider implementation.
    #[must_use]
    pub fn new(provider: Arc<dyn CmsProvider>) -> Self {
        Self { provider }
    }

    /// Lists collections of a site.
    pub async fn list_collections(&self, site_id: &str) -> AppResult<Vec<Collection>> {
        require_id("siteId", site_id)?;
        self.provider.list_collections(site_id).await
    }

    /// Returns collection metadata.
    pub async fn get_collection(&self, collection_id: &str) -> AppResult<Collection> {
        require_id("collectionId", collection_id)?;
        self.provider.get_collection(collection_id).await
    }

    /// Returns the raw field definitions of a collection.
    pub async fn collection_fields(&self, collection_id: &str) -> AppResult<Vec<FieldDescriptor>> {
        require_id("collectionId", collection_id)?;
        self.provider.get_collection_fields(collection_id).await
    }

    /// Loads and validates the schema of a collection.
    ///
    /// Unknown type tags are logged once per load.
    pub async fn load_schema(&self, collection_id: &str) -> SchemaLoad {
        if let Err(error) = require_id("collectionId", collection_id) {
            return SchemaLoad::Failed {
                reason: error.to_string(),
            };
        }

        let fields = match self.provider.get_collection_fields(collection_id).await {
            Ok(fields) => fields,
            Err(error) => {
                warn!(collection_id, error = %error, "failed to fetch collection fields");
                return SchemaLoad::Failed {
                    reason: error.to_string(),
                };
            }
        };

        if fields.is_empty() {
            return SchemaLoad::NoFields;
        }

        match FieldSchema::new(fields) {
            Ok(schema) => {
                for type_tag in schema.unknown_type_tags() {
                    warn!(
                        collection_id,
                        type_tag, "unknown field type, falling back to plain text"
                    );
                }
                SchemaLoad::Ready(schema)
            }
            Err(error) => {
                warn!(collection_id, error = %error, "rejected collection schema");
                SchemaLoad::Failed {
                    reason: error.to_string(),
                }
            }
        }
    }

    /// Lists stored items of a collection.
    pub async fn list_items(&self, collection_id: &str) -> AppResult<Vec<Item>> {
        require_id("collectionId", collection_id)?;
        self.provider.list_items(collection_id).await
    }

    /// Returns one stored item.
    pub async fn get_item(&self, collection_id: &str, item_id: &str) -> AppResult<Item> {
        require_id("collectionId", collection_id)?;
        require_id("itemId", item_id)?;
        self.provider.get_item(collection_id, item_id).await
    }

    /// Creates an item from a provider-shaped payload.
    pub async fn create_item(
        &self,
        collection_id: &str,
        submission: ItemSubmission,
    ) -> AppResult<Item> {
        require_id("collectionId", collection_id)?;
        let item = self.provider.create_item(collection_id, submission).await?;
        info!(collection_id, item_id = %item.id(), "created collection item");
        Ok(item)
    }

    /// Updates an item from a provider-shaped payload.
    pub async fn update_item(
        &self,
        collection_id: &str,
        item_id: &str,
        submission: ItemSubmission,
    ) -> AppResult<Item> {
        require_id("collectionId", collection_id)?;
        require_id("itemId", item_id)?;
        let item = self
            .provider
            .update_item(collection_id, item_id, submission)
            .await?;
        info!(collection_id, item_id, "updated collection item");
        Ok(item)
    }

    /// Deletes an item.
    pub async fn delete_item(&self, collection_id: &str, item_id: &str) -> AppResult<()> {
        require_id("collectionId", collection_id)?;
        require_id("itemId", item_id)?;
        self.provider.delete_item(collection_id, item_id).await?;
        info!(collection_id, item_id, "deleted collection item");
        Ok(())
    }

    /// Returns site metadata.
    pub async fn get_site(&self, site_id: &str) -> AppResult<Site> {
        require_id("siteId", site_id)?;
        self.provider.get_site(site_id).await
    }

    /// Publishes a site; without domains only the `webflow.io` subdomain is published.
    pub async fn publish_site(
        &self,
        site_id: &str,
        domains: Option<Vec<String>>,
    ) -> AppResult<PublishResult> {
        require_id("siteId", site_id)?;
        let domains = domains.unwrap_or_default();
        info!(site_id, domain_count = domains.len(), "publishing site");
        self.provider.publish_site(site_id, domains).await
    }
}

fn require_id(parameter: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "missing {parameter} parameter"
        )));
    }

    Ok(())
}
