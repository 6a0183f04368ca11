use flowcms_core::AppResult;
use flowcms_domain::{Collection, Site};
use futures::future::join_all;
use tracing::warn;

use super::{CmsService, SchemaLoad, require_id};

/// Per-collection dashboard figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionStats {
    /// Both reads succeeded.
    Counted {
        /// Number of schema fields.
        field_count: usize,
        /// Number of stored items.
        item_count: usize,
        /// Items still in draft.
        draft_count: usize,
        /// Archived items.
        archived_count: usize,
    },
    /// One of the reads failed; siblings are unaffected.
    Failed {
        /// Human-readable failure reason.
        reason: String,
    },
}

/// One collection on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionOverview {
    /// Collection metadata.
    pub collection: Collection,
    /// Aggregated figures or failure marker.
    pub stats: CollectionStats,
}

/// Dashboard data for one site.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteOverview {
    /// Site metadata.
    pub site: Site,
    /// Collections in provider order.
    pub collections: Vec<CollectionOverview>,
}

impl CmsService {
    /// Aggregates schema and item figures for every collection of a site.
    ///
    /// Collections are read concurrently and all reads are joined before
    /// returning.
    pub async fn collection_overview(&self, site_id: &str) -> AppResult<SiteOverview> {
        require_id("siteId", site_id)?;

        let (site, collections) = futures::try_join!(
            self.provider.get_site(site_id),
            self.provider.list_collections(site_id)
        )?;

        let stats = join_all(
            collections
                .iter()
                .map(|collection| self.collection_stats(collection.id().as_str())),
        )
        .await;

        let collections = collections
            .into_iter()
            .zip(stats)
            .map(|(collection, stats)| CollectionOverview { collection, stats })
            .collect();

        Ok(SiteOverview { site, collections })
    }

    async fn collection_stats(&self, collection_id: &str) -> CollectionStats {
        let (schema, items) = futures::join!(
            self.load_schema(collection_id),
            self.provider.list_items(collection_id)
        );

        let field_count = match schema {
            SchemaLoad::Ready(schema) => schema.fields().len(),
            SchemaLoad::NoFields => 0,
            SchemaLoad::Failed { reason } => return CollectionStats::Failed { reason },
        };

        match items {
            Ok(items) => CollectionStats::Counted {
                field_count,
                item_count: items.len(),
                draft_count: items.iter().filter(|item| item.is_draft()).count(),
                archived_count: items.iter().filter(|item| item.is_archived()).count(),
            },
            Err(error) => {
                warn!(collection_id, error = %error, "failed to list collection items");
                CollectionStats::Failed {
                    reason: error.to_string(),
                }
            }
        }
    }
}
