use flowcms_application::{
    CollectionOverview, CollectionStats, ItemListing, RenderedField, RenderedItem, SiteOverview,
};
use flowcms_domain::FieldDisplay;
use serde::Serialize;
use ts_rs::TS;

use super::{CollectionResponse, ItemResponse, SchemaStatusResponse, SiteResponse};

/// Display form of one item field.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/rendered-field-response.ts"
)]
pub struct RenderedFieldResponse {
    pub slug: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    #[ts(type = "unknown")]
    pub display: FieldDisplay,
}

impl From<RenderedField> for RenderedFieldResponse {
    fn from(field: RenderedField) -> Self {
        Self {
            slug: field.slug,
            display_name: field.display_name,
            type_tag: field.type_tag,
            display: field.display,
        }
    }
}

/// Item with its rendered schema fields.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/rendered-item-response.ts"
)]
pub struct RenderedItemResponse {
    pub item: ItemResponse,
    pub fields: Vec<RenderedFieldResponse>,
}

impl From<RenderedItem> for RenderedItemResponse {
    fn from(rendered: RenderedItem) -> Self {
        Self {
            item: ItemResponse::from(rendered.item),
            fields: rendered
                .fields
                .into_iter()
                .map(RenderedFieldResponse::from)
                .collect(),
        }
    }
}

/// Rendered item list of a collection.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/item-listing-response.ts"
)]
pub struct ItemListingResponse {
    pub schema: SchemaStatusResponse,
    pub items: Vec<RenderedItemResponse>,
}

impl From<ItemListing> for ItemListingResponse {
    fn from(listing: ItemListing) -> Self {
        Self {
            schema: SchemaStatusResponse::from(&listing.schema),
            items: listing
                .items
                .into_iter()
                .map(RenderedItemResponse::from)
                .collect(),
        }
    }
}

/// Dashboard counters of one collection.
#[derive(Debug, Serialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/collection-stats-response.ts"
)]
pub enum CollectionStatsResponse {
    Counted {
        field_count: usize,
        item_count: usize,
        draft_count: usize,
        archived_count: usize,
    },
    Failed {
        reason: String,
    },
}

impl From<CollectionStats> for CollectionStatsResponse {
    fn from(stats: CollectionStats) -> Self {
        match stats {
            CollectionStats::Counted {
                field_count,
                item_count,
                draft_count,
                archived_count,
            } => Self::Counted {
                field_count,
                item_count,
                draft_count,
                archived_count,
            },
            CollectionStats::Failed { reason } => Self::Failed { reason },
        }
    }
}

/// Dashboard entry of one collection.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/collection-overview-response.ts"
)]
pub struct CollectionOverviewResponse {
    pub collection: CollectionResponse,
    pub stats: CollectionStatsResponse,
}

/// Dashboard of a site.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/site-overview-response.ts"
)]
pub struct SiteOverviewResponse {
    pub site: SiteResponse,
    pub collections: Vec<CollectionOverviewResponse>,
}

impl From<SiteOverview> for SiteOverviewResponse {
    fn from(overview: SiteOverview) -> Self {
        Self {
            site: SiteResponse::from(overview.site),
            collections: overview
                .collections
                .into_iter()
                .map(|CollectionOverview { collection, stats }| CollectionOverviewResponse {
                    collection: CollectionResponse::from(collection),
                    stats: CollectionStatsResponse::from(stats),
                })
                .collect(),
        }
    }
}
