mod cms;
mod common;
mod forms;
mod listings;
mod video;

pub use cms::{
    CollectionResponse, FieldResponse, ItemPayloadRequest, ItemResponse, PublishSiteRequest,
    PublishSiteResponse, SiteResponse,
};
pub use common::{HealthResponse, MessageResponse};
pub use forms::{FieldIssueResponse, ItemFormResponse, SchemaStatusResponse};
pub use listings::{ItemListingResponse, SiteOverviewResponse};
pub use video::{VideoPreviewQuery, VideoPreviewResponse};
