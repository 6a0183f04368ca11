mod conversions;
mod types;

pub use types::{
    CollectionResponse, FieldResponse, ItemPayloadRequest, ItemResponse, PublishSiteRequest,
    PublishSiteResponse, SiteResponse,
};
