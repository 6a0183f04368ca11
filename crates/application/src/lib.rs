//! Application services and ports.

#![forbid(unsafe_code)]

mod cms_ports;
mod cms_service;
mod item_editor_service;

#[cfg(test)]
mod fake_cms_provider;

pub use cms_ports::CmsProvider;
pub use cms_service::{
    CmsService, CollectionOverview, CollectionStats, ItemListing, RenderedField, RenderedItem,
    SchemaLoad, SiteOverview,
};
pub use item_editor_service::{ItemEditorService, ItemForm};
