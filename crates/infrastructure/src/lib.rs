//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_cms_provider;
mod webflow_cms_provider;

pub use in_memory_cms_provider::InMemoryCmsProvider;
pub use webflow_cms_provider::{WebflowClientConfig, WebflowCmsProvider};
