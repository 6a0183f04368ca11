use async_trait::async_trait;
use flowcms_application::CmsProvider;
use flowcms_core::{AppError, AppResult};
use flowcms_domain::{Collection, FieldDescriptor, Item, ItemSubmission, PublishResult, Site};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

mod wire;

#[cfg(test)]
mod tests;

use wire::{
    Listing, PublishRequest, PublishResponse, WebflowCollection, WebflowField, WebflowItem,
    WebflowSite,
};

const LEGACY_API_VERSION: &str = "1.0.0";

/// Connection settings for the Webflow Data API.
#[derive(Debug, Clone)]
pub struct WebflowClientConfig {
    /// Base URL of the v2 API, e.g. `https://api.webflow.com`.
    pub api_base_url: Url,
    /// Base URL of the legacy v1 API used as the last field-listing fallback.
    pub legacy_api_base_url: Url,
    /// Site or workspace bearer token.
    pub access_token: String,
    /// Whether item writes go through the live endpoints and publish immediately.
    pub publish_live: bool,
}

/// Webflow Data API implementation of the CMS provider port.
pub struct WebflowCmsProvider {
    http_client: reqwest::Client,
    config: WebflowClientConfig,
}

impl WebflowCmsProvider {
    /// Creates a new provider with a configured HTTP client.
    #[must_use]
    pub fn new(http_client: reqwest::Client, config: WebflowClientConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    fn v2_url(&self, segments: &[&str]) -> AppResult<Url> {
        let mut full_segments = vec!["v2"];
        full_segments.extend_from_slice(segments);
        endpoint(&self.config.api_base_url, &full_segments)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(self.config.access_token.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> AppResult<T> {
        let request = self.authorized(self.http_client.get(url));
        read_json(send(request, context).await?, context).await
    }

    async fn v2_collection_fields(&self, collection_id: &str) -> AppResult<Vec<WebflowField>> {
        let url = self.v2_url(&["collections", collection_id, "fields"])?;
        let listing: Listing<WebflowField> = self.get_json(url, "list collection fields").await?;
        Ok(listing.into_entries())
    }

    async fn embedded_collection_fields(
        &self,
        collection_id: &str,
    ) -> AppResult<Vec<WebflowField>> {
        let url = self.v2_url(&["collections", collection_id])?;
        let collection: WebflowCollection = self.get_json(url, "get collection").await?;
        Ok(collection.fields.unwrap_or_default())
    }

    async fn legacy_collection_fields(&self, collection_id: &str) -> AppResult<Vec<WebflowField>> {
        let url = endpoint(
            &self.config.legacy_api_base_url,
            &["collections", collection_id, "fields"],
        )?;
        let request = self
            .authorized(self.http_client.get(url))
            .header("Accept-Version", LEGACY_API_VERSION);
        let context = "list legacy collection fields";
        let listing: Listing<WebflowField> =
            read_json(send(request, context).await?, context).await?;
        Ok(listing.into_entries())
    }

    async fn write_item(
        &self,
        request: RequestBuilder,
        submission: &ItemSubmission,
        context: &str,
    ) -> AppResult<Item> {
        let request = self.authorized(request).json(submission);
        let item: WebflowItem = read_json(send(request, context).await?, context).await?;
        Item::try_from(item)
    }
}

#[async_trait]
impl CmsProvider for WebflowCmsProvider {
    async fn list_collections(&self, site_id: &str) -> AppResult<Vec<Collection>> {
        let url = self.v2_url(&["sites", site_id, "collections"])?;
        let listing: Listing<WebflowCollection> = self.get_json(url, "list collections").await?;
        listing
            .into_entries()
            .into_iter()
            .map(Collection::try_from)
            .collect()
    }

    async fn get_collection(&self, collection_id: &str) -> AppResult<Collection> {
        let url = self.v2_url(&["collections", collection_id])?;
        let collection: WebflowCollection = self.get_json(url, "get collection").await?;
        Collection::try_from(collection)
    }

    async fn get_collection_fields(&self, collection_id: &str) -> AppResult<Vec<FieldDescriptor>> {
        let fields = match self.v2_collection_fields(collection_id).await {
            Ok(fields) => fields,
            Err(error) => {
                warn!(collection_id, error = %error, "field listing failed, reading collection");
                match self.embedded_collection_fields(collection_id).await {
                    Ok(fields) => fields,
                    Err(error) => {
                        warn!(
                            collection_id,
                            error = %error,
                            "collection read failed, using legacy field listing"
                        );
                        self.legacy_collection_fields(collection_id).await?
                    }
                }
            }
        };

        fields.into_iter().map(FieldDescriptor::try_from).collect()
    }

    async fn list_items(&self, collection_id: &str) -> AppResult<Vec<Item>> {
        let url = self.v2_url(&["collections", collection_id, "items"])?;
        let listing: Listing<WebflowItem> = self.get_json(url, "list items").await?;
        listing.into_entries().into_iter().map(Item::try_from).collect()
    }

    async fn get_item(&self, collection_id: &str, item_id: &str) -> AppResult<Item> {
        let url = self.v2_url(&["collections", collection_id, "items", item_id])?;
        let item: WebflowItem = self.get_json(url, "get item").await?;
        Item::try_from(item)
    }

    async fn create_item(
        &self,
        collection_id: &str,
        submission: ItemSubmission,
    ) -> AppResult<Item> {
        let url = if self.config.publish_live {
            self.v2_url(&["collections", collection_id, "items", "live"])?
        } else {
            self.v2_url(&["collections", collection_id, "items"])?
        };
        debug!(collection_id, live = self.config.publish_live, "creating webflow item");
        self.write_item(self.http_client.post(url), &submission, "create item")
            .await
    }

    async fn update_item(
        &self,
        collection_id: &str,
        item_id: &str,
        submission: ItemSubmission,
    ) -> AppResult<Item> {
        let url = if self.config.publish_live {
            self.v2_url(&["collections", collection_id, "items", item_id, "live"])?
        } else {
            self.v2_url(&["collections", collection_id, "items", item_id])?
        };
        debug!(collection_id, item_id, live = self.config.publish_live, "updating webflow item");
        self.write_item(self.http_client.patch(url), &submission, "update item")
            .await
    }

    async fn delete_item(&self, collection_id: &str, item_id: &str) -> AppResult<()> {
        let url = self.v2_url(&["collections", collection_id, "items", item_id])?;
        let request = self.authorized(self.http_client.delete(url));
        send(request, "delete item").await?;
        Ok(())
    }

    async fn get_site(&self, site_id: &str) -> AppResult<Site> {
        let url = self.v2_url(&["sites", site_id])?;
        let site: WebflowSite = self.get_json(url, "get site").await?;
        Site::try_from(site)
    }

    async fn publish_site(&self, site_id: &str, domains: Vec<String>) -> AppResult<PublishResult> {
        let url = self.v2_url(&["sites", site_id, "publish"])?;
        let context = "publish site";
        let request = self.authorized(self.http_client.post(url)).json(&PublishRequest {
            custom_domains: domains,
            publish_to_webflow_subdomain: true,
        });

        let response = send(request, context).await?;
        let body = response.text().await.map_err(|error| {
            AppError::Upstream(format!("{context} response could not be read: {error}"))
        })?;
        if body.trim().is_empty() {
            return Ok(PublishResult::from(PublishResponse::default()));
        }

        let response: PublishResponse = serde_json::from_str(&body).map_err(|error| {
            AppError::Upstream(format!("{context} returned an unexpected body: {error}"))
        })?;
        Ok(PublishResult::from(response))
    }
}

fn endpoint(base_url: &Url, segments: &[&str]) -> AppResult<Url> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| {
            AppError::Internal(format!("webflow base url '{base_url}' cannot hold a path"))
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn send(request: RequestBuilder, context: &str) -> AppResult<Response> {
    let response = request
        .send()
        .await
        .map_err(|error| AppError::Upstream(format!("{context} transport error: {error}")))?;

    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<response body unavailable>".to_owned());
    let message = format!("{context} failed with status {status}: {body}");

    Err(match status {
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
        StatusCode::FORBIDDEN => AppError::Forbidden(message),
        _ => AppError::Upstream(message),
    })
}

async fn read_json<T: DeserializeOwned>(response: Response, context: &str) -> AppResult<T> {
    response.json::<T>().await.map_err(|error| {
        AppError::Upstream(format!("{context} returned an unexpected body: {error}"))
    })
}
