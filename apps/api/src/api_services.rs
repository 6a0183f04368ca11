use std::sync::Arc;

use flowcms_application::{CmsProvider, CmsService};
use flowcms_core::AppError;
use flowcms_infrastructure::{InMemoryCmsProvider, WebflowClientConfig, WebflowCmsProvider};
use tracing::info;

use crate::api_config::{ApiConfig, CmsProviderConfig, WebflowRuntimeConfig};
use crate::dev_seed;
use crate::state::AppState;

pub async fn build_app_state(config: &ApiConfig) -> Result<AppState, AppError> {
    let provider: Arc<dyn CmsProvider> = match &config.cms_provider {
        CmsProviderConfig::Webflow(webflow) => {
            info!(
                base_url = %webflow.api_base_url,
                publish_live = webflow.publish_live,
                "using webflow cms provider"
            );
            Arc::new(build_webflow_provider(webflow)?)
        }
        CmsProviderConfig::Memory => {
            let provider = InMemoryCmsProvider::new();
            dev_seed::run(&provider).await?;
            info!("using seeded in-memory cms provider");
            Arc::new(provider)
        }
    };

    Ok(AppState::new(CmsService::new(provider)))
}

fn build_webflow_provider(config: &WebflowRuntimeConfig) -> Result<WebflowCmsProvider, AppError> {
    let http_client = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build http client: {error}")))?;

    Ok(WebflowCmsProvider::new(
        http_client,
        WebflowClientConfig {
            api_base_url: config.api_base_url.clone(),
            legacy_api_base_url: config.legacy_api_base_url.clone(),
            access_token: config.access_token.clone(),
            publish_live: config.publish_live,
        },
    ))
}
