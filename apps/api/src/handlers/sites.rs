use axum::Json;
use axum::extract::{Path, State};

use crate::dto::{PublishSiteRequest, PublishSiteResponse, SiteOverviewResponse, SiteResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn get_site_handler(
    State(state): State<AppState>,
    Path(site_id): Path<String>,
) -> ApiResult<Json<SiteResponse>> {
    let site = state.cms_service.get_site(&site_id).await?;
    Ok(Json(SiteResponse::from(site)))
}

pub async fn publish_site_handler(
    State(state): State<AppState>,
    Path(site_id): Path<String>,
    payload: Option<Json<PublishSiteRequest>>,
) -> ApiResult<Json<PublishSiteResponse>> {
    let domains = payload.and_then(|Json(payload)| payload.domains);
    let result = state.cms_service.publish_site(&site_id, domains).await?;

    Ok(Json(PublishSiteResponse {
        success: true,
        message: "Site published successfully".to_owned(),
        data: result.into(),
    }))
}

pub async fn site_overview_handler(
    State(state): State<AppState>,
    Path(site_id): Path<String>,
) -> ApiResult<Json<SiteOverviewResponse>> {
    let overview = state.cms_service.collection_overview(&site_id).await?;
    Ok(Json(SiteOverviewResponse::from(overview)))
}
