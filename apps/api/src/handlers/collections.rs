use axum::Json;
use axum::extract::{Path, State};

use crate::dto::{CollectionResponse, FieldResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_collections_handler(
    State(state): State<AppState>,
    Path(site_id): Path<String>,
) -> ApiResult<Json<Vec<CollectionResponse>>> {
    let collections = state
        .cms_service
        .list_collections(&site_id)
        .await?
        .into_iter()
        .map(CollectionResponse::from)
        .collect();

    Ok(Json(collections))
}

pub async fn get_collection_handler(
    State(state): State<AppState>,
    Path(collection_id): Path<String>,
) -> ApiResult<Json<CollectionResponse>> {
    let collection = state.cms_service.get_collection(&collection_id).await?;
    Ok(Json(CollectionResponse::from(collection)))
}

pub async fn collection_fields_handler(
    State(state): State<AppState>,
    Path(collection_id): Path<String>,
) -> ApiResult<Json<Vec<FieldResponse>>> {
    let fields = state.cms_service.collection_fields(&collection_id).await?;
    Ok(Json(fields.iter().map(FieldResponse::from).collect()))
}
