use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::dto::{ItemListingResponse, ItemPayloadRequest, ItemResponse, MessageResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_items_handler(
    State(state): State<AppState>,
    Path(collection_id): Path<String>,
) -> ApiResult<Json<Vec<ItemResponse>>> {
    let items = state
        .cms_service
        .list_items(&collection_id)
        .await?
        .into_iter()
        .map(ItemResponse::from)
        .collect();

    Ok(Json(items))
}

pub async fn rendered_items_handler(
    State(state): State<AppState>,
    Path(collection_id): Path<String>,
) -> ApiResult<Json<ItemListingResponse>> {
    let listing = state.cms_service.render_items(&collection_id).await?;
    Ok(Json(ItemListingResponse::from(listing)))
}

pub async fn create_item_handler(
    State(state): State<AppState>,
    Path(collection_id): Path<String>,
    Json(payload): Json<ItemPayloadRequest>,
) -> ApiResult<(StatusCode, Json<ItemResponse>)> {
    let item = state
        .cms_service
        .create_item(&collection_id, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(ItemResponse::from(item))))
}

pub async fn update_item_handler(
    State(state): State<AppState>,
    Path((collection_id, item_id)): Path<(String, String)>,
    Json(payload): Json<ItemPayloadRequest>,
) -> ApiResult<Json<ItemResponse>> {
    let item = state
        .cms_service
        .update_item(&collection_id, &item_id, payload.into())
        .await?;

    Ok(Json(ItemResponse::from(item)))
}

pub async fn delete_item_handler(
    State(state): State<AppState>,
    Path((collection_id, item_id)): Path<(String, String)>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .cms_service
        .delete_item(&collection_id, &item_id)
        .await?;

    Ok(Json(MessageResponse {
        message: "Item deleted successfully".to_owned(),
    }))
}
