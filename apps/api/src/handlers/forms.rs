use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use flowcms_domain::EditState;

use crate::dto::{FieldIssueResponse, ItemFormResponse, ItemResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn new_item_form_handler(
    State(state): State<AppState>,
    Path(collection_id): Path<String>,
) -> Json<ItemFormResponse> {
    let form = state
        .item_editor_service
        .new_item_form(&collection_id)
        .await;
    Json(ItemFormResponse::from(form))
}

pub async fn edit_item_form_handler(
    State(state): State<AppState>,
    Path((collection_id, item_id)): Path<(String, String)>,
) -> ApiResult<Json<ItemFormResponse>> {
    let form = state
        .item_editor_service
        .edit_item_form(&collection_id, &item_id)
        .await?;
    Ok(Json(ItemFormResponse::from(form)))
}

pub async fn validate_form_handler(
    State(state): State<AppState>,
    Path(collection_id): Path<String>,
    Json(edit_state): Json<EditState>,
) -> ApiResult<Json<Vec<FieldIssueResponse>>> {
    let issues = state
        .item_editor_service
        .validate(&collection_id, &edit_state)
        .await?
        .into_iter()
        .map(FieldIssueResponse::from)
        .collect();

    Ok(Json(issues))
}

pub async fn submit_new_item_handler(
    State(state): State<AppState>,
    Path(collection_id): Path<String>,
    Json(edit_state): Json<EditState>,
) -> ApiResult<(StatusCode, Json<ItemResponse>)> {
    let item = state
        .item_editor_service
        .submit_new(&collection_id, &edit_state)
        .await?;

    Ok((StatusCode::CREATED, Json(ItemResponse::from(item))))
}

pub async fn submit_item_update_handler(
    State(state): State<AppState>,
    Path((collection_id, item_id)): Path<(String, String)>,
    Json(edit_state): Json<EditState>,
) -> ApiResult<Json<ItemResponse>> {
    let item = state
        .item_editor_service
        .submit_update(&collection_id, &item_id, &edit_state)
        .await?;

    Ok(Json(ItemResponse::from(item)))
}
