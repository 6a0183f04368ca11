use axum::Json;
use axum::extract::Query;
use flowcms_core::AppError;
use flowcms_domain::VideoSource;

use crate::dto::{VideoPreviewQuery, VideoPreviewResponse};
use crate::error::ApiResult;

pub async fn video_preview_handler(
    Query(query): Query<VideoPreviewQuery>,
) -> ApiResult<Json<VideoPreviewResponse>> {
    let url = query.url.trim();
    if url.is_empty() {
        return Err(AppError::Validation("missing url parameter".to_owned()).into());
    }

    Ok(Json(VideoPreviewResponse {
        source: VideoSource::classify(url),
        url: url.to_owned(),
    }))
}
