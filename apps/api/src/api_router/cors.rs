use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use flowcms_core::AppError;
use tower_http::cors::CorsLayer;

pub(super) fn build_cors_layer(frontend_origins: &[String]) -> Result<CorsLayer, AppError> {
    let origins = frontend_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|error| {
                AppError::Internal(format!("invalid FRONTEND_ORIGINS entry '{origin}': {error}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]))
}
