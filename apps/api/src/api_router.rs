use axum::Router;
use axum::routing::{get, post, put};
use flowcms_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

mod cors;

pub fn build_router(app_state: AppState, frontend_origins: &[String]) -> Result<Router, AppError> {
    let collection_routes = Router::new()
        .route(
            "/api/collections/site/{site_id}",
            get(handlers::collections::list_collections_handler),
        )
        .route(
            "/api/collections/{collection_id}",
            get(handlers::collections::get_collection_handler),
        )
        .route(
            "/api/collections/{collection_id}/fields",
            get(handlers::collections::collection_fields_handler),
        )
        .route(
            "/api/collections/{collection_id}/items",
            get(handlers::items::list_items_handler).post(handlers::items::create_item_handler),
        )
        .route(
            "/api/collections/{collection_id}/items/rendered",
            get(handlers::items::rendered_items_handler),
        )
        .route(
            "/api/collections/{collection_id}/items/{item_id}",
            put(handlers::items::update_item_handler)
                .delete(handlers::items::delete_item_handler),
        );

    let form_routes = Router::new()
        .route(
            "/api/collections/{collection_id}/form",
            get(handlers::forms::new_item_form_handler)
                .post(handlers::forms::submit_new_item_handler),
        )
        .route(
            "/api/collections/{collection_id}/form/validate",
            post(handlers::forms::validate_form_handler),
        )
        .route(
            "/api/collections/{collection_id}/items/{item_id}/form",
            get(handlers::forms::edit_item_form_handler)
                .put(handlers::forms::submit_item_update_handler),
        );

    let site_routes = Router::new()
        .route("/api/sites/{site_id}", get(handlers::sites::get_site_handler))
        .route(
            "/api/sites/{site_id}/publish",
            post(handlers::sites::publish_site_handler),
        )
        .route(
            "/api/sites/{site_id}/overview",
            get(handlers::sites::site_overview_handler),
        );

    Ok(Router::new()
        .route("/api/health", get(handlers::health::health_handler))
        .route(
            "/api/video/preview",
            get(handlers::video::video_preview_handler),
        )
        .merge(collection_routes)
        .merge(form_routes)
        .merge(site_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_origins)?)
        .with_state(app_state))
}
