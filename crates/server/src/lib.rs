pub mod config;
pub mod doc;
pub mod dtos;
pub mod error;
pub mod routes;
pub mod state;
pub mod storage;
pub mod utils;

use crate::{
    config::Config,
    doc::ApiDoc,
    error::AppError,
    routes::{event, feedback, health, resource, root, upload, visitor},
    state::AppState,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{Method, Uri, header},
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

/// Largest request body accepted, sized for file uploads
const BODY_LIMIT_BYTES: usize = 25 * 1024 * 1024;

/// Builds the full HTTP application around the shared state
pub fn app(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(root::root))
        .routes(routes!(health::health))
        .routes(routes!(
            resource::get_resources,
            resource::add_resource,
            resource::update_resource
        ))
        .routes(routes!(
            event::get_events,
            event::add_event,
            event::shift_events,
            event::delete_events
        ))
        .routes(routes!(event::import_events))
        .routes(routes!(event::get_event_by_date))
        .routes(routes!(
            visitor::get_visitor_count,
            visitor::increment_visitor_count
        ))
        .routes(routes!(feedback::submit_feedback, feedback::get_feedback))
        .routes(routes!(upload::upload_file))
        .split_for_parts();

    let cors = cors_layer(&state.config);

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors)
        .layer(CompressionLayer::new())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    match &config.frontend_origin {
        Some(origin) => cors.allow_origin(origin.clone()),
        None => cors.allow_origin(Any),
    }
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("Can't find {} on this server!", uri.path()))
}
