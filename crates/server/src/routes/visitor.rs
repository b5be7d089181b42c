use crate::{dtos::visitor::VisitorCountResponse, error::AppError, state::AppState};
use axum::{Json, extract::State};
use database::services::visitor::VisitorService;

/// Get the site visit count
#[utoipa::path(
    get,
    path = "/api/visitor-count",
    responses(
        (status = 200, description = "Current count", body = VisitorCountResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Visitors"
)]
pub async fn get_visitor_count(
    State(state): State<AppState>,
) -> Result<Json<VisitorCountResponse>, AppError> {
    let count = VisitorService::current(&state.db).await?;
    Ok(Json(VisitorCountResponse { count }))
}

/// Record one visit
#[utoipa::path(
    post,
    path = "/api/visitor-count",
    responses(
        (status = 200, description = "Count after this visit", body = VisitorCountResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Visitors"
)]
pub async fn increment_visitor_count(
    State(state): State<AppState>,
) -> Result<Json<VisitorCountResponse>, AppError> {
    let count = VisitorService::increment(&state.db).await?;
    Ok(Json(VisitorCountResponse { count }))
}
