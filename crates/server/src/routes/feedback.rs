use crate::{
    dtos::{
        MessageResponse,
        feedback::{FeedbackRequest, FeedbackResponse},
        non_blank,
    },
    error::AppError,
    state::AppState,
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use database::services::feedback::FeedbackService;

/// Submit a suggestion
#[utoipa::path(
    post,
    path = "/api/feedback",
    request_body = FeedbackRequest,
    responses(
        (status = 201, description = "Feedback stored", body = MessageResponse),
        (status = 400, description = "A field is missing", body = MessageResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Feedback"
)]
pub async fn submit_feedback(
    State(state): State<AppState>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Json(request) = payload?;

    let (Some(name), Some(branch), Some(suggestion)) = (
        non_blank(&request.name),
        non_blank(&request.branch),
        non_blank(&request.suggestion),
    ) else {
        return Err(AppError::validation(
            "Name, branch, and suggestion are required.",
        ));
    };

    FeedbackService::submit(&state.db, name, branch, suggestion).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Feedback submitted successfully!")),
    ))
}

/// List all feedback
#[utoipa::path(
    get,
    path = "/api/feedback",
    responses(
        (status = 200, description = "All feedback", body = [FeedbackResponse]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Feedback"
)]
pub async fn get_feedback(
    State(state): State<AppState>,
) -> Result<Json<Vec<FeedbackResponse>>, AppError> {
    let entries = FeedbackService::all(&state.db).await?;
    Ok(Json(entries.into_iter().map(FeedbackResponse::from).collect()))
}
