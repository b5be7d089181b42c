use crate::dtos::MessageResponse;
use axum::Json;

/// Liveness message for the API root
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Server is up", body = MessageResponse)
    ),
    tag = "Health"
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("server running fine"))
}
