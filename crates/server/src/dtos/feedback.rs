use database::entities::feedback;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct FeedbackRequest {
    pub name: Option<String>,
    pub branch: Option<String>,
    pub suggestion: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackResponse {
    pub id: Uuid,
    pub name: String,
    pub branch: String,
    pub suggestion: String,
}

impl From<feedback::Model> for FeedbackResponse {
    fn from(model: feedback::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            branch: model.branch,
            suggestion: model.suggestion,
        }
    }
}
