use serde::Serialize;
use utoipa::ToSchema;

pub mod event;
pub mod feedback;
pub mod resource;
pub mod upload;
pub mod visitor;

/// Plain acknowledgement or error body
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Returns the trimmed value when it is present and not blank
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
