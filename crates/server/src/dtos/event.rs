use chrono::{DateTime, Utc};
use database::entities::events;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub holidays: Option<String>,
    pub examination: Option<String>,
    pub academic_activities: Option<String>,
    pub extra_curricular_activities: Option<String>,
    pub special_days_jayantis: Option<String>,
}

impl From<events::Model> for EventResponse {
    fn from(model: events::Model) -> Self {
        Self {
            id: model.id,
            date: model.date,
            holidays: model.holidays,
            examination: model.examination,
            academic_activities: model.academic_activities,
            extra_curricular_activities: model.extra_curricular_activities,
            special_days_jayantis: model.special_days_jayantis,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EventListResponse {
    pub len: usize,
    pub data: Vec<EventResponse>,
}

impl From<Vec<events::Model>> for EventListResponse {
    fn from(models: Vec<events::Model>) -> Self {
        Self {
            len: models.len(),
            data: models.into_iter().map(EventResponse::from).collect(),
        }
    }
}

/// A single calendar entry; `date` accepts `DD-MM-YY`, `YYYY-MM-DD` or RFC 3339
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub date: Option<String>,
    pub holidays: Option<String>,
    pub examination: Option<String>,
    pub academic_activities: Option<String>,
    pub extra_curricular_activities: Option<String>,
    pub special_days_jayantis: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShiftedEventsResponse {
    pub message: String,
    pub updated_events: Vec<EventResponse>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ConfirmParams {
    /// Must match the configured admin token
    pub confirm: Option<String>,
}
