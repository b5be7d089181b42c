use crate::{
    config::Config,
    dtos::{
        MessageResponse,
        event::{
            ConfirmParams, CreateEventRequest, EventListResponse, EventResponse,
            ShiftedEventsResponse,
        },
        non_blank,
    },
    error::AppError,
    state::AppState,
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use database::services::event::EventService;
use importer::events::parse_events;
use log::info;
use models::{
    event::{EventRecord, clean_text},
    event_date::{EventDateError, parse_any_date, parse_event_date},
};

/// Get every event, earliest first
#[utoipa::path(
    get,
    path = "/api/v1/events",
    responses(
        (status = 200, description = "All events", body = EventListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Events"
)]
pub async fn get_events(State(state): State<AppState>) -> Result<Json<EventListResponse>, AppError> {
    let events = EventService::all_events(&state.db).await?;
    Ok(Json(events.into()))
}

/// Create a single event
#[utoipa::path(
    post,
    path = "/api/v1/events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 400, description = "Missing or malformed date", body = MessageResponse),
        (status = 409, description = "An event already exists on that date", body = MessageResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Events"
)]
pub async fn add_event(
    State(state): State<AppState>,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<EventResponse>), AppError> {
    let Json(request) = payload?;

    let date = non_blank(&request.date).ok_or(EventDateError::Missing)?;
    let record = EventRecord {
        date: parse_any_date(date)?,
        holidays: clean_text(request.holidays),
        examination: clean_text(request.examination),
        academic_activities: clean_text(request.academic_activities),
        extra_curricular_activities: clean_text(request.extra_curricular_activities),
        special_days_jayantis: clean_text(request.special_days_jayantis),
    };

    let event = EventService::create_event(&state.db, record).await?;

    Ok((StatusCode::CREATED, Json(event.into())))
}

/// Get the events of one day
#[utoipa::path(
    get,
    path = "/api/v1/events/{date}",
    params(
        ("date" = String, Path, description = "Day as DD-MM-YY", example = "05-01-25")
    ),
    responses(
        (status = 200, description = "Events on that day", body = EventListResponse),
        (status = 400, description = "Malformed date", body = MessageResponse),
        (status = 404, description = "No events on that day", body = MessageResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Events"
)]
pub async fn get_event_by_date(
    State(state): State<AppState>,
    date: Result<Path<String>, PathRejection>,
) -> Result<Json<EventListResponse>, AppError> {
    let Path(date) = date?;
    let day = parse_event_date(&date)?;

    let events = EventService::events_on(&state.db, day).await?;
    if events.is_empty() {
        return Err(AppError::NotFound("No events found for this date.".to_owned()));
    }

    Ok(Json(events.into()))
}

/// Import the server-side calendar CSV
///
/// Unreadable rows are skipped; the remaining events are stored all together or not at all.
#[utoipa::path(
    post,
    path = "/api/v1/events/file",
    responses(
        (status = 201, description = "Events imported", body = MessageResponse),
        (status = 400, description = "The file holds no valid events", body = MessageResponse),
        (status = 409, description = "An imported date is already stored", body = MessageResponse),
        (status = 500, description = "The file could not be read")
    ),
    tag = "Events"
)]
pub async fn import_events(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let path = &state.config.events_csv_path;
    let contents = tokio::fs::read(path)
        .await
        .map_err(|err| AppError::internal(format!("reading {}: {err}", path.display())))?;

    let import = parse_events(contents.as_slice())?;
    if import.events.is_empty() {
        return Err(AppError::validation("No valid events found in the CSV file."));
    }

    let inserted = EventService::insert_events(&state.db, import.events).await?;
    info!(
        "Imported {inserted} events from {} ({} rows skipped)",
        path.display(),
        import.skipped
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(format!(
            "{inserted} events added successfully."
        ))),
    ))
}

/// Move every event forward by one day
#[utoipa::path(
    patch,
    path = "/api/v1/events",
    params(ConfirmParams),
    responses(
        (status = 200, description = "Events shifted", body = ShiftedEventsResponse),
        (status = 403, description = "Missing or wrong confirmation token", body = MessageResponse),
        (status = 404, description = "No events stored", body = MessageResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Events"
)]
pub async fn shift_events(
    State(state): State<AppState>,
    params: Result<Query<ConfirmParams>, QueryRejection>,
) -> Result<Json<ShiftedEventsResponse>, AppError> {
    let Query(params) = params?;
    require_confirmation(&state.config, params.confirm.as_deref())?;

    let shifted = EventService::shift_all_dates(&state.db).await?;

    Ok(Json(ShiftedEventsResponse {
        message: format!("{} events updated successfully.", shifted.len()),
        updated_events: shifted.into_iter().map(EventResponse::from).collect(),
    }))
}

/// Delete every event
#[utoipa::path(
    delete,
    path = "/api/v1/events",
    params(ConfirmParams),
    responses(
        (status = 200, description = "Events deleted", body = MessageResponse),
        (status = 403, description = "Missing or wrong confirmation token", body = MessageResponse),
        (status = 404, description = "No events stored", body = MessageResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Events"
)]
pub async fn delete_events(
    State(state): State<AppState>,
    params: Result<Query<ConfirmParams>, QueryRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Query(params) = params?;
    require_confirmation(&state.config, params.confirm.as_deref())?;

    let deleted = EventService::delete_all(&state.db).await?;

    Ok(Json(MessageResponse::new(format!(
        "{deleted} events deleted successfully."
    ))))
}

/// Bulk event commands run only with the configured admin token
fn require_confirmation(config: &Config, supplied: Option<&str>) -> Result<(), AppError> {
    match (config.admin_token.as_deref(), supplied) {
        (None, _) => Err(AppError::Forbidden(
            "Bulk event commands are disabled.".to_owned(),
        )),
        (Some(expected), Some(given)) if expected == given => Ok(()),
        _ => Err(AppError::Forbidden("Invalid confirmation token.".to_owned())),
    }
}
