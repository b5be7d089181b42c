use crate::{
    dtos::{
        non_blank,
        resource::{
            AddResourceRequest, AddResourceResponse, ChapterResponse, ResourceScopeParams,
            UpdateResourceRequest, UpdateResourceResponse,
        },
    },
    error::AppError,
    state::AppState,
};
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use database::services::{
    query_resource::QueryResourceService,
    save_resource::{ResourcePlacement, SaveResourceService},
};

/// Get every chapter of a branch and semester with its resources
#[utoipa::path(
    get,
    path = "/api/v1/resources",
    params(ResourceScopeParams),
    responses(
        (status = 200, description = "Chapters ordered by subject and chapter name", body = [ChapterResponse]),
        (status = 400, description = "Missing branch or semester", body = crate::dtos::MessageResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Resources"
)]
pub async fn get_resources(
    State(state): State<AppState>,
    params: Result<Query<ResourceScopeParams>, QueryRejection>,
) -> Result<Json<Vec<ChapterResponse>>, AppError> {
    let Query(params) = params?;
    let (branch, semester) = params.scope()?;

    let chapters = QueryResourceService::get_resources(&state.db, branch, semester).await?;

    Ok(Json(chapters.into_iter().map(ChapterResponse::from).collect()))
}

/// Add a resource, creating its branch, semester, subject and chapter on first use
#[utoipa::path(
    post,
    path = "/api/v1/resources",
    request_body = AddResourceRequest,
    responses(
        (status = 201, description = "Resource added", body = AddResourceResponse),
        (status = 400, description = "Missing placement or invalid resource", body = crate::dtos::MessageResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Resources"
)]
pub async fn add_resource(
    State(state): State<AppState>,
    payload: Result<Json<AddResourceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AddResourceResponse>), AppError> {
    let Json(request) = payload?;

    let (Some(branch), Some(semester), Some(subject), Some(chapter)) = (
        non_blank(&request.branch),
        request.semester.as_ref(),
        non_blank(&request.subject),
        non_blank(&request.chapter),
    ) else {
        return Err(AppError::validation(
            "Branch, semester, subject, and chapter are required.",
        ));
    };

    let placement = ResourcePlacement {
        branch: branch.to_owned(),
        semester: semester.number()?,
        subject: subject.to_owned(),
        chapter: chapter.to_owned(),
    };

    let added = SaveResourceService::add_resource(&state.db, &placement, request.resource).await?;

    Ok((
        StatusCode::CREATED,
        Json(AddResourceResponse {
            message: "Resource added successfully".to_owned(),
            data: added.into(),
        }),
    ))
}

/// Patch one resource of a chapter in the given branch and semester
#[utoipa::path(
    patch,
    path = "/api/v1/resources",
    params(ResourceScopeParams),
    request_body = UpdateResourceRequest,
    responses(
        (status = 200, description = "Resource updated", body = UpdateResourceResponse),
        (status = 400, description = "Missing scope or invalid merged resource", body = crate::dtos::MessageResponse),
        (status = 404, description = "Chapter or resource not found", body = crate::dtos::MessageResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Resources"
)]
pub async fn update_resource(
    State(state): State<AppState>,
    params: Result<Query<ResourceScopeParams>, QueryRejection>,
    payload: Result<Json<UpdateResourceRequest>, JsonRejection>,
) -> Result<Json<UpdateResourceResponse>, AppError> {
    let Query(params) = params?;
    let (branch, semester) = params.scope()?;
    let Json(request) = payload?;

    let updated = SaveResourceService::update_resource(
        &state.db,
        branch,
        semester,
        request.chapter_id,
        request.resource_id,
        &request.updates,
    )
    .await?;

    Ok(Json(UpdateResourceResponse {
        message: "Resource updated successfully".to_owned(),
        data: (&updated).into(),
    }))
}
