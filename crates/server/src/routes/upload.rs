use crate::{
    dtos::{
        MessageResponse,
        upload::{UploadForm, UploadResponse},
    },
    error::AppError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
};

const DEFAULT_FOLDER: &str = "default_folder";

/// Upload a file to shared storage and get a direct download link
#[utoipa::path(
    post,
    path = "/api/upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "No file in the form", body = MessageResponse),
        (status = 500, description = "Storage unavailable or the upload failed")
    ),
    tag = "Upload"
)]
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart = multipart?;
    let mut file = None;
    let mut folder = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let Some(file_name) = field.file_name().map(str::to_owned) else {
                    continue;
                };
                file = Some((file_name, field.bytes().await?));
            }
            Some("folderName") => {
                let name = field.text().await?;
                folder = Some(name.trim().to_owned()).filter(|n| !n.is_empty());
            }
            _ => {}
        }
    }

    let Some((file_name, contents)) = file else {
        return Err(AppError::validation("No file provided"));
    };

    let storage = state
        .storage
        .as_ref()
        .ok_or_else(|| AppError::internal("file storage is not configured"))?;

    let folder = folder.as_deref().unwrap_or(DEFAULT_FOLDER);
    let shared_link = storage
        .upload(folder, &file_name, contents.to_vec())
        .await?;

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".to_owned(),
        shared_link,
    }))
}
