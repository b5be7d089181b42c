use crate::{dtos::MessageResponse, storage::StorageError};
use axum::{
    Json,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::services::ServiceError;
use importer::events::ImportError;
use log::{debug, error};
use models::event_date::EventDateError;
use sea_orm::DbErr;
use thiserror::Error;

/// Errors returned by request handlers, rendered as `{"message": ...}`
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// The cause is logged, never sent to the client
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal(cause: impl std::fmt::Display) -> Self {
        Self::Internal(cause.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Forbidden(message) => (StatusCode::FORBIDDEN, message),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::Conflict(message) => (StatusCode::CONFLICT, message),
            AppError::Internal(cause) => {
                error!("Internal server error: {cause}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                )
            }
        };

        (status, Json(MessageResponse { message })).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(message) => Self::NotFound(message.to_owned()),
            ServiceError::Conflict(detail) => {
                debug!("Unique constraint violated: {detail}");
                Self::Conflict("A record with the same key already exists.".to_owned())
            }
            ServiceError::InvalidResource(err) => Self::Validation(err.to_string()),
            ServiceError::Database(err) => Self::internal(err),
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        ServiceError::from(err).into()
    }
}

impl From<EventDateError> for AppError {
    fn from(err: EventDateError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        Self::internal(err)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        Self::internal(err)
    }
}

macro_rules! rejection_is_bad_request {
    ($($rejection:ty),* $(,)?) => {
        $(
            impl From<$rejection> for AppError {
                fn from(rejection: $rejection) -> Self {
                    Self::Validation(rejection.body_text())
                }
            }
        )*
    };
}

rejection_is_bad_request!(
    JsonRejection,
    QueryRejection,
    PathRejection,
    MultipartRejection,
    MultipartError,
);
