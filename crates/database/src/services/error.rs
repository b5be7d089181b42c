use models::resource::ResourceError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Failures surfaced by the service layer
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("Conflicts with an existing record: {0}")]
    Conflict(String),

    #[error(transparent)]
    InvalidResource(#[from] ResourceError),

    #[error("Database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => Self::Conflict(detail),
            _ => Self::Database(err),
        }
    }
}
