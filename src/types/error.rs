use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    // standard web stuffs
    #[error("already exists")]
    AlreadyExists,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,

    // infra things
    #[error(transparent)]
    Db(DbErr),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbErr> for AppError {
    fn from(e: DbErr) -> Self {
        AppError::from_db(e)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
    message: String,
}

impl AppError {
    pub fn not_found(what: &str, id: i32) -> Self {
        AppError::NotFound(format!("{what} {id} not found"))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Db(_) => "DB_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn from_db(err: DbErr) -> Self {
        if let DbErr::RecordNotFound(msg) = &err {
            return AppError::NotFound(msg.clone());
        }
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::AlreadyExists,
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                AppError::BadRequest("Related record missing".to_string())
            }
            _ => AppError::Db(err),
        }
    }

    /// Text shown to the client. Infra failures are logged, not echoed.
    fn public_message(&self) -> String {
        match self {
            Self::Db(_) => "database error".to_string(),
            Self::Internal(_) => "internal error".to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::AlreadyExists | Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Db(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            error!("request failed: {self}");
        }
        HttpResponse::build(self.status_code()).json(ErrorBody {
            success: false,
            error: self.kind(),
            message: self.public_message(),
        })
    }
}
