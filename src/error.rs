//! HTTP-facing error type shared by every handler and the import pipeline.
//!
//! Each variant carries the message returned to the client and maps to a
//! single HTTP status. The import orchestrator classifies failed creates by
//! that status, so the mapping here is part of the import contract.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input (bad date, wrong type).
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Uniqueness violation.
    #[error("{0}")]
    Conflict(String),

    /// Well-formed input that fails a business rule.
    #[error("{0}")]
    Unprocessable(String),

    #[error("Database error: {0}")]
    Database(DbErr),

    #[error("{0}")]
    Internal(String),
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            return ApiError::Conflict(format!("Duplicate value: {detail}"));
        }
        match err {
            DbErr::RecordNotFound(msg) => ApiError::NotFound(msg),
            other => ApiError::Database(other),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!("{self}");
        }
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string(),
        }))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
