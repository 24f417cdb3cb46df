//! Errors surfaced to the browser by the form handlers.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use barsik_core::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad form input or path segment
    #[error("{0}")]
    Validation(String),

    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::ValidationError(msg) => ApiError::Validation(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Render(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("{self}");
        }
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}
