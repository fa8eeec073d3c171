use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tinylink_core::StoreError;
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Request-terminating errors, rendered as plain-text responses.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("missing url parameter")]
    MissingUrl,
    #[error("url not found")]
    NotFound,
    #[error("failed to save mapping: {0}")]
    StoreWrite(#[source] StoreError),
    #[error("failed to fetch mapping: {0}")]
    StoreRead(#[source] StoreError),
    #[error("stored url is not a valid redirect target: {0}")]
    InvalidRedirect(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed | AppError::MissingUrl => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::StoreWrite(_) | AppError::StoreRead(_) | AppError::InvalidRedirect(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> &'static str {
        match self {
            AppError::MethodNotAllowed => "Only POST method is allowed",
            AppError::MissingUrl => "Missing url parameter",
            AppError::NotFound => "URL not found",
            AppError::StoreWrite(_) => "Failed to save mapping",
            AppError::StoreRead(_) => "Failed to fetch mapping",
            AppError::InvalidRedirect(_) => "Stored URL cannot be redirected to",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, self.message()).into_response()
    }
}
