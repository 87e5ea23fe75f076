//! Maps upload failures onto HTTP responses.

use super::models::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use vidup_core::{ErrorKind, UploadError};

const MIB: u64 = 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// Malformed multipart body.
    #[error("{0}")]
    BadRequest(String),

    #[error("Missing multipart field `file`")]
    MissingFile,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Upload(e) => match e.kind() {
                ErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
                ErrorKind::StorageError => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::BadRequest(_) | ApiError::MissingFile => StatusCode::BAD_REQUEST,
        }
    }

    /// Client-facing message; storage causes stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Upload(UploadError::PayloadTooLarge { limit }) => {
                format!("File too large. Maximum allowed size is {}.", human_limit(*limit))
            }
            ApiError::Upload(UploadError::Storage { .. }) => {
                "Failed to store the uploaded file.".to_string()
            }
            other => other.to_string(),
        }
    }
}

fn human_limit(limit: u64) -> String {
    if limit >= MIB && limit % MIB == 0 {
        format!("{}MB", limit / MIB)
    } else {
        format!("{limit} bytes")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, cause = ?std::error::Error::source(&self), "upload failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "upload rejected");
        }
        let body = ErrorResponse {
            detail: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}
