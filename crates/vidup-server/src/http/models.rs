//! Request/response bodies for the HTTP API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use vidup_core::UploadResult;

pub const UPLOAD_SUCCESS_MESSAGE: &str = "Upload successful";

/// Response for a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    /// Stored file name.
    pub filename: String,
    /// Size of the uploaded file in bytes.
    pub size_bytes: u64,
    /// Informational message about the upload result.
    pub message: String,
}

impl From<UploadResult> for UploadResponse {
    fn from(result: UploadResult) -> Self {
        Self {
            filename: result.stored_name,
            size_bytes: result.size_bytes,
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
        }
    }
}

/// Error body returned for every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Description of the error that occurred.
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub message: String,
}
