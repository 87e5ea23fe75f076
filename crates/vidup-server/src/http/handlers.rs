use super::error::ApiError;
use super::models::{ErrorResponse, HealthResponse, UploadResponse};
use super::AppState;
use axum::extract::{Multipart, State};
use axum::Json;
use futures_util::TryStreamExt;
use std::io;
use tokio_util::io::StreamReader;

/// Multipart field carrying the payload.
pub const FILE_FIELD: &str = "file";

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    summary = "Health Check",
    description = "Verify the API is running and responsive.",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Healthy".to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/upload",
    tag = "upload",
    summary = "Upload a video file",
    description = "Accepts a video upload via multipart/form-data in the `file` field. \
                   The body is streamed to the upload directory; files over the configured \
                   limit are rejected and nothing is kept.",
    request_body(
        content_type = "multipart/form-data",
        description = "Form with a single `file` part"
    ),
    responses(
        (status = 200, description = "Upload stored", body = UploadResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 413, description = "Payload too large", body = ErrorResponse),
        (status = 500, description = "Server/storage error", body = ErrorResponse)
    )
)]
pub async fn upload_video(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    state.store.ensure_root().await?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to parse multipart data: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let raw_name = field.file_name().map(str::to_owned);
        tracing::debug!(raw_name = ?raw_name, "receiving upload");

        // A client disconnect surfaces here as a read error on the source.
        let body = field.map_err(io::Error::other);
        let reader = StreamReader::new(body);
        futures_util::pin_mut!(reader);

        let stored = state.store.store(&mut reader, raw_name.as_deref()).await?;
        return Ok(Json(UploadResponse::from(stored)));
    }

    Err(ApiError::MissingFile)
}
