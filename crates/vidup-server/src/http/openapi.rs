//! OpenAPI document served at `/openapi.json`.

use super::handlers;
use super::models::{ErrorResponse, HealthResponse, UploadResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Video Upload Backend",
        version = "1.0.0",
        description = "Streams multipart video uploads to a local directory with a size ceiling."
    ),
    paths(handlers::health_check, handlers::upload_video),
    components(schemas(UploadResponse, ErrorResponse, HealthResponse)),
    tags(
        (name = "health", description = "Service health and diagnostics"),
        (name = "upload", description = "Endpoints for uploading video files")
    )
)]
pub struct ApiDoc;
