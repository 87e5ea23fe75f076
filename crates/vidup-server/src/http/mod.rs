//! HTTP transport: health, upload and OpenAPI routes over a shared upload store.

mod error;
mod handlers;
mod models;
mod openapi;

pub use error::ApiError;
pub use handlers::FILE_FIELD;
pub use models::{ErrorResponse, HealthResponse, UploadResponse, UPLOAD_SUCCESS_MESSAGE};
pub use openapi::ApiDoc;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use vidup_core::config::VidupConfig;
use vidup_core::UploadStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<UploadStore>,
}

/// Builds the router from configuration.
pub fn router_from_config(cfg: &VidupConfig) -> Result<Router> {
    build_router(cfg.upload_store()?, &cfg.cors_allowed_origins)
}

/// Builds the router around `store`.
///
/// The upload route has axum's body limit disabled; the store enforces its own
/// ceiling while streaming.
pub fn build_router(store: UploadStore, cors_origins: &[String]) -> Result<Router> {
    let state = AppState {
        store: Arc::new(store),
    };

    let router = Router::new()
        .route("/", get(handlers::health_check))
        .route(
            "/upload",
            post(handlers::upload_video).layer(DefaultBodyLimit::disable()),
        )
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .with_state(state)
        .layer(cors_layer(cors_origins)?)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    Ok(router)
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.iter().any(|o| o == "*") {
        return Ok(cors.allow_origin(Any));
    }
    let mut values = Vec::with_capacity(origins.len());
    for origin in origins {
        let value = origin
            .parse::<HeaderValue>()
            .with_context(|| format!("invalid CORS origin: {origin}"))?;
        values.push(value);
    }
    Ok(cors.allow_origin(values))
}
