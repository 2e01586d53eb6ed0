use axum::{
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{
    config::Config,
    middleware::{http_span, request_id_middleware},
    services::{
        providers::{MovieProvider, OmdbProvider},
        SearchResolver,
    },
};

pub mod search;

/// Shared application state
pub struct AppState {
    pub resolver: SearchResolver,
}

impl AppState {
    pub fn new(provider: Arc<dyn MovieProvider>, fan_out: usize) -> Self {
        Self {
            resolver: SearchResolver::new(provider, fan_out),
        }
    }

    /// Wires the OMDb provider from configuration
    pub fn from_config(config: &Config) -> Self {
        let provider = OmdbProvider::new(config.omdb_credential(), config.omdb_api_url.clone());

        if !provider.is_configured() {
            tracing::warn!("No OMDb API key configured; searches will fail until one is set");
        }

        Self::new(Arc::new(provider), config.search_fan_out)
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(http_span)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/search/", get(search::missing_title))
        .route("/search/:title", get(search::search))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
