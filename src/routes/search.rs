use axum::{
    extract::{rejection::PathRejection, Path, State},
    Extension, Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::ScoredMovie,
    routes::AppState,
    services::verdict,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub total_results: u32,
    /// True when exactly one movie survived and needs no disambiguation
    pub auto_selected: bool,
    pub movies: Vec<ScoredMovie>,
}

/// Handler for `GET /api/search/:title`
pub async fn search(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    title: Result<Path<String>, PathRejection>,
) -> AppResult<Json<SearchResponse>> {
    let Path(title) = title.map_err(|rejection| {
        tracing::debug!(request_id = %request_id, error = %rejection, "Rejected title segment");
        AppError::InvalidInput("Invalid movie title".to_string())
    })?;

    tracing::info!(
        request_id = %request_id,
        title = %title,
        "Processing search request"
    );

    let outcome = state.resolver.resolve(&title).await?;
    let auto_selected = outcome.resolution.is_single();

    let movies: Vec<ScoredMovie> = outcome
        .resolution
        .into_movies()
        .into_iter()
        .map(|movie| ScoredMovie {
            verdict: verdict::score(&movie),
            movie,
        })
        .collect();

    tracing::info!(
        request_id = %request_id,
        returned = movies.len(),
        "Search completed"
    );

    Ok(Json(SearchResponse {
        total_results: outcome.total_results,
        auto_selected,
        movies,
    }))
}

/// Handler for `GET /api/search/` with an empty title segment
pub async fn missing_title() -> AppError {
    AppError::InvalidInput("Movie title cannot be empty".to_string())
}
