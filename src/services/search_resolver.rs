use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::MovieRecord,
    services::providers::{MovieProvider, SearchHit},
};

/// Detail records fetched per search unless configured otherwise
pub const DEFAULT_FAN_OUT: usize = 5;

/// How a search resolved
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Exactly one candidate survived; the caller should auto-select it
    Single(MovieRecord),
    /// Several candidates, in the provider's relevance order
    Candidates(Vec<MovieRecord>),
}

impl Resolution {
    pub fn movies(&self) -> &[MovieRecord] {
        match self {
            Resolution::Single(movie) => std::slice::from_ref(movie),
            Resolution::Candidates(movies) => movies,
        }
    }

    pub fn into_movies(self) -> Vec<MovieRecord> {
        match self {
            Resolution::Single(movie) => vec![movie],
            Resolution::Candidates(movies) => movies,
        }
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Resolution::Single(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Count reported by the provider, not the number of records fetched
    pub total_results: u32,
    pub resolution: Resolution,
}

/// Turns a free-text title into one movie or a list to disambiguate
pub struct SearchResolver {
    provider: Arc<dyn MovieProvider>,
    fan_out: usize,
}

impl SearchResolver {
    pub fn new(provider: Arc<dyn MovieProvider>, fan_out: usize) -> Self {
        Self {
            provider,
            fan_out: fan_out.max(1),
        }
    }

    pub async fn resolve(&self, query: &str) -> AppResult<SearchOutcome> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Movie title cannot be empty".to_string(),
            ));
        }

        let page = self.provider.search(query).await?;
        let hits: Vec<SearchHit> = page.hits.into_iter().take(self.fan_out).collect();

        if hits.is_empty() {
            return Err(AppError::NotFound("Movie not found!".to_string()));
        }

        let mut movies = self.fetch_details_batch(hits).await;

        let resolution = match movies.len() {
            0 => return Err(AppError::NotFound("No movies found".to_string())),
            1 => Resolution::Single(movies.remove(0)),
            _ => Resolution::Candidates(movies),
        };

        tracing::info!(
            query = %query,
            total_results = page.total_results,
            returned = resolution.movies().len(),
            auto_selected = resolution.is_single(),
            "Search resolved"
        );

        Ok(SearchOutcome {
            total_results: page.total_results,
            resolution,
        })
    }

    /// Fetches details for every hit concurrently. Failed fetches are logged
    /// and dropped; survivors keep the order of `hits`.
    async fn fetch_details_batch(&self, hits: Vec<SearchHit>) -> Vec<MovieRecord> {
        let mut tasks = Vec::with_capacity(hits.len());

        for hit in hits {
            tracing::debug!(
                movie_id = %hit.id,
                title = %hit.title,
                year = hit.year.as_deref().unwrap_or("N/A"),
                "Fetching candidate details"
            );

            let provider = Arc::clone(&self.provider);
            let id = hit.id.clone();
            let task = tokio::spawn(async move { provider.fetch_details(&id).await });
            tasks.push((hit.id, task));
        }

        let mut movies = Vec::new();
        let mut error_count = 0;

        for (id, task) in tasks {
            let result = task
                .await
                .unwrap_or_else(|e| Err(AppError::Internal(e.to_string())));

            match result {
                Ok(movie) => movies.push(movie),
                Err(e) => {
                    tracing::warn!(
                        movie_id = %id,
                        error = %e,
                        provider = self.provider.name(),
                        "Detail fetch failed, dropping candidate"
                    );
                    error_count += 1;
                }
            }
        }

        if error_count > 0 {
            tracing::warn!(
                success_count = movies.len(),
                error_count,
                "Partial detail fetch failure"
            );
        }

        movies
    }
}
