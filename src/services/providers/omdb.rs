//! OMDb API provider
//!
//! API Flow:
//! 1. Search: /?s={query}&type=movie → page of imdbIDs (10 per page)
//! 2. Details: /?i={imdbID}&plot=full → full record with ratings
//!
//! OMDb answers most failures with HTTP 200 and `"Response": "False"`.

use crate::{
    error::{AppError, AppResult},
    models::{MovieRecord, OmdbDetail, OmdbSearchResponse},
    services::providers::{MovieProvider, SearchHit, SearchPage},
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

const SEARCH_TYPE: &str = "movie";
const PLOT_LENGTH: &str = "full";

pub const MISSING_KEY_MESSAGE: &str = "OMDb API key not configured";

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
}

impl OmdbProvider {
    /// Creates a provider. A missing key is not an error here; every call
    /// then fails with a configuration error instead.
    pub fn new(api_key: Option<String>, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AppError::Config(MISSING_KEY_MESSAGE.to_string()))
    }

    /// Issues one GET against the API root with the given query parameters
    async fn get<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> AppResult<T> {
        let api_key = self.api_key()?;
        let url = format!("{}/", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(params)
            .query(&[("apikey", api_key)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = %status,
                body = %body,
                provider = self.name(),
                "Upstream request failed"
            );
            return Err(AppError::UpstreamStatus(status.as_u16()));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl MovieProvider for OmdbProvider {
    async fn search(&self, query: &str) -> AppResult<SearchPage> {
        let response: OmdbSearchResponse =
            self.get(&[("s", query), ("type", SEARCH_TYPE)]).await?;

        let page = search_page(response)?;

        tracing::info!(
            query = %query,
            total_results = page.total_results,
            hits = page.hits.len(),
            provider = self.name(),
            "Title search completed"
        );

        Ok(page)
    }

    async fn fetch_details(&self, id: &str) -> AppResult<MovieRecord> {
        let detail: OmdbDetail = self.get(&[("i", id), ("plot", PLOT_LENGTH)]).await?;

        if detail.is_failure() {
            return Err(AppError::NotFound(
                detail
                    .error
                    .unwrap_or_else(|| format!("No details for {}", id)),
            ));
        }

        let movie = MovieRecord::try_from(detail)?;

        tracing::debug!(
            movie_id = %movie.id,
            ratings = movie.ratings.len(),
            provider = self.name(),
            "Details fetched"
        );

        Ok(movie)
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}

/// Converts a raw search response, mapping OMDb's in-band failure to `NotFound`
fn search_page(response: OmdbSearchResponse) -> AppResult<SearchPage> {
    if response.is_failure() || response.search.is_empty() {
        return Err(AppError::NotFound(
            response
                .error
                .unwrap_or_else(|| "Movie not found!".to_string()),
        ));
    }

    let total_results = response.total();
    let hits = response
        .search
        .into_iter()
        .map(|hit| SearchHit {
            id: hit.imdb_id,
            title: hit.title,
            year: hit.year,
        })
        .collect();

    Ok(SearchPage {
        total_results,
        hits,
    })
}
