// ============================================================================
// OMDb API Types
// ============================================================================

use serde::Deserialize;

use super::{available, parse_genres, parse_runtime_minutes, MovieRecord, Rating};
use crate::error::AppError;

/// Response from `GET /?s={query}&type=movie`
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    pub search: Vec<OmdbSearchHit>,
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<String>,
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl OmdbSearchResponse {
    /// OMDb reports "no results" as HTTP 200 with `"Response": "False"`
    pub fn is_failure(&self) -> bool {
        self.response.as_deref() == Some("False")
    }

    /// Provider-reported total, falling back to the number of hits on this page
    pub fn total(&self) -> u32 {
        self.total_results
            .as_deref()
            .and_then(|t| t.trim().parse().ok())
            .unwrap_or(self.search.len() as u32)
    }
}

/// One entry of a fuzzy search page
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OmdbSearchHit {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
}

/// Response from `GET /?i={imdbID}&plot=full`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OmdbDetail {
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
    pub title: Option<String>,
    pub year: Option<String>,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub awards: Option<String>,
    pub poster: Option<String>,
    pub ratings: Vec<OmdbRating>,
    pub metascore: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes")]
    pub imdb_votes: Option<String>,
    pub box_office: Option<String>,
    pub budget: Option<String>,
    pub production: Option<String>,
    pub response: Option<String>,
    pub error: Option<String>,
}

impl OmdbDetail {
    pub fn is_failure(&self) -> bool {
        self.response.as_deref() == Some("False")
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbRating {
    pub source: String,
    pub value: String,
}

impl TryFrom<OmdbDetail> for MovieRecord {
    type Error = AppError;

    fn try_from(detail: OmdbDetail) -> Result<Self, Self::Error> {
        let id = available(detail.imdb_id)
            .ok_or_else(|| AppError::ExternalApi("OMDb response missing imdbID".to_string()))?;
        let title = available(detail.title).ok_or_else(|| {
            AppError::ExternalApi(format!("OMDb response for {} missing Title", id))
        })?;

        let runtime = available(detail.runtime);
        let runtime_minutes = runtime
            .as_deref()
            .map(parse_runtime_minutes)
            .filter(|minutes| *minutes > 0);
        let genres = detail.genre.as_deref().map(parse_genres).unwrap_or_default();

        let ratings = detail
            .ratings
            .into_iter()
            .map(|r| Rating {
                source: r.source,
                value: r.value,
            })
            .collect();

        Ok(MovieRecord {
            id,
            title,
            year: available(detail.year),
            rated: available(detail.rated),
            released: available(detail.released),
            runtime,
            runtime_minutes,
            genres,
            director: available(detail.director),
            actors: available(detail.actors),
            plot: available(detail.plot),
            language: available(detail.language),
            country: available(detail.country),
            awards: available(detail.awards),
            poster_url: available(detail.poster),
            imdb_rating: available(detail.imdb_rating),
            imdb_votes: available(detail.imdb_votes),
            metascore: available(detail.metascore),
            ratings,
            box_office: available(detail.box_office),
            budget: available(detail.budget),
            production: available(detail.production),
        })
    }
}
