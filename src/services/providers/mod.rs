//! Movie metadata provider abstraction
//!
//! A provider offers a fuzzy title search returning candidate ids, and a
//! detail lookup returning a full record for one id. The search resolver
//! drives both; nothing else talks to the upstream service.

use crate::{error::AppResult, models::MovieRecord};

pub mod omdb;

pub use omdb::OmdbProvider;

/// One fuzzy search result page
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    /// Count reported by the provider, may exceed `hits.len()`
    pub total_results: u32,
    /// Candidates in the provider's relevance order
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub year: Option<String>,
}

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    /// Fuzzy search restricted to theatrical movies
    ///
    /// Fails with `NotFound` carrying the provider's message when nothing matches.
    async fn search(&self, query: &str) -> AppResult<SearchPage>;

    /// Fetch the full record for one provider id
    async fn fetch_details(&self, id: &str) -> AppResult<MovieRecord>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
