use serde::{Serialize, Serializer};
use std::fmt::Display;

pub mod omdb;

pub use omdb::{OmdbDetail, OmdbRating, OmdbSearchHit, OmdbSearchResponse};

/// Placeholder rendered for any field the provider did not supply
pub const UNAVAILABLE: &str = "N/A";

/// Source name the verdict engine reads critic scores from
pub const ROTTEN_TOMATOES: &str = "Rotten Tomatoes";

/// One title's metadata as returned to the client
///
/// Built whole from a single provider payload (see `TryFrom<OmdbDetail>`).
/// Optional fields are `None` when the provider omitted them or sent its
/// "N/A" sentinel, and serialize back out as "N/A".
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub id: String,
    pub title: String,
    #[serde(serialize_with = "or_unavailable")]
    pub year: Option<String>,
    #[serde(serialize_with = "or_unavailable")]
    pub rated: Option<String>,
    #[serde(serialize_with = "or_unavailable")]
    pub released: Option<String>,
    #[serde(serialize_with = "or_unavailable")]
    pub runtime: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub genres: Vec<String>,
    #[serde(serialize_with = "or_unavailable")]
    pub director: Option<String>,
    #[serde(serialize_with = "or_unavailable")]
    pub actors: Option<String>,
    #[serde(serialize_with = "or_unavailable")]
    pub plot: Option<String>,
    #[serde(serialize_with = "or_unavailable")]
    pub language: Option<String>,
    #[serde(serialize_with = "or_unavailable")]
    pub country: Option<String>,
    #[serde(serialize_with = "or_unavailable")]
    pub awards: Option<String>,
    #[serde(serialize_with = "or_unavailable")]
    pub poster_url: Option<String>,
    #[serde(serialize_with = "or_unavailable")]
    pub imdb_rating: Option<String>,
    #[serde(serialize_with = "or_unavailable")]
    pub imdb_votes: Option<String>,
    #[serde(serialize_with = "or_unavailable")]
    pub metascore: Option<String>,
    pub ratings: Vec<Rating>,
    #[serde(serialize_with = "or_unavailable")]
    pub box_office: Option<String>,
    #[serde(serialize_with = "or_unavailable")]
    pub budget: Option<String>,
    #[serde(serialize_with = "or_unavailable")]
    pub production: Option<String>,
}

impl MovieRecord {
    /// Value reported by the named rating source, if present
    pub fn rating_from(&self, source: &str) -> Option<&str> {
        self.ratings
            .iter()
            .find(|r| r.source == source)
            .map(|r| r.value.as_str())
    }
}

/// A single (source, value) rating pair, e.g. ("Rotten Tomatoes", "82%")
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Rating {
    pub source: String,
    pub value: String,
}

fn or_unavailable<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_deref().unwrap_or(UNAVAILABLE))
}

/// Treats missing, blank and "N/A" provider values alike
pub fn available(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != UNAVAILABLE)
}

/// Strips every non-digit from a runtime string ("142 min") and parses the rest.
/// Anything without digits is 0.
pub fn parse_runtime_minutes(raw: &str) -> u32 {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Splits the provider's comma-separated genre field
pub fn parse_genres(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty() && *g != UNAVAILABLE)
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Verdict
// ============================================================================

/// Watch recommendation label
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VerdictLabel {
    Watch,
    Skip,
    Neutral,
}

impl Display for VerdictLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerdictLabel::Watch => write!(f, "watch"),
            VerdictLabel::Skip => write!(f, "skip"),
            VerdictLabel::Neutral => write!(f, "neutral"),
        }
    }
}

/// Recommendation derived from a MovieRecord
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Verdict {
    pub label: VerdictLabel,
    pub reason: &'static str,
}

/// A record paired with its verdict, as served to the client
#[derive(Debug, Clone, Serialize)]
pub struct ScoredMovie {
    #[serde(flatten)]
    pub movie: MovieRecord,
    pub verdict: Verdict,
}
