use crate::models::{MovieRecord, Verdict, VerdictLabel, ROTTEN_TOMATOES};

const MUST_WATCH: &str = "High ratings from both critics and audiences make this a must-watch!";
const SOLID_ENTERTAINMENT: &str = "Solid entertainment value with positive audience feedback.";
const SKIP: &str =
    "Mixed reviews and potential pacing issues suggest you might want to skip this one.";
const CONSIDER: &str = "Consider watching if you're a fan of the genre or cast.";

/// Runtime window (minutes, inclusive) considered well paced
const GOOD_PACING: std::ops::RangeInclusive<u32> = 80..=165;

/// Matched as substrings of the lower-cased genre list, so "dramatic" counts as drama
const POPULAR_GENRES: [&str; 4] = ["action", "adventure", "comedy", "drama"];

/// Inputs the verdict rules are evaluated against
#[derive(Debug, Clone, PartialEq)]
pub struct Signals {
    /// Audience rating on a 0-10 scale
    pub imdb_score: f64,
    /// Critic percentage, 0-100
    pub rt_score: i64,
    /// Both scores rescaled to 0-100 and averaged 50/50
    pub weighted_score: f64,
    pub runtime_minutes: u32,
    pub is_pacing_good: bool,
    pub is_popular_genre: bool,
}

impl Signals {
    pub fn from_movie(movie: &MovieRecord) -> Self {
        let imdb_score = movie
            .imdb_rating
            .as_deref()
            .and_then(leading_float)
            .unwrap_or(0.0);

        let rt_score = movie
            .rating_from(ROTTEN_TOMATOES)
            .and_then(|value| leading_int(value.trim().trim_end_matches('%')))
            .unwrap_or(0);

        let weighted_score = imdb_score * 10.0 * 0.5 + rt_score as f64 * 0.5;

        let runtime_minutes = movie.runtime_minutes.unwrap_or(0);

        let genres = movie.genres.join(", ").to_lowercase();
        let is_popular_genre = POPULAR_GENRES.iter().any(|g| genres.contains(g));

        Self {
            imdb_score,
            rt_score,
            weighted_score,
            runtime_minutes,
            is_pacing_good: GOOD_PACING.contains(&runtime_minutes),
            is_popular_genre,
        }
    }
}

/// Computes the watch/skip/neutral recommendation for a movie.
///
/// Rules are checked in order and the first match wins:
///
/// 1. weighted score >= 75 with good pacing: watch
/// 2. weighted score >= 65 with good pacing or a popular genre: watch
/// 3. weighted score < 50, or poor pacing with a score < 60: skip
/// 4. anything else: neutral
///
/// A movie with no ratings scores 0 and is always skipped.
pub fn score(movie: &MovieRecord) -> Verdict {
    let signals = Signals::from_movie(movie);
    let verdict = decide(&signals);

    tracing::debug!(
        movie_id = %movie.id,
        weighted_score = signals.weighted_score,
        runtime_minutes = signals.runtime_minutes,
        popular_genre = signals.is_popular_genre,
        verdict = %verdict.label,
        "Verdict computed"
    );

    verdict
}

pub fn decide(signals: &Signals) -> Verdict {
    let score = signals.weighted_score;

    let (label, reason) = if score >= 75.0 && signals.is_pacing_good {
        (VerdictLabel::Watch, MUST_WATCH)
    } else if score >= 65.0 && (signals.is_pacing_good || signals.is_popular_genre) {
        (VerdictLabel::Watch, SOLID_ENTERTAINMENT)
    } else if score < 50.0 || (!signals.is_pacing_good && score < 60.0) {
        (VerdictLabel::Skip, SKIP)
    } else {
        (VerdictLabel::Neutral, CONSIDER)
    };

    Verdict { label, reason }
}

/// Parses the numeric prefix of a rating such as "7.4" or "7.4/10"
fn leading_float(raw: &str) -> Option<f64> {
    let raw = raw.trim_start();
    let mut seen_dot = false;
    let end = raw
        .char_indices()
        .find(|&(_, c)| {
            if c == '.' && !seen_dot {
                seen_dot = true;
                false
            } else {
                !c.is_ascii_digit()
            }
        })
        .map(|(i, _)| i)
        .unwrap_or(raw.len());

    raw[..end].parse().ok()
}

/// Parses the leading digits of a value such as "82" or "82.5"
fn leading_int(raw: &str) -> Option<i64> {
    let end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    raw[..end].parse().ok()
}
