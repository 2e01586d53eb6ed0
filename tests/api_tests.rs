use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;

use cinebolt_api::{
    error::{AppError, AppResult},
    models::{MovieRecord, OmdbDetail},
    routes::{create_router, AppState},
    services::providers::{MovieProvider, OmdbProvider, SearchHit, SearchPage},
};

/// In-memory provider keyed by query and movie id
#[derive(Default)]
struct StubProvider {
    searches: HashMap<String, SearchPage>,
    details: HashMap<String, MovieRecord>,
    calls: AtomicUsize,
}

impl StubProvider {
    fn with_search(mut self, query: &str, total_results: u32, ids: &[&str]) -> Self {
        let hits = ids
            .iter()
            .map(|id| SearchHit {
                id: id.to_string(),
                title: query.to_string(),
                year: None,
            })
            .collect();
        self.searches.insert(
            query.to_string(),
            SearchPage {
                total_results,
                hits,
            },
        );
        self
    }

    fn with_detail(mut self, json: &str) -> Self {
        let detail: OmdbDetail = serde_json::from_str(json).unwrap();
        let movie = MovieRecord::try_from(detail).unwrap();
        self.details.insert(movie.id.clone(), movie);
        self
    }
}

#[async_trait::async_trait]
impl MovieProvider for StubProvider {
    async fn search(&self, query: &str) -> AppResult<SearchPage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.searches
            .get(query)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Movie not found!".to_string()))
    }

    async fn fetch_details(&self, id: &str) -> AppResult<MovieRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.details
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::UpstreamStatus(503))
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

const DUNE_2021: &str = r#"{
    "imdbID": "tt1160419", "Title": "Dune", "Year": "2021",
    "Runtime": "155 min", "Genre": "Action, Adventure, Drama",
    "imdbRating": "8.0", "Poster": "N/A",
    "Ratings": [{"Source": "Rotten Tomatoes", "Value": "83%"}],
    "Response": "True"
}"#;

const DUNE_1984: &str = r#"{
    "imdbID": "tt0087182", "Title": "Dune", "Year": "1984",
    "Runtime": "137 min", "Genre": "Action, Adventure, Sci-Fi",
    "imdbRating": "6.3",
    "Ratings": [{"Source": "Rotten Tomatoes", "Value": "36%"}],
    "Response": "True"
}"#;

const SHORT_HORROR: &str = r#"{
    "imdbID": "tt9000001", "Title": "Tiny Terror", "Year": "2019",
    "Runtime": "30 min", "Genre": "Horror",
    "imdbRating": "9.0",
    "Ratings": [{"Source": "Rotten Tomatoes", "Value": "95%"}],
    "Response": "True"
}"#;

fn stub() -> StubProvider {
    StubProvider::default()
        .with_search("Dune", 57, &["tt1160419", "tt9999999", "tt0087182"])
        .with_search("Tiny Terror", 1, &["tt9000001"])
        .with_detail(DUNE_2021)
        .with_detail(DUNE_1984)
        .with_detail(SHORT_HORROR)
}

fn create_test_server(provider: Arc<StubProvider>) -> TestServer {
    let state = Arc::new(AppState::new(provider, 5));
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(Arc::new(stub()));
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_search_returns_candidates_in_order_with_verdicts() {
    let server = create_test_server(Arc::new(stub()));

    let response = server.get("/api/search/Dune").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["totalResults"], 57);
    assert_eq!(body["autoSelected"], false);

    let movies = body["movies"].as_array().unwrap();
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0]["id"], "tt1160419");
    assert_eq!(movies[1]["id"], "tt0087182");

    // 8.0 / 83% at 155 min: weighted 81.5 with good pacing
    assert_eq!(movies[0]["verdict"]["label"], "watch");
    assert_eq!(
        movies[0]["verdict"]["reason"],
        "High ratings from both critics and audiences make this a must-watch!"
    );
    // 6.3 / 36%: weighted 49.5
    assert_eq!(movies[1]["verdict"]["label"], "skip");

    assert_eq!(movies[0]["posterUrl"], "N/A");
    assert_eq!(movies[0]["boxOffice"], "N/A");
}

#[tokio::test]
async fn test_single_result_is_auto_selected() {
    let server = create_test_server(Arc::new(stub()));

    let response = server.get("/api/search/Tiny%20Terror").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["autoSelected"], true);
    assert_eq!(body["movies"].as_array().unwrap().len(), 1);
    assert_eq!(body["movies"][0]["verdict"]["label"], "neutral");
}

#[tokio::test]
async fn test_unknown_title_is_not_found() {
    let server = create_test_server(Arc::new(stub()));

    let response = server.get("/api/search/asdkfjhasdkfjh").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Movie not found!");
}

#[tokio::test]
async fn test_blank_title_is_rejected_without_upstream_call() {
    let provider = Arc::new(stub());
    let server = create_test_server(provider.clone());

    let response = server.get("/api/search/%20%20").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server.get("/api/search/").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Movie title cannot be empty");
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_non_utf8_title_is_json_bad_request() {
    let provider = Arc::new(stub());
    let server = create_test_server(provider.clone());

    let response = server.get("/api/search/%FF").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Invalid movie title");
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_api_key_is_explicit_server_error() {
    let provider = OmdbProvider::new(None, "http://127.0.0.1:9".to_string());
    let state = Arc::new(AppState::new(Arc::new(provider), 5));
    let server = TestServer::new(create_router(state)).unwrap();

    let response = server.get("/api/search/Dune").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "OMDb API key not configured");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server(Arc::new(stub()));
    let id = "6f1c2d3e-4b5a-4c6d-8e7f-901234567890";

    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static(id),
        )
        .await;

    assert_eq!(response.header("x-request-id"), id);
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let server = create_test_server(Arc::new(stub()));

    let response = server.get("/health").await;
    let header = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(header.to_str().unwrap()).is_ok());
}
