use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport failure talking to the provider. Built through `From` so the
    /// request URL (which carries the API key) is stripped first.
    #[error("HTTP client error: {0}")]
    HttpClient(reqwest::Error),

    /// Non-success HTTP status from the provider
    #[error("External API returned status {0}")]
    UpstreamStatus(u16),

    /// Malformed payload from the provider
    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::HttpClient(err.without_url())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::HttpClient(_)
            | AppError::UpstreamStatus(_)
            | AppError::ExternalApi(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let message = match self {
            AppError::InvalidInput(msg) | AppError::NotFound(msg) | AppError::Config(msg) => msg,
            AppError::HttpClient(_) => "Error fetching data from OMDb API".to_string(),
            AppError::UpstreamStatus(status) => {
                format!("Failed to fetch data from OMDb API: {}", status)
            }
            AppError::ExternalApi(msg) => format!("Failed to fetch data from OMDb API: {}", msg),
            AppError::Internal(_) => "Internal server error".to_string(),
        };

        let body = Json(json!({
            "message": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
