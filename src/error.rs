/// Error types for trend-service
///
/// Errors here belong to the background recomputation path. The read
/// endpoint never surfaces them: a failed cycle keeps the previously
/// published snapshot visible and `GET /api/trends` stays infallible.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for trend-service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("post source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("scan exceeded page ceiling after {pages} pages")]
    ScanOverrun { pages: u32 },

    #[error("recomputation cycle timed out after {elapsed_secs}s")]
    CycleTimeout { elapsed_secs: u64 },
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": "server_error",
            "message": self.to_string(),
        }))
    }
}
