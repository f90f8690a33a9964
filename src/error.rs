//! Error types for Canvas API operations.

use thiserror::Error;

/// Errors that can occur during Canvas API operations.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// API request failed with a non-2xx status.
    #[error("Canvas API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

impl CanvasError {
    /// The HTTP status code carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CanvasError::ApiError { status_code, .. } => *status_code,
            CanvasError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True if this error represents a 404 from the API.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

/// Result type alias for Canvas operations.
pub type Result<T> = core::result::Result<T, CanvasError>;
