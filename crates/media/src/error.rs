//! Error types for the media lookup client

use thiserror::Error;

/// Result type alias for media operations
pub type MediaResult<T> = Result<T, MediaError>;

/// Media lookup errors
#[derive(Error, Debug)]
pub enum MediaError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No API key configured
    #[error("Missing video API key (set {0})")]
    MissingApiKey(String),

    /// API rejected the key or the quota is used up
    #[error("Invalid API key or quota exceeded")]
    Forbidden,

    /// API returned an error response
    #[error("Failed to fetch video ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// All retry attempts exhausted
    #[error("All {attempts} attempts failed: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Last error message
        last_error: String,
    },

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl MediaError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an API response error, mapping 403 to `Forbidden`
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        if status == 403 {
            Self::Forbidden
        } else {
            Self::ApiResponse {
                status,
                message: message.into(),
            }
        }
    }

    /// Check if this error is retryable
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            Self::ApiResponse { status, .. } => *status >= 500 || *status == 429,
            Self::Json(_)
            | Self::Config(_)
            | Self::MissingApiKey(_)
            | Self::Forbidden
            | Self::RetriesExhausted { .. }
            | Self::InvalidUrl(_) => false,
        }
    }
}
