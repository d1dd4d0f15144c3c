//! Error types for the search crate.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while configuring the search engine.
///
/// Searching itself never fails; a missing match is `None`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// Similarity threshold outside `(0, 1]`
    #[error("Invalid similarity threshold {0}: must be greater than 0 and at most 1")]
    InvalidThreshold(f64),
}

/// Error code for integration with cookbuddy-core error handling.
/// Range: 5xxx for search errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorCode {
    /// Similarity threshold out of range
    InvalidThreshold = 5001,
}

impl SearchError {
    /// Returns the error code for this error.
    pub fn code(&self) -> SearchErrorCode {
        match self {
            SearchError::InvalidThreshold(_) => SearchErrorCode::InvalidThreshold,
        }
    }
}
