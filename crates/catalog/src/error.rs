//! Error types for the catalog crate.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while loading a recipe catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Catalog is not valid JSON or has the wrong shape
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A record has no name
    #[error("Record {index} has no name")]
    MissingName {
        /// Position of the record in the catalog
        index: usize,
    },

    /// Ingredient and quantity lists differ in length
    #[error("Recipe '{name}' has {labels} ingredients but {values} quantities")]
    MismatchedAttributes {
        /// Recipe name
        name: String,
        /// Number of ingredients
        labels: usize,
        /// Number of quantities
        values: usize,
    },
}

/// Error code for integration with cookbuddy-core error handling.
/// Range: 4xxx for catalog errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogErrorCode {
    /// File could not be read
    Io = 4000,
    /// JSON parsing error
    JsonParsing = 4001,
    /// Malformed record
    InvalidRecord = 4002,
}

impl CatalogError {
    /// Returns the error code for this error.
    pub fn code(&self) -> CatalogErrorCode {
        match self {
            CatalogError::Io { .. } => CatalogErrorCode::Io,
            CatalogError::Json(_) => CatalogErrorCode::JsonParsing,
            CatalogError::MissingName { .. } | CatalogError::MismatchedAttributes { .. } => {
                CatalogErrorCode::InvalidRecord
            }
        }
    }
}
