//! Configuration schema definitions
//!
//! Every section falls back to defaults, so an empty file is a valid config.

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub search: SearchSection,

    #[serde(default)]
    pub catalog: CatalogSection,

    #[serde(default)]
    pub media: MediaSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

/// Fuzzy search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSection {
    /// Minimum similarity in (0, 1] for a dish to count as a match
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Maximum results listed by `search --all`
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            max_results: default_max_results(),
        }
    }
}

fn default_threshold() -> f64 {
    0.6
}

fn default_max_results() -> usize {
    5
}

/// Recipe catalog location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSection {
    /// Path to the recipes JSON file (`~` and `$VARS` are expanded)
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> String {
    "data/recipes.json".to_string()
}

/// Cooking video lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaSection {
    /// Base URL of the video search API
    #[serde(default = "default_media_url")]
    pub base_url: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Words appended to the dish name when searching
    #[serde(default = "default_query_suffix")]
    pub query_suffix: String,
}

impl Default for MediaSection {
    fn default() -> Self {
        Self {
            base_url: default_media_url(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            query_suffix: default_query_suffix(),
        }
    }
}

fn default_media_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_api_key_env() -> String {
    "YOUTUBE_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_query_suffix() -> String {
    "South Indian recipe cooking".to_string()
}

/// Log output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Default level when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
