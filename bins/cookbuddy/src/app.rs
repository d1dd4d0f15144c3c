//! Shared startup: configuration, catalog and index

use cookbuddy_catalog::{load_catalog, CatalogError, CatalogStats};
use cookbuddy_core::config::{Config, MediaSection};
use cookbuddy_core::{Error, ErrorCode, ResultExt};
use cookbuddy_media::{MediaClient, MediaConfig, MediaError};
use cookbuddy_search::{FuzzyIndex, SearchConfig};
use cookbuddy_telemetry::Timer;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Command-line overrides applied on top of the config file
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub config: Option<String>,
    pub catalog: Option<PathBuf>,
    pub threshold: Option<f64>,
}

/// Everything a command needs
pub struct App {
    pub config: Config,
    pub catalog_path: PathBuf,
    pub index: FuzzyIndex,
}

impl App {
    /// Load configuration, then the catalog, then build the index
    pub fn load(config: Config, overrides: &Overrides) -> Result<Self, Error> {
        let threshold = overrides
            .threshold
            .unwrap_or(config.schema.search.threshold);
        let search_config = SearchConfig::new(threshold)
            .map_err(|e| Error::invalid_threshold(threshold).with_source(e))?;

        let catalog_path = match &overrides.catalog {
            Some(path) => path.clone(),
            None => config.catalog_path().context("Resolving [catalog] path")?,
        };

        let records = load_catalog(&catalog_path).map_err(|e| catalog_error(&catalog_path, e))?;
        let stats = CatalogStats::of(&records);

        let timer = Timer::start("build_index");
        let index = FuzzyIndex::with_config(records, search_config);
        timer.stop();

        debug!(
            catalog = %catalog_path.display(),
            records = stats.records,
            threshold,
            "Ready"
        );

        Ok(Self {
            config,
            catalog_path,
            index,
        })
    }

    /// Number of results listed by `search --all`
    pub fn max_results(&self) -> usize {
        self.config.schema.search.max_results
    }

    /// Video client built from the `[media]` section and the environment
    pub fn media_client(&self) -> Result<MediaClient, Error> {
        MediaClient::with_config(media_config(&self.config.schema.media)).map_err(media_error)
    }
}

/// Load the config file, applying the explicit path if given
pub fn load_config(overrides: &Overrides) -> Result<Config, Error> {
    Config::load(overrides.config.as_deref())
}

fn media_config(section: &MediaSection) -> MediaConfig {
    MediaConfig::default()
        .with_base_url(section.base_url.clone())
        .with_timeout(Duration::from_secs(section.timeout_secs))
        .with_query_suffix(section.query_suffix.clone())
        .with_api_key_env(section.api_key_env.clone())
        .with_env_overrides()
}

fn catalog_error(path: &Path, err: CatalogError) -> Error {
    let code = match &err {
        CatalogError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
            ErrorCode::FileNotFound
        }
        CatalogError::Io { .. } => ErrorCode::IoError,
        CatalogError::Json(_) => ErrorCode::CatalogParseError,
        CatalogError::MissingName { .. } | CatalogError::MismatchedAttributes { .. } => {
            ErrorCode::InvalidRecord
        }
    };

    Error::new(code, err.to_string())
        .with_context(format!("Loading catalog {}", path.display()))
        .with_suggestion("Use --catalog or [catalog] path in cookbuddy.toml to point at a recipes JSON file")
        .with_source(err)
}

/// Convert a video lookup failure into a reportable error
pub fn media_error(err: MediaError) -> Error {
    match err {
        MediaError::MissingApiKey(var) => Error::missing_api_key(&var),
        MediaError::Forbidden => {
            Error::new(ErrorCode::MediaUnavailable, MediaError::Forbidden.to_string())
                .with_suggestion("Check the API key and its daily quota")
        }
        other => Error::media(other.to_string()).with_source(other),
    }
}
