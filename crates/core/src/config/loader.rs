//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result};
use std::path::{Path, PathBuf};

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = path
            .map(String::from)
            .or_else(find_config_file);

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        let config = Self {
            schema,
            path: config_path,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load with defaults only (no file)
    pub fn default() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }

    /// Check values that serde cannot constrain
    pub fn validate(&self) -> Result<()> {
        let threshold = self.schema.search.threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(invalid(format!(
                "search.threshold must be in (0, 1], got {}",
                threshold
            )));
        }

        if self.schema.catalog.path.trim().is_empty() {
            return Err(invalid("catalog.path cannot be empty"));
        }

        if self.schema.media.timeout_secs == 0 {
            return Err(invalid("media.timeout_secs cannot be zero"));
        }

        Ok(())
    }

    /// Catalog path with `~` and environment variables expanded
    pub fn catalog_path(&self) -> Result<PathBuf> {
        let raw = &self.schema.catalog.path;
        shellexpand::full(raw)
            .map(|expanded| PathBuf::from(expanded.as_ref()))
            .map_err(|e| {
                Error::new(
                    ErrorCode::InvalidConfigValue,
                    format!("Cannot expand catalog path {}: {}", raw, e),
                )
            })
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::new(ErrorCode::ConfigValidationError, message)
        .with_suggestion("Fix the value in cookbuddy.toml or remove it to use the default")
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [
        ".cookbuddy.toml",
        "cookbuddy.toml",
        ".config/cookbuddy.toml",
    ];

    for candidate in candidates {
        if Path::new(candidate).exists() {
            return Some(candidate.to_string());
        }
    }

    None
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::config_not_found(path)
        } else {
            Error::config(format!("Failed to read config file {}: {}", path, e)).with_source(e)
        }
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::new(
            ErrorCode::ConfigParseError,
            format!("Failed to parse config file {}: {}", path, e),
        )
        .with_source(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.search.threshold, 0.6);
        assert_eq!(config.schema.catalog.path, "data/recipes.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_file() {
        let file = write_config(
            r#"
            [search]
            threshold = 0.75

            [media]
            timeout_secs = 3
            "#,
        );

        let config = Config::load(file.path().to_str()).unwrap();
        assert_eq!(config.schema.search.threshold, 0.75);
        assert_eq!(config.schema.search.max_results, 5);
        assert_eq!(config.schema.media.timeout_secs, 3);
        assert_eq!(config.schema.media.api_key_env, "YOUTUBE_API_KEY");
    }

    #[test]
    fn test_config_load_empty_file() {
        let file = write_config("");
        let config = Config::load(file.path().to_str()).unwrap();
        assert_eq!(config.schema.logging.level, "warn");
    }

    #[test]
    fn test_config_rejects_bad_threshold() {
        let file = write_config("[search]\nthreshold = 1.5\n");
        let err = Config::load(file.path().to_str()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigValidationError);
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn test_config_parse_error() {
        let file = write_config("[search\nthreshold = ");
        let err = Config::load(file.path().to_str()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
    }

    #[test]
    fn test_config_missing_explicit_file() {
        let err = Config::load(Some("/nonexistent/cookbuddy.toml")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_catalog_path_plain() {
        let config = Config::default();
        assert_eq!(config.catalog_path().unwrap(), PathBuf::from("data/recipes.json"));
    }
}
