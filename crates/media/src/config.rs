//! Configuration for the media lookup client
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{MediaError, MediaResult};
use std::env;
use std::time::Duration;

/// Default video search API
const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Default environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "YOUTUBE_API_KEY";

/// Retry behaviour for transient failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each subsequent one
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no retries
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
        }
    }

    /// Delay before the given attempt (0-based)
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt - 1))
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Base URL of the video search API
    pub base_url: String,
    /// API key, if configured
    pub api_key: Option<String>,
    /// Name of the variable the key is read from
    pub api_key_env: String,
    /// Request timeout
    pub timeout: Duration,
    /// Words appended to the dish name in the search query
    pub query_suffix: String,
    /// Retry policy
    pub retry: RetryPolicy,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout: Duration::from_secs(10),
            query_suffix: "South Indian recipe cooking".to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

impl MediaConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `COOKBUDDY_MEDIA_URL`: Base URL of the video search API
    /// - `YOUTUBE_API_KEY`: API key
    /// - `COOKBUDDY_TIMEOUT_SECS`: Request timeout in seconds
    pub fn from_env() -> MediaResult<Self> {
        let config = Self::default().with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides on top of this configuration
    ///
    /// `COOKBUDDY_MEDIA_URL` and `COOKBUDDY_TIMEOUT_SECS` replace the base
    /// URL and timeout when set. The API key is read from the variable named
    /// by `api_key_env`; a blank value counts as unset.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = env::var("COOKBUDDY_MEDIA_URL") {
            self.base_url = url;
        }

        if let Some(secs) = env::var("COOKBUDDY_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            self.timeout = Duration::from_secs(secs);
        }

        if let Some(key) = env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
        {
            self.api_key = Some(key);
        }

        self
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set the API key
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Builder-style method to set the variable the API key is read from
    #[must_use]
    pub fn with_api_key_env(mut self, var: impl Into<String>) -> Self {
        self.api_key_env = var.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set the query suffix
    #[must_use]
    pub fn with_query_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.query_suffix = suffix.into();
        self
    }

    /// Builder-style method to set retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> MediaResult<()> {
        if self.base_url.is_empty() {
            return Err(MediaError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(MediaError::config("base_url must start with http:// or https://"));
        }

        if self.timeout.is_zero() {
            return Err(MediaError::config("timeout cannot be zero"));
        }

        if self.retry.max_attempts == 0 {
            return Err(MediaError::config("retry.max_attempts must be at least 1"));
        }

        Ok(())
    }
}
