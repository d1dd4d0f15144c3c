//! Video lookup client

use crate::config::MediaConfig;
use crate::error::{MediaError, MediaResult};
use crate::video::{SearchResponse, Video};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Response, Url};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Looks up a cooking video for a dish
///
/// Wraps `reqwest` with:
/// - A per-request timeout
/// - Retry with exponential backoff for transient failures
/// - Request correlation IDs for tracing
#[derive(Clone)]
pub struct MediaClient {
    inner: Client,
    config: Arc<MediaConfig>,
}

impl MediaClient {
    /// Create a new client with specific configuration
    pub fn with_config(config: MediaConfig) -> MediaResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(USER_AGENT, HeaderValue::from_static("cookbuddy-media/1.0"));

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(MediaError::Request)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &MediaConfig {
        &self.config
    }

    /// Whether an API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Build the search URL for a dish
    pub fn search_url(&self, dish_name: &str) -> MediaResult<Url> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| MediaError::MissingApiKey(self.config.api_key_env.clone()))?;

        let query = search_query(dish_name, &self.config.query_suffix);
        let endpoint = format!("{}/search", self.config.base_url.trim_end_matches('/'));

        Url::parse_with_params(
            &endpoint,
            &[
                ("part", "snippet"),
                ("maxResults", "1"),
                ("q", query.as_str()),
                ("type", "video"),
                ("key", key),
            ],
        )
        .map_err(|e| MediaError::InvalidUrl(format!("{endpoint}: {e}")))
    }

    /// Find the top video for a dish
    ///
    /// Returns `Ok(None)` when the search succeeds but finds nothing.
    /// Fails with [`MediaError::MissingApiKey`] before any request is made
    /// when no key is configured.
    #[instrument(skip(self), fields(request_id))]
    pub async fn search_video(&self, dish_name: &str) -> MediaResult<Option<Video>> {
        let url = self.search_url(dish_name)?;
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let response: SearchResponse = self.execute_with_retry(&request_id, &url).await?;
        let video = response.into_first_video();

        if video.is_none() {
            debug!(request_id = %request_id, dish = dish_name, "No video found");
        }
        Ok(video)
    }

    /// Execute request with retry logic
    async fn execute_with_retry(&self, request_id: &str, url: &Url) -> MediaResult<SearchResponse> {
        let retry = self.config.retry;
        let mut last_error: Option<MediaError> = None;

        for attempt in 0..retry.max_attempts {
            if attempt > 0 {
                let delay = retry.delay_for_attempt(attempt);
                debug!(
                    request_id = %request_id,
                    attempt = attempt,
                    delay_ms = delay.as_millis(),
                    "Retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }

            let start = Instant::now();
            let result = self.execute_single_request(request_id, url).await;
            let elapsed = start.elapsed();

            match result {
                Ok(value) => {
                    debug!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        elapsed_ms = elapsed.as_millis(),
                        "Video search succeeded"
                    );
                    return Ok(value);
                }
                Err(e) if e.is_retryable() && attempt + 1 < retry.max_attempts => {
                    warn!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        error = %e,
                        "Video search failed, will retry"
                    );
                    last_error = Some(e);
                }
                Err(e) => {
                    debug!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        error = %e,
                        "Video search failed, not retrying"
                    );
                    return Err(e);
                }
            }
        }

        Err(MediaError::RetriesExhausted {
            attempts: retry.max_attempts,
            last_error: last_error.map_or_else(|| "Unknown error".to_string(), |e| e.to_string()),
        })
    }

    /// Execute a single request without retry
    async fn execute_single_request(&self, request_id: &str, url: &Url) -> MediaResult<SearchResponse> {
        let response = self
            .inner
            .get(url.clone())
            .header(X_REQUEST_ID, request_id)
            .send()
            .await?;
        handle_response(response).await
    }
}

/// Handle HTTP response and deserialize
async fn handle_response(response: Response) -> MediaResult<SearchResponse> {
    let status = response.status();

    if status.is_success() {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    } else {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(MediaError::api_response(status.as_u16(), message))
    }
}

/// Query text sent to the search API
fn search_query(dish_name: &str, suffix: &str) -> String {
    let dish = dish_name.trim();
    let suffix = suffix.trim();
    if suffix.is_empty() {
        dish.to_string()
    } else {
        format!("{dish} {suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryPolicy;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response and hand back the raw request
    async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            request
        });

        (format!("http://{addr}"), handle)
    }

    fn client_for(base_url: &str) -> MediaClient {
        let config = MediaConfig::default()
            .with_base_url(base_url)
            .with_api_key("test-key")
            .with_retry(RetryPolicy::none());
        MediaClient::with_config(config).unwrap()
    }

    #[test]
    fn test_search_url() {
        let client = client_for("https://example.test/youtube/v3/");
        let url = client.search_url("Masala Dosa").unwrap();

        assert_eq!(url.path(), "/youtube/v3/search");
        let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(params.contains(&("part".into(), "snippet".into())));
        assert!(params.contains(&("maxResults".into(), "1".into())));
        assert!(params.contains(&("type".into(), "video".into())));
        assert!(params.contains(&("key".into(), "test-key".into())));
        assert!(params.contains(&(
            "q".into(),
            "Masala Dosa South Indian recipe cooking".into()
        )));
    }

    #[test]
    fn test_search_query_without_suffix() {
        assert_eq!(search_query(" Idli ", ""), "Idli");
        assert_eq!(search_query("Idli", "recipe"), "Idli recipe");
    }

    #[test]
    fn test_missing_key_fails_before_request() {
        let config = MediaConfig::default().with_base_url("http://127.0.0.1:9");
        let client = MediaClient::with_config(config).unwrap();
        assert!(!client.has_api_key());

        let err = tokio_test::block_on(client.search_video("Idli")).unwrap_err();
        match err {
            MediaError::MissingApiKey(var) => assert_eq!(var, "YOUTUBE_API_KEY"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = MediaConfig::default().with_base_url("not a url");
        assert!(MediaClient::with_config(config).is_err());
    }

    #[tokio::test]
    async fn test_search_video_found() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"items":[{"id":{"videoId":"abc123"},"snippet":{"title":"Soft Idli","channelTitle":"Amma's Kitchen"}}]}"#,
        )
        .await;

        let video = client_for(&base).search_video("Idli").await.unwrap().unwrap();
        assert_eq!(video.id, "abc123");
        assert_eq!(video.channel, "Amma's Kitchen");

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /search?"));
        assert!(request.contains("key=test-key"));
    }

    #[tokio::test]
    async fn test_search_video_no_results() {
        let (base, _server) = serve_once("200 OK", r#"{"items":[]}"#).await;
        let result = client_for(&base).search_video("Kesari").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_forbidden() {
        let (base, _server) = serve_once("403 Forbidden", r#"{"error":{"code":403}}"#).await;
        let err = client_for(&base).search_video("Upma").await.unwrap_err();
        assert!(matches!(err, MediaError::Forbidden));
    }

    #[tokio::test]
    async fn test_server_error() {
        let (base, _server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;
        let err = client_for(&base).search_video("Upma").await.unwrap_err();
        match err {
            MediaError::ApiResponse { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("boom"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
