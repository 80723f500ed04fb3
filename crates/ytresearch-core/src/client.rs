//! HTTP client for the YouTube Data API v3
//!
//! Provides a typed wrapper over the three endpoints the pipeline uses
//! (search, channels, videos), fixed-interval pacing gates to stay under
//! quota burst limits, and a request budget that carries the overall
//! deadline and cancellation signal into pagination and batch loops.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::api::{ChannelListResponse, ChannelResource, SearchListResponse, VideoListResponse, VideoResource};
use crate::error::{ResearchError, Result};

/// Maximum number of IDs accepted by a single batched lookup
pub const BATCH_LIMIT: usize = 50;

/// Page size requested from the search endpoint
pub const SEARCH_PAGE_SIZE: u32 = 50;

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Per-call HTTP timeout in seconds (default: 30)
    pub request_timeout_secs: u64,
    /// Overall budget for one analyze/filter operation in seconds (default: 600)
    pub operation_timeout_secs: u64,
    /// Retry attempts for transient errors (default: 0 — skip and continue)
    pub max_retries: u32,
    /// Delay between successive processed search hits (default: 100 ms)
    pub search_pacing: Duration,
    /// Delay between successive channel analyses (default: 500 ms)
    pub channel_pacing: Duration,
    /// API base URL, overridable for tests
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            operation_timeout_secs: 600,
            max_retries: 0,
            search_pacing: Duration::from_millis(100),
            channel_pacing: Duration::from_millis(500),
            base_url: "https://www.googleapis.com/youtube/v3".to_string(),
        }
    }
}

impl ClientConfig {
    /// Configuration with both pacing gates disabled, for tests.
    pub fn without_pacing(base_url: impl Into<String>) -> Self {
        Self {
            search_pacing: Duration::ZERO,
            channel_pacing: Duration::ZERO,
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Fixed-interval pacing gate
///
/// Ensures successive acquisitions are spaced at least `interval` apart.
/// A zero interval makes the gate a no-op, which tests rely on.
pub struct Pacer {
    interval: Duration,
    last: Arc<Mutex<Instant>>,
}

impl Pacer {
    /// Create a gate with the given minimum spacing between acquisitions
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Arc::new(Mutex::new(Instant::now() - interval)),
        }
    }

    /// Acquire permission to proceed
    ///
    /// Sleeps until the interval since the previous acquisition has elapsed.
    pub async fn acquire(&self) {
        if self.interval.is_zero() {
            return;
        }
        let mut last = self.last.lock().await;
        let elapsed = last.elapsed();
        if elapsed < self.interval {
            sleep(self.interval - elapsed).await;
        }
        *last = Instant::now();
    }

    /// Minimum spacing between acquisitions
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// Deadline and cancellation signal for one operation
///
/// Constructed at the start of an analyze/filter request and checked inside
/// every pagination and batch loop: when the budget is exhausted, remaining
/// iterations are abandoned and whatever was collected so far is returned.
#[derive(Debug, Clone)]
pub struct RequestBudget {
    deadline: Option<Instant>,
    cancel: CancellationToken,
}

impl RequestBudget {
    /// Budget with a deadline `timeout` from now and an external cancel signal
    pub fn new(timeout: Duration, cancel: CancellationToken) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
            cancel,
        }
    }

    /// Budget with no deadline and no external cancellation
    pub fn unlimited() -> Self {
        Self {
            deadline: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Whether the deadline has passed or cancellation was requested
    pub fn is_exhausted(&self) -> bool {
        if self.cancel.is_cancelled() {
            return true;
        }
        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }

    /// The cancellation token carried by this budget
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }
}

/// Parameters for a video-type search against one channel
#[derive(Debug, Clone, Default)]
pub struct VideoSearchQuery {
    /// Only videos published after this instant
    pub published_after: Option<DateTime<Utc>>,
    /// Result ordering (`viewCount` for the top-video query, API default otherwise)
    pub order: Option<&'static str>,
    /// Page size cap; `None` requests the full page of [`SEARCH_PAGE_SIZE`]
    pub max_results: Option<u32>,
}

/// Typed client over the YouTube Data API
///
/// The API key is passed per call, never stored: every inbound request
/// carries its own key and the client is shared across requests.
pub struct YoutubeClient {
    http: reqwest::Client,
    base_url: String,
    max_retries: u32,
    search_pacer: Pacer,
    channel_pacer: Pacer,
    operation_timeout: Duration,
}

impl YoutubeClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(ResearchError::Http)?;

        Ok(Self {
            http,
            base_url: config.base_url,
            max_retries: config.max_retries,
            search_pacer: Pacer::new(config.search_pacing),
            channel_pacer: Pacer::new(config.channel_pacing),
            operation_timeout: Duration::from_secs(config.operation_timeout_secs),
        })
    }

    /// Gate applied between successive processed search hits
    pub fn search_pacer(&self) -> &Pacer {
        &self.search_pacer
    }

    /// Gate applied between successive channel analyses
    pub fn channel_pacer(&self) -> &Pacer {
        &self.channel_pacer
    }

    /// Budget for one operation, honoring the configured overall timeout
    pub fn operation_budget(&self, cancel: CancellationToken) -> RequestBudget {
        RequestBudget::new(self.operation_timeout, cancel)
    }

    /// Fetch one page of channel-type search results
    ///
    /// `region_code` is only sent when a concrete country filter is active
    /// and `relevance_language` only when non-empty; the cursor in the
    /// response drives the caller's pagination loop.
    pub async fn search_channels_page(
        &self,
        api_key: &str,
        query: &str,
        region_code: Option<&str>,
        relevance_language: Option<&str>,
        page_token: Option<&str>,
    ) -> Result<SearchListResponse> {
        let mut params = vec![
            ("part", "id".to_string()),
            ("type", "channel".to_string()),
            ("q", query.to_string()),
            ("maxResults", SEARCH_PAGE_SIZE.to_string()),
            ("key", api_key.to_string()),
        ];
        if let Some(region) = region_code {
            params.push(("regionCode", region.to_string()));
        }
        if let Some(language) = relevance_language
            && !language.is_empty()
        {
            params.push(("relevanceLanguage", language.to_string()));
        }
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }

        self.get_json("/search", &params).await
    }

    /// Fetch one page of video-type search results for a channel
    pub async fn search_videos_page(
        &self,
        api_key: &str,
        channel_id: &str,
        query: &VideoSearchQuery,
        page_token: Option<&str>,
    ) -> Result<SearchListResponse> {
        let max_results = query.max_results.unwrap_or(SEARCH_PAGE_SIZE);
        let mut params = vec![
            ("part", "id".to_string()),
            ("type", "video".to_string()),
            ("channelId", channel_id.to_string()),
            ("maxResults", max_results.to_string()),
            ("key", api_key.to_string()),
        ];
        if let Some(published_after) = query.published_after {
            params.push((
                "publishedAfter",
                published_after.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            ));
        }
        if let Some(order) = query.order {
            params.push(("order", order.to_string()));
        }
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }

        self.get_json("/search", &params).await
    }

    /// Batched channel lookup with the `snippet,statistics` parts
    ///
    /// Callers split ID lists into chunks of at most [`BATCH_LIMIT`].
    pub async fn get_channels(&self, api_key: &str, ids: &[String]) -> Result<Vec<ChannelResource>> {
        debug_assert!(ids.len() <= BATCH_LIMIT);
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let params = vec![
            ("part", "snippet,statistics".to_string()),
            ("id", ids.join(",")),
            ("key", api_key.to_string()),
        ];
        let response: ChannelListResponse = self.get_json("/channels", &params).await?;
        Ok(response.items)
    }

    /// Batched video lookup with the `snippet,statistics,contentDetails` parts
    ///
    /// Callers split ID lists into chunks of at most [`BATCH_LIMIT`].
    pub async fn get_videos(&self, api_key: &str, ids: &[String]) -> Result<Vec<VideoResource>> {
        debug_assert!(ids.len() <= BATCH_LIMIT);
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let params = vec![
            ("part", "snippet,statistics,contentDetails".to_string()),
            ("id", ids.join(",")),
            ("key", api_key.to_string()),
        ];
        let response: VideoListResponse = self.get_json("/videos", &params).await?;
        Ok(response.items)
    }

    /// GET a JSON payload with the retry budget applied
    ///
    /// Retries are off by default (`max_retries = 0`); when enabled they
    /// back off exponentially and only fire on transient failures.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T> {
        let mut last_error: Option<ResearchError> = None;
        let mut attempt = 0;

        while attempt <= self.max_retries {
            match self.do_get(path, params).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    if Self::is_retryable(&e) && attempt < self.max_retries {
                        // Exponential backoff: 1s, 2s, 4s
                        let backoff = Duration::from_secs(1 << attempt);
                        sleep(backoff).await;
                        last_error = Some(e);
                        attempt += 1;
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(last_error.unwrap_or(ResearchError::RateLimited))
    }

    async fn do_get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(ResearchError::Http)?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ResearchError::RateLimited);
        }

        let response = response.error_for_status().map_err(ResearchError::Http)?;
        response.json::<T>().await.map_err(ResearchError::Http)
    }

    fn is_retryable(error: &ResearchError) -> bool {
        match error {
            ResearchError::RateLimited => true,
            ResearchError::Http(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.status().map(|s| s.is_server_error()).unwrap_or(false)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pacer_interval() {
        let pacer = Pacer::new(Duration::from_millis(100));
        assert_eq!(pacer.interval(), Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_pacer_spaces_acquisitions() {
        let pacer = Pacer::new(Duration::from_millis(50));

        let start = Instant::now();
        pacer.acquire().await;
        pacer.acquire().await;
        let elapsed = start.elapsed();

        // Second acquire should wait at least the interval, minus tolerance
        assert!(elapsed >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn test_zero_interval_pacer_is_noop() {
        let pacer = Pacer::new(Duration::ZERO);

        let start = Instant::now();
        for _ in 0..100 {
            pacer.acquire().await;
        }
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.search_pacing, Duration::from_millis(100));
        assert_eq!(config.channel_pacing, Duration::from_millis(500));
    }

    #[test]
    fn test_client_creation() {
        let client = YoutubeClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_with_custom_config() {
        let config = ClientConfig {
            request_timeout_secs: 5,
            max_retries: 2,
            ..ClientConfig::default()
        };
        let client = YoutubeClient::with_config(config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_budget_unlimited_never_exhausted() {
        let budget = RequestBudget::unlimited();
        assert!(!budget.is_exhausted());
    }

    #[test]
    fn test_budget_expired_deadline() {
        let budget = RequestBudget::new(Duration::ZERO, CancellationToken::new());
        assert!(budget.is_exhausted());
    }

    #[test]
    fn test_budget_cancellation() {
        let token = CancellationToken::new();
        let budget = RequestBudget::new(Duration::from_secs(60), token.clone());
        assert!(!budget.is_exhausted());
        token.cancel();
        assert!(budget.is_exhausted());
    }
}
