//! HTTP client with rate limiting and retry logic for YouTube
//!
//! Provides a rate-limited HTTP client that respects server limits,
//! implements exponential backoff for transient errors and injects the
//! consent cookie YouTube expects from anonymous visitors.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT_LANGUAGE, COOKIE};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::error::{Result, TubeSearchError};

const DEFAULT_BASE_URL: &str = "https://www.youtube.com";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Cookie sent when the caller does not provide one; skips the consent interstitial
pub const CONSENT_COOKIE: &str = "CONSENT=YES+1";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Maximum requests per second (default: 2.0)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Maximum retry attempts for transient errors (default: 3)
    pub max_retries: u32,
    /// Origin every request path is resolved against (default: https://www.youtube.com)
    pub base_url: String,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 2.0,
            timeout_secs: 30,
            max_retries: 3,
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Rate limiter to control request frequency
///
/// Ensures requests are spaced at least `min_interval` apart.
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified requests per second
    ///
    /// # Arguments
    /// * `requests_per_second` - Maximum number of requests allowed per second.
    ///   Zero, negative or non-finite values disable spacing.
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = if requests_per_second.is_finite() && requests_per_second > 0.0 {
            Duration::try_from_secs_f64(1.0 / requests_per_second).unwrap_or_default()
        } else {
            Duration::ZERO
        };
        let now = Instant::now();
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(now.checked_sub(min_interval).unwrap_or(now))),
        }
    }

    /// Acquire permission to make a request
    ///
    /// If called before the minimum interval has passed since the last request,
    /// this method will sleep until the interval has elapsed.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();

        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }

        *last = Instant::now();
    }

    /// Get the minimum interval between requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// HTTP client wrapper with rate limiting and retry logic
///
/// Handles all HTTP communication with YouTube, including:
/// - Rate limiting to avoid overwhelming the server
/// - Automatic retries with exponential backoff for transient errors
/// - Consent cookie injection when the caller sends no cookie
pub struct TubeClient {
    client: reqwest::Client,
    rate_limiter: RateLimiter,
    max_retries: u32,
    base_url: String,
}

impl TubeClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// - `InvalidUrl` - `base_url` is not an absolute URL
    /// - `InvalidConfig` - `requests_per_second` is not a positive finite number
    /// - `HttpError` - the underlying client could not be built
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        if !(config.requests_per_second.is_finite() && config.requests_per_second > 0.0) {
            return Err(TubeSearchError::InvalidConfig(format!(
                "requests_per_second must be positive, got {}",
                config.requests_per_second
            )));
        }
        reqwest::Url::parse(&config.base_url)
            .map_err(|e| TubeSearchError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent)
            .cookie_store(true)
            .default_headers(headers)
            .build()
            .map_err(TubeSearchError::HttpError)?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(config.requests_per_second),
            max_retries: config.max_retries,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch a page as text with a GET request
    ///
    /// # Arguments
    /// * `path` - Path and query relative to the base URL (e.g., "/results?search_query=x")
    /// * `headers` - Caller headers, sent in addition to the defaults
    ///
    /// # Errors
    /// - `HttpError` - Network or HTTP errors
    /// - `RateLimited` - Server returned 429 after all retries exhausted
    pub async fn fetch_text(&self, path: &str, headers: &HeaderMap) -> Result<String> {
        let url = self.url_for(path);
        let headers = with_consent(headers);

        tracing::debug!(%url, "fetching page");
        let response = self
            .send_with_retry(|| self.client.get(&url).headers(headers.clone()))
            .await?;

        response.text().await.map_err(TubeSearchError::HttpError)
    }

    /// POST a JSON body and decode the JSON response
    ///
    /// # Errors
    /// - `HttpError` - Network or HTTP errors
    /// - `JsonError` - Response body is not JSON
    /// - `RateLimited` - Server returned 429 after all retries exhausted
    pub async fn fetch_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        headers: &HeaderMap,
    ) -> Result<Value> {
        let url = self.url_for(path);
        let headers = with_consent(headers);

        tracing::debug!(%url, "posting api request");
        let response = self
            .send_with_retry(|| self.client.post(&url).headers(headers.clone()).json(body))
            .await?;

        let text = response.text().await.map_err(TubeSearchError::HttpError)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request, retrying transient failures with exponential backoff
    async fn send_with_retry<F>(&self, build: F) -> Result<reqwest::Response>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut attempt = 0;

        loop {
            self.rate_limiter.acquire().await;

            match Self::send_once(build()).await {
                Ok(response) => return Ok(response),
                Err(e) if Self::is_retryable(&e) && attempt < self.max_retries => {
                    // Exponential backoff: 1s, 2s, 4s
                    let backoff = Duration::from_secs(1 << attempt);
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %e,
                        "retrying request"
                    );
                    sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Perform a single request and map error statuses
    async fn send_once(request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await.map_err(TubeSearchError::HttpError)?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TubeSearchError::RateLimited);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(TubeSearchError::NotFound(response.url().to_string()));
        }

        if status.is_server_error() {
            return match response.error_for_status() {
                Err(e) => Err(TubeSearchError::HttpError(e)),
                Ok(response) => Ok(response),
            };
        }

        if !status.is_success() {
            return Err(TubeSearchError::UnexpectedResponse(format!(
                "HTTP {} from {}",
                status,
                response.url()
            )));
        }

        Ok(response)
    }

    /// Check if an error is retryable
    fn is_retryable(error: &TubeSearchError) -> bool {
        match error {
            TubeSearchError::RateLimited => true,
            TubeSearchError::HttpError(e) => {
                // Retry on timeout, connection errors, or 5xx status codes
                e.is_timeout()
                    || e.is_connect()
                    || e.status().map(|s| s.is_server_error()).unwrap_or(false)
            }
            _ => false,
        }
    }
}

/// Copy caller headers, adding the consent cookie when no cookie was given
fn with_consent(headers: &HeaderMap) -> HeaderMap {
    let mut headers = headers.clone();
    if !headers.contains_key(COOKIE) {
        headers.insert(COOKIE, HeaderValue::from_static(CONSENT_COOKIE));
    }
    headers
}

/// Convert loosely-typed caller headers into a [`HeaderMap`]
///
/// # Errors
/// Returns `InvalidHeader` if a name or value cannot be sent over HTTP
pub fn parse_headers<'a, I>(pairs: I) -> Result<HeaderMap>
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| TubeSearchError::InvalidHeader(format!("bad name {:?}", name)))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| TubeSearchError::InvalidHeader(format!("bad value for {}", name)))?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}
