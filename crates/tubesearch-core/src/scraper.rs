//! Main search API for YouTube
//!
//! Provides the high-level API combining the HTTP client, the session
//! cache and the parsers.

use serde_json::Value;

use crate::client::{ClientConfig, TubeClient};
use crate::error::{Result, TubeSearchError};
use crate::pagination::{collect_matching, walk};
use crate::parser::{
    extract_bootstrap, extract_estimated_results, extract_playlist_params, unwrap_response,
};
use crate::request::{SearchBody, SearchRequest, DEFAULT_CLIENT_VERSION, PLAYLIST_FILTER_PARAMS};
use crate::session::{SessionCache, SessionParam};
use crate::types::{SearchOptions, SearchResults, SearchType};
use crate::url::SEARCH_API_PATH;

/// Number of times a search is tried before giving up
pub const MAX_ATTEMPTS: u32 = 3;

/// Main search API for YouTube
///
/// Combines the rate-limited HTTP client with a [`SessionCache`] so that
/// repeated searches can skip the results page and talk to the JSON
/// endpoint directly.
pub struct TubeScraper {
    client: TubeClient,
    session: SessionCache,
}

impl TubeScraper {
    /// Create a new scraper with default configuration and the process-wide session cache
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new scraper with custom client configuration and the process-wide session cache
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_session_cache(config, SessionCache::global())
    }

    /// Create a new scraper that keeps its session parameters in `session`
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn with_session_cache(config: ClientConfig, session: SessionCache) -> Result<Self> {
        let client = TubeClient::with_config(config)?;
        Ok(Self { client, session })
    }

    /// Session cache used by this scraper
    pub fn session_cache(&self) -> &SessionCache {
        &self.session
    }

    /// Forget every cached session parameter
    pub fn clear_session_cache(&self) {
        self.session.clear();
    }

    /// Search for videos or playlists
    ///
    /// # Arguments
    /// * `query` - Search term, or a full results-page URL whose parameters are reused
    /// * `options` - Limit, result type, locale and safe-search settings
    ///
    /// # Returns
    /// At most `options.limit` entities of the requested type. Zero matches
    /// is a successful, empty result.
    ///
    /// # Errors
    /// - `InvalidQuery` if the query is empty or a results URL lacks a search term
    /// - `InvalidHeader` if a caller header cannot be sent
    /// - `Exhausted` if no attempt produced usable data
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> tubesearch_core::Result<()> {
    /// use tubesearch_core::{SearchOptions, TubeScraper};
    /// let scraper = TubeScraper::new()?;
    /// let results = scraper.search("lofi hip hop", &SearchOptions::default()).await?;
    /// for item in &results.items {
    ///     println!("{}: {}", item.title(), item.url());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search(&self, query: &str, options: &SearchOptions) -> Result<SearchResults> {
        let request = SearchRequest::new(query, options)?;

        for attempt in 1..=MAX_ATTEMPTS {
            if attempt == 2 {
                // Cached values may be what made the first attempt fail
                self.session.clear();
                tracing::debug!("session cache cleared");
            }

            match self.attempt(&request).await {
                Ok(Some(results)) => {
                    tracing::debug!(
                        attempt,
                        query = %request.query,
                        items = results.items.len(),
                        "search finished"
                    );
                    return Ok(results);
                }
                Ok(None) => {
                    tracing::warn!(attempt, query = %request.query, "no usable search data")
                }
                Err(e) => {
                    tracing::warn!(attempt, query = %request.query, error = %e, "search attempt failed")
                }
            }
        }

        Err(TubeSearchError::Exhausted {
            attempts: MAX_ATTEMPTS,
        })
    }

    /// Search for videos, the most common case
    ///
    /// # Errors
    /// Same as [`TubeScraper::search`]
    pub async fn search_videos(&self, query: &str, limit: usize) -> Result<SearchResults> {
        let options = SearchOptions {
            limit,
            ..Default::default()
        };
        self.search(query, &options).await
    }

    /// Search for playlists
    ///
    /// # Errors
    /// Same as [`TubeScraper::search`]
    pub async fn search_playlists(&self, query: &str, limit: usize) -> Result<SearchResults> {
        let options = SearchOptions {
            limit,
            search_type: SearchType::Playlist,
            ..Default::default()
        };
        self.search(query, &options).await
    }

    /// Run one search attempt
    ///
    /// Returns `Ok(None)` when no recognizable document was obtained.
    async fn attempt(&self, request: &SearchRequest) -> Result<Option<SearchResults>> {
        let mut seed: Option<Value> = None;

        // Restricted mode needs the page's cookie-driven preference, so it never uses the shortcut
        if !request.safe_search && self.session.contains_all() {
            tracing::debug!("session cache warm, skipping results page");
        } else {
            let html = self
                .client
                .fetch_text(&request.page_path(), &request.page_headers())
                .await?;
            let bootstrap = extract_bootstrap(&html);

            if let Some(version) = &bootstrap.client_version {
                self.session.set(SessionParam::ClientVersion, version.as_str());
            }
            if let Some(params) = bootstrap.seed.as_ref().and_then(extract_playlist_params) {
                self.session.set(SessionParam::PlaylistParams, params);
            }
            if bootstrap.seed.is_none() {
                tracing::debug!("results page had no embedded data");
            }
            seed = bootstrap.seed;
        }

        let client_version = self
            .session
            .get(SessionParam::ClientVersion)
            .unwrap_or_else(|| DEFAULT_CLIENT_VERSION.to_string());
        let context = request.context(&client_version);

        let document = match (request.search_type, seed) {
            (SearchType::Playlist, _) => {
                let params = self
                    .session
                    .get(SessionParam::PlaylistParams)
                    .unwrap_or_else(|| PLAYLIST_FILTER_PARAMS.to_string());
                let body = SearchBody {
                    context: &context,
                    params: Some(&params),
                    query: &request.query,
                };
                self.client
                    .fetch_json(SEARCH_API_PATH, &body, &request.headers)
                    .await?
            }
            (SearchType::Video, Some(seed)) if !request.safe_search => seed,
            (SearchType::Video, _) => {
                let body = SearchBody {
                    context: &context,
                    params: request.filter.as_deref(),
                    query: &request.query,
                };
                self.client
                    .fetch_json(SEARCH_API_PATH, &body, &request.headers)
                    .await?
            }
        };

        let Some(batch) = unwrap_response(&document) else {
            return Ok(None);
        };

        let mut items = collect_matching(&batch.items, request.search_type, request.limit);
        let remaining = request.limit - items.len();

        if remaining > 0
            && let Some(token) = batch.continuation
        {
            let more = walk(
                &self.client,
                &context,
                &request.headers,
                token,
                request.search_type,
                remaining,
            )
            .await;
            items.extend(more);
        }

        Ok(Some(SearchResults {
            query: request.query.clone(),
            items,
            results: extract_estimated_results(&document),
        }))
    }
}
