//! Outbound request construction
//!
//! Turns a query and [`SearchOptions`] into a [`SearchRequest`] and builds
//! the JSON bodies the search endpoint expects.

use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use serde::Serialize;

use crate::client::{parse_headers, CONSENT_COOKIE};
use crate::error::{Result, TubeSearchError};
use crate::types::{SearchOptions, SearchType};
use crate::url::{build_results_path, parse_results_url, search_params};

/// Client version sent when none could be scraped or cached
pub const DEFAULT_CLIENT_VERSION: &str = "2.20240726.00.00";

/// Filter restricting a search to playlists, used when none could be scraped
pub const PLAYLIST_FILTER_PARAMS: &str = "EgIQAw%3D%3D";

/// Preference cookie that turns on restricted mode for the results page
const SAFE_SEARCH_COOKIE: &str = "PREF=f2=8000000";

/// `context.client` of an API request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub utc_offset_minutes: i32,
    pub gl: String,
    pub hl: String,
    pub client_name: &'static str,
    pub client_version: String,
}

/// `context.user` of an API request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_safety_mode: Option<bool>,
}

/// `context` object sent with every API request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestContext {
    pub client: ClientInfo,
    pub user: UserInfo,
}

/// Body of a first-page search: `{context, params?, query}`
#[derive(Debug, Serialize)]
pub struct SearchBody<'a> {
    pub context: &'a RequestContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<&'a str>,
    pub query: &'a str,
}

/// Body of a follow-up page: `{context, continuation}`
#[derive(Debug, Serialize)]
pub struct ContinuationBody<'a> {
    pub context: &'a RequestContext,
    pub continuation: &'a str,
}

/// Validated input of one search
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Search term sent to the platform
    pub query: String,
    pub search_type: SearchType,
    /// Maximum number of results, always at least one
    pub limit: usize,
    pub safe_search: bool,
    pub hl: String,
    pub gl: String,
    pub utc_offset_minutes: i32,
    /// `sp` filter from a results-page URL
    pub filter: Option<String>,
    /// Query parameters of the results page
    pub page_params: Vec<(String, String)>,
    /// Caller headers sent with every request
    pub headers: HeaderMap,
}

impl SearchRequest {
    /// Validates the query and resolves options
    ///
    /// # Errors
    /// - `InvalidQuery` if the query is empty, or is a results URL without a search term
    /// - `InvalidHeader` if a caller header cannot be sent
    pub fn new(query: &str, options: &SearchOptions) -> Result<Self> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(TubeSearchError::InvalidQuery(
                "Search query cannot be empty".to_string(),
            ));
        }

        let headers = parse_headers(&options.headers)?;

        let (query, filter, page_params) = match parse_results_url(trimmed)? {
            Some(results_url) => (
                results_url.search_query,
                results_url.filter,
                results_url.params,
            ),
            None => (
                trimmed.to_string(),
                None,
                search_params(trimmed, None, &options.hl, &options.gl),
            ),
        };

        Ok(Self {
            query,
            search_type: options.search_type,
            limit: options.effective_limit(),
            safe_search: options.safe_search,
            hl: options.hl.clone(),
            gl: options.gl.clone(),
            utc_offset_minutes: options.utc_offset_minutes,
            filter,
            page_params,
            headers,
        })
    }

    /// Path of the results page for this search
    pub fn page_path(&self) -> String {
        build_results_path(&self.page_params)
    }

    /// Headers for the results page, with the restricted-mode cookie when safe search is on
    pub fn page_headers(&self) -> HeaderMap {
        let mut headers = self.headers.clone();
        if self.safe_search {
            let base = headers
                .get(COOKIE)
                .and_then(|value| value.to_str().ok())
                .unwrap_or(CONSENT_COOKIE)
                .to_string();
            if let Ok(value) = HeaderValue::from_str(&format!("{}; {}", base, SAFE_SEARCH_COOKIE)) {
                headers.insert(COOKIE, value);
            }
        }
        headers
    }

    /// Request context for the given client version
    pub fn context(&self, client_version: &str) -> RequestContext {
        RequestContext {
            client: ClientInfo {
                utc_offset_minutes: self.utc_offset_minutes,
                gl: self.gl.clone(),
                hl: self.hl.clone(),
                client_name: "WEB",
                client_version: client_version.to_string(),
            },
            user: UserInfo {
                enable_safety_mode: self.safe_search.then_some(true),
            },
        }
    }
}
