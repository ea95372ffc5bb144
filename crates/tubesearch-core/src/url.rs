//! URL helper functions for YouTube
//!
//! Provides builders for watch, playlist, channel and results-page URLs
//! and a parser for results-page URLs pasted in place of a query.

use crate::error::{Result, TubeSearchError};

/// Public origin used for links placed into results
pub const BASE_URL: &str = "https://www.youtube.com";

/// Path of the JSON search endpoint, relative to the transport's base URL
pub const SEARCH_API_PATH: &str = "/youtubei/v1/search?prettyPrint=false";

/// Builds the watch URL for a video ID
///
/// # Example
/// ```
/// use tubesearch_core::url::build_video_url;
/// let url = build_video_url("dQw4w9WgXcQ");
/// assert_eq!(url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
/// ```
pub fn build_video_url(id: &str) -> String {
    format!("{}/watch?v={}", BASE_URL, id)
}

/// Builds the playlist URL for a playlist ID
///
/// # Example
/// ```
/// use tubesearch_core::url::build_playlist_url;
/// let url = build_playlist_url("PL123");
/// assert_eq!(url, "https://www.youtube.com/playlist?list=PL123");
/// ```
pub fn build_playlist_url(id: &str) -> String {
    format!("{}/playlist?list={}", BASE_URL, id)
}

/// Builds the channel URL for a channel ID
pub fn build_channel_url(id: &str) -> String {
    format!("{}/channel/{}", BASE_URL, id)
}

/// Resolves a path such as "/@handle" or an absolute URL against [`BASE_URL`]
pub fn absolutize(path_or_url: &str) -> String {
    if path_or_url.starts_with("http://") || path_or_url.starts_with("https://") {
        path_or_url.to_string()
    } else if let Some(rest) = path_or_url.strip_prefix("//") {
        format!("https://{}", rest)
    } else {
        format!("{}/{}", BASE_URL, path_or_url.trim_start_matches('/'))
    }
}

/// Query parameters for a plain search of the results page
///
/// # Arguments
/// * `query` - Search term
/// * `filter` - Optional `sp` filter parameter
/// * `hl` - Interface language
/// * `gl` - Content region
pub fn search_params(query: &str, filter: Option<&str>, hl: &str, gl: &str) -> Vec<(String, String)> {
    let mut params = vec![("search_query".to_string(), query.to_string())];
    if let Some(sp) = filter {
        params.push(("sp".to_string(), sp.to_string()));
    }
    params.push(("hl".to_string(), hl.to_string()));
    params.push(("gl".to_string(), gl.to_string()));
    params
}

/// Builds the results-page path with every parameter URL encoded
///
/// # Example
/// ```
/// use tubesearch_core::url::build_results_path;
/// let params = vec![("search_query".to_string(), "lofi beats".to_string())];
/// assert_eq!(build_results_path(&params), "/results?search_query=lofi%20beats");
/// ```
pub fn build_results_path(params: &[(String, String)]) -> String {
    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("/results?{}", query)
}

/// Results-page URL supplied by the caller in place of a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsUrl {
    /// Value of `search_query`
    pub search_query: String,

    /// Value of `sp`, if the URL carries a prebuilt filter
    pub filter: Option<String>,

    /// Every query parameter, decoded, in original order
    pub params: Vec<(String, String)>,
}

/// Parses a YouTube results-page URL
///
/// # Returns
/// `Ok(None)` when the input is not a results-page URL and should be
/// searched as plain text.
///
/// # Errors
/// Returns `InvalidQuery` when the URL is a results page without a
/// non-empty `search_query` parameter.
pub fn parse_results_url(input: &str) -> Result<Option<ResultsUrl>> {
    let trimmed = input.trim();
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Ok(None);
    }

    let Ok(url) = reqwest::Url::parse(trimmed) else {
        return Ok(None);
    };

    let is_youtube = url
        .host_str()
        .map(|host| host == "youtube.com" || host.ends_with(".youtube.com"))
        .unwrap_or(false);
    if !is_youtube || url.path() != "/results" {
        return Ok(None);
    }

    let params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let search_query = params
        .iter()
        .find(|(key, _)| key == "search_query")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            TubeSearchError::InvalidQuery(format!("results URL has no search term: {}", trimmed))
        })?;

    let filter = params
        .iter()
        .find(|(key, _)| key == "sp")
        .map(|(_, value)| value.clone());

    Ok(Some(ResultsUrl {
        search_query,
        filter,
        params,
    }))
}
