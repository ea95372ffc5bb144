//! Tauri commands for the YouTube search plugin

use tauri::State;
use tubesearch_core::{SearchOptions, SearchResults};

use crate::ScraperState;

/// Search YouTube for videos or playlists
///
/// # Arguments
/// * `state` - Managed ScraperState from Tauri
/// * `query` - Search term or results-page URL
/// * `options` - Optional search options; missing fields use defaults
///
/// # Returns
/// Aggregated search results
///
/// # Errors
/// Returns error message as String if the search fails
#[tauri::command]
pub async fn search(
    state: State<'_, ScraperState>,
    query: String,
    options: Option<SearchOptions>,
) -> Result<SearchResults, String> {
    let options = options.unwrap_or_default();
    state
        .scraper
        .search(&query, &options)
        .await
        .map_err(|e| e.to_string())
}

/// Drop cached session parameters so the next search re-reads them
#[tauri::command]
pub fn clear_session_cache(state: State<'_, ScraperState>) {
    state.scraper.clear_session_cache();
}
