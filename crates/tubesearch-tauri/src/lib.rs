//! YouTube Search Tauri Integration
//!
//! Provides a Tauri plugin for frontend integration with `tubesearch-core`.
//!
//! # Usage
//!
//! Register the plugin in your Tauri application:
//!
//! ```ignore
//! fn main() {
//!     tauri::Builder::default()
//!         .plugin(tubesearch_tauri::init())
//!         .run(tauri::generate_context!())
//!         .expect("error while running tauri application");
//! }
//! ```
//!
//! Then invoke commands from the frontend:
//!
//! ```javascript
//! import { invoke } from '@tauri-apps/api/core';
//!
//! const results = await invoke('plugin:tubesearch|search', {
//!   query: 'lofi hip hop',
//!   options: { limit: 20, type: 'video', safeSearch: true }
//! });
//!
//! await invoke('plugin:tubesearch|clear_session_cache');
//! ```

use std::sync::Arc;

use tauri::{
    plugin::{Builder, TauriPlugin},
    Manager, Runtime,
};
use tubesearch_core::TubeScraper;

mod commands;

/// Shared scraper handed to every command
///
/// `TubeScraper::search` takes `&self`, so concurrent commands share one
/// client (and its rate limiter) without locking.
pub struct ScraperState {
    pub(crate) scraper: Arc<TubeScraper>,
}

impl ScraperState {
    /// Create a new ScraperState with default configuration
    ///
    /// # Errors
    /// Returns error string if scraper initialization fails
    pub fn new() -> Result<Self, String> {
        let scraper = TubeScraper::new().map_err(|e| e.to_string())?;
        Ok(Self {
            scraper: Arc::new(scraper),
        })
    }
}

/// Initialize the tubesearch plugin
///
/// # Returns
/// A configured TauriPlugin ready to be registered with the Tauri application
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::new("tubesearch")
        .invoke_handler(tauri::generate_handler![
            commands::search,
            commands::clear_session_cache
        ])
        .setup(|app, _api| {
            let state = ScraperState::new().map_err(Box::<dyn std::error::Error>::from)?;
            app.manage(state);
            Ok(())
        })
        .build()
}

// Re-export types for convenience
pub use tubesearch_core::{Entity, SearchOptions, SearchResults};

#[cfg(test)]
mod tests {
    use tubesearch_core::{ClientConfig, SessionCache};

    use super::*;

    #[test]
    fn test_scraper_state_creation() {
        let state = ScraperState::new();
        assert!(state.is_ok());
    }

    #[test]
    fn test_scraper_state_shares_session_cache() {
        let scraper =
            TubeScraper::with_session_cache(ClientConfig::default(), SessionCache::new()).unwrap();
        let state = ScraperState {
            scraper: Arc::new(scraper),
        };
        let cache = state.scraper.session_cache();
        cache.set(tubesearch_core::SessionParam::ClientVersion, "2.0");
        state.scraper.clear_session_cache();
        assert!(cache.is_empty());
    }
}
