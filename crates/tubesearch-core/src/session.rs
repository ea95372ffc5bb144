//! Cache of volatile session parameters
//!
//! The platform rotates its web client version and the filter string that
//! restricts a search to playlists. Both are scraped from results pages and
//! remembered here so later searches can go straight to the JSON endpoint.
//! Values never expire on their own; the retry loop in
//! [`crate::TubeScraper`] clears them when a request built from them fails.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock};

/// Parameters remembered between searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionParam {
    /// Web client version sent in the request context
    ClientVersion,
    /// `params` value that restricts a search to playlists
    PlaylistParams,
}

impl SessionParam {
    pub const ALL: [SessionParam; 2] = [SessionParam::ClientVersion, SessionParam::PlaylistParams];
}

static GLOBAL: LazyLock<SessionCache> = LazyLock::new(SessionCache::new);

/// Shared handle to a session parameter map
///
/// Cloning is cheap and every clone sees the same values. Individual keys
/// are replaced atomically; concurrent writers simply overwrite each other.
#[derive(Debug, Clone, Default)]
pub struct SessionCache {
    values: Arc<RwLock<HashMap<SessionParam, String>>>,
}

impl SessionCache {
    /// Create an empty, isolated cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache used by scrapers that were not given their own
    pub fn global() -> Self {
        GLOBAL.clone()
    }

    pub fn get(&self, key: SessionParam) -> Option<String> {
        let values = self.values.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        values.get(&key).cloned()
    }

    pub fn set(&self, key: SessionParam, value: impl Into<String>) {
        let mut values = self.values.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        values.insert(key, value.into());
    }

    pub fn clear(&self) {
        let mut values = self.values.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        values.clear();
    }

    /// True when every [`SessionParam`] has a value
    pub fn contains_all(&self) -> bool {
        let values = self.values.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        SessionParam::ALL.iter().all(|key| values.contains_key(key))
    }

    pub fn is_empty(&self) -> bool {
        let values = self.values.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        values.is_empty()
    }
}
