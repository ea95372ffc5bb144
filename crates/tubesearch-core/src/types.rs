//! Core data types for the YouTube search library
//!
//! Contains the result entities, the search options accepted by
//! [`crate::TubeScraper::search`] and the aggregated result envelope.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Number of results returned when the caller does not ask for a valid amount
pub const DEFAULT_LIMIT: usize = 10;

/// Single image variant of a thumbnail or avatar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// Channel that uploaded a video or owns a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Display name of the channel
    pub name: String,

    /// Channel ID (e.g., "UCuAXFkgsw1L7xaCfnd5JJOw"), empty when unknown
    pub id: String,

    /// Link to the channel page
    pub url: String,

    /// Avatar variants, widest first
    pub avatars: Vec<Thumbnail>,

    /// Badge labels shown next to the channel name
    pub badges: Vec<String>,

    /// Whether the channel carries a verification badge
    pub verified: bool,
}

/// Video search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// 11-character video ID (e.g., "dQw4w9WgXcQ")
    pub id: String,

    pub title: String,

    /// Full watch URL
    pub url: String,

    /// Thumbnail variants, widest first
    pub thumbnails: Vec<Thumbnail>,

    /// Currently streaming
    pub live: bool,

    /// Scheduled premiere or stream that has not started yet
    pub upcoming: bool,

    /// Badge labels such as "New" or "4K"
    pub badges: Vec<String>,

    pub author: Option<Author>,

    /// Snippet of the description shown in search results
    pub description: String,

    /// View count, `None` when the platform shows no count
    pub views: Option<u64>,

    /// Duration as displayed (e.g., "3:33"), `None` for live streams
    pub duration: Option<String>,

    /// Relative upload time as displayed (e.g., "2 years ago")
    pub uploaded_at: Option<String>,
}

impl Video {
    /// Checks that the fields the rest of the library relies on are populated
    pub fn is_consistent(&self) -> bool {
        is_url_safe_id(&self.id) && !self.title.is_empty()
    }
}

/// Platform IDs are drawn from the URL-safe base64 alphabet
fn is_url_safe_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Playlist search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Playlist ID (e.g., "PLFgquLnL59alCl_2TQvOiD5Vgm1hCaGSI")
    pub id: String,

    pub title: String,

    /// Full playlist URL
    pub url: String,

    /// Thumbnail variants, widest first
    pub thumbnails: Vec<Thumbnail>,

    pub owner: Option<Author>,

    /// Relative publish/update time as displayed, if any
    pub published_at: Option<String>,

    /// Number of videos in the playlist
    pub video_count: u64,
}

impl Playlist {
    /// Checks that the fields the rest of the library relies on are populated
    pub fn is_consistent(&self) -> bool {
        is_url_safe_id(&self.id) && !self.title.is_empty()
    }
}

/// Kind of result a search asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    Video,
    Playlist,
}

impl SearchType {
    /// Parses a type name, falling back to [`SearchType::Video`] for anything unknown
    pub fn from_lossy(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "playlist" => SearchType::Playlist,
            _ => SearchType::Video,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Video => "video",
            SearchType::Playlist => "playlist",
        }
    }
}

impl<'de> Deserialize<'de> for SearchType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value.as_str().map(Self::from_lossy).unwrap_or_default())
    }
}

/// Normalized search result, tagged by `type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entity {
    Video(Video),
    Playlist(Playlist),
}

impl Entity {
    pub fn kind(&self) -> SearchType {
        match self {
            Entity::Video(_) => SearchType::Video,
            Entity::Playlist(_) => SearchType::Playlist,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Entity::Video(video) => &video.id,
            Entity::Playlist(playlist) => &playlist.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Entity::Video(video) => &video.title,
            Entity::Playlist(playlist) => &playlist.title,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Entity::Video(video) => &video.url,
            Entity::Playlist(playlist) => &playlist.url,
        }
    }
}

/// Options accepted by [`crate::TubeScraper::search`]
///
/// Deserialization is lenient so frontends can pass loosely-typed values:
/// a non-positive or non-numeric `limit` becomes [`DEFAULT_LIMIT`] and an
/// unknown `type` becomes [`SearchType::Video`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchOptions {
    /// Maximum number of results (default: 10)
    #[serde(deserialize_with = "lenient_limit")]
    pub limit: usize,

    /// Ask the platform to filter restricted content (default: false)
    pub safe_search: bool,

    /// Result kind (default: video)
    #[serde(rename = "type")]
    pub search_type: SearchType,

    /// Interface language (default: "en")
    pub hl: String,

    /// Content region (default: "US")
    pub gl: String,

    /// Client UTC offset in minutes (default: 0)
    pub utc_offset_minutes: i32,

    /// Extra request headers passed through to the transport
    pub headers: BTreeMap<String, String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            safe_search: false,
            search_type: SearchType::Video,
            hl: "en".to_string(),
            gl: "US".to_string(),
            utc_offset_minutes: 0,
            headers: BTreeMap::new(),
        }
    }
}

impl SearchOptions {
    /// Limit with zero coerced to [`DEFAULT_LIMIT`]
    pub fn effective_limit(&self) -> usize {
        if self.limit == 0 {
            DEFAULT_LIMIT
        } else {
            self.limit
        }
    }
}

fn lenient_limit<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let number = match &value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    Ok(match number {
        Some(n) if n.is_finite() && n >= 1.0 => n.floor() as usize,
        _ => DEFAULT_LIMIT,
    })
}

/// Aggregated outcome of one search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Query term as sent to the platform
    pub query: String,

    /// Normalized entities, never more than the requested limit
    pub items: Vec<Entity>,

    /// Platform's own estimate of the total number of matches
    pub results: u64,
}
