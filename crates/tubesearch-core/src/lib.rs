//! YouTube Search Core Library
//!
//! Provides an async API for anonymous YouTube searches returning typed
//! video and playlist results.
//!
//! # Overview
//!
//! This crate provides a complete search pipeline with:
//! - Rate-limited HTTP client with consent-cookie handling
//! - Extraction of the data embedded in results pages
//! - Unwrapping and normalization of the platform's renderer objects
//! - Continuation-token pagination up to a requested limit
//! - A session cache of volatile client parameters with retry-driven invalidation
//!
//! # Example
//!
//! ```no_run
//! use tubesearch_core::{Entity, SearchOptions, SearchType, TubeScraper, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = TubeScraper::new()?;
//!
//!     let options = SearchOptions {
//!         limit: 25,
//!         search_type: SearchType::Video,
//!         ..Default::default()
//!     };
//!     let results = scraper.search("never gonna give you up", &options).await?;
//!
//!     println!("about {} matches", results.results);
//!     for item in &results.items {
//!         if let Entity::Video(video) = item {
//!             println!("{} [{}] {}", video.title, video.duration.as_deref().unwrap_or("live"), video.url);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Session cache
//!
//! The web client version and the playlist filter change over time. Both are
//! scraped from results pages and kept in a [`SessionCache`] shared by every
//! [`TubeScraper`] in the process (unless one is given its own). When a
//! search attempt fails, the second attempt starts from an empty cache.

mod client;
mod error;
pub mod pagination;
pub mod parser;
pub mod request;
mod scraper;
mod session;
mod types;
pub mod url;

// Re-export client types
pub use client::{ClientConfig, RateLimiter, TubeClient};

// Re-export error types
pub use error::{Result, TubeSearchError};

// Re-export parser functions
pub use parser::{extract_bootstrap, normalize, unwrap_response, Batch, Bootstrap};

// Re-export main scraper API
pub use scraper::{TubeScraper, MAX_ATTEMPTS};

// Re-export session cache
pub use session::{SessionCache, SessionParam};

// Re-export data types
pub use types::{
    Author, Entity, Playlist, SearchOptions, SearchResults, SearchType, Thumbnail, Video,
    DEFAULT_LIMIT,
};
