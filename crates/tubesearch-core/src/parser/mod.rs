//! Parsers for YouTube search responses
//!
//! Contains modules for reading results pages, unwrapping response
//! documents and normalizing individual renderers.

pub mod bootstrap;
pub mod entity;
pub mod response;

pub use bootstrap::{
    extract_bootstrap, extract_estimated_results, extract_playlist_params, Bootstrap,
};
pub use entity::normalize;
pub use response::{unwrap_response, Batch};
