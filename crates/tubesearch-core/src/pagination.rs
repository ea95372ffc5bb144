//! Continuation walking
//!
//! Follow-up pages are requested one at a time, since each token is only
//! known once the previous page has been unwrapped. A page that fails to
//! load ends the walk; whatever was collected so far is kept.

use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::client::TubeClient;
use crate::parser::{normalize, unwrap_response};
use crate::request::{ContinuationBody, RequestContext};
use crate::types::{Entity, SearchType};
use crate::url::SEARCH_API_PATH;

/// Upper bound on follow-up requests for one search
///
/// Guards against a server that keeps returning tokens with no matching items.
pub const MAX_CONTINUATION_PAGES: usize = 50;

/// Normalizes raw renderers, keeping at most `limit` entities of the requested kind
pub fn collect_matching(raw: &[Value], search_type: SearchType, limit: usize) -> Vec<Entity> {
    raw.iter()
        .filter_map(normalize)
        .filter(|entity| entity.kind() == search_type)
        .take(limit)
        .collect()
}

/// Follows continuation tokens until `remaining` entities were collected
///
/// # Arguments
/// * `client` - Transport used for the follow-up requests
/// * `context` - Request context of the search being continued
/// * `headers` - Caller headers
/// * `token` - Continuation token of the page already consumed
/// * `search_type` - Kind of entity to keep
/// * `remaining` - Number of entities still wanted
///
/// # Returns
/// Entities from the follow-up pages, in page order. Never errors; a failed
/// page simply ends the walk.
pub async fn walk(
    client: &TubeClient,
    context: &RequestContext,
    headers: &HeaderMap,
    token: String,
    search_type: SearchType,
    mut remaining: usize,
) -> Vec<Entity> {
    let mut collected = Vec::new();
    let mut next = Some(token);
    let mut pages = 0;

    while let Some(token) = next.take() {
        if remaining == 0 {
            break;
        }
        if pages == MAX_CONTINUATION_PAGES {
            tracing::warn!(pages, remaining, "continuation page limit reached");
            break;
        }
        pages += 1;

        let body = ContinuationBody {
            context,
            continuation: &token,
        };
        let document = match client.fetch_json(SEARCH_API_PATH, &body, headers).await {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(page = pages, error = %e, "continuation request failed");
                break;
            }
        };

        let Some(batch) = unwrap_response(&document) else {
            tracing::warn!(page = pages, "unrecognized continuation response");
            break;
        };

        let entities = collect_matching(&batch.items, search_type, remaining);
        remaining -= entities.len();
        tracing::debug!(page = pages, kept = entities.len(), remaining, "continuation page");

        collected.extend(entities);
        next = batch.continuation;
    }

    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn video(id: &str) -> Value {
        json!({"videoRenderer": {"videoId": id, "title": {"simpleText": format!("Video {}", id)}}})
    }

    fn playlist(id: &str) -> Value {
        json!({"playlistRenderer": {"playlistId": id, "title": {"simpleText": "List"}}})
    }

    #[test]
    fn test_collect_matching_filters_kind() {
        let raw = vec![video("a"), playlist("PL1"), video("b"), json!({"shelfRenderer": {}})];

        let videos = collect_matching(&raw, SearchType::Video, 10);
        assert_eq!(videos.len(), 2);
        assert!(videos.iter().all(|e| e.kind() == SearchType::Video));

        let playlists = collect_matching(&raw, SearchType::Playlist, 10);
        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].id(), "PL1");
    }

    #[test]
    fn test_collect_matching_truncates() {
        let raw = vec![video("a"), video("b"), video("c")];
        let kept = collect_matching(&raw, SearchType::Video, 2);
        let ids: Vec<&str> = kept.iter().map(Entity::id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    proptest! {
        #[test]
        fn prop_collect_matching_respects_limit(count in 0usize..40, limit in 1usize..30) {
            let raw: Vec<Value> = (0..count).map(|i| video(&format!("v{}", i))).collect();
            let kept = collect_matching(&raw, SearchType::Video, limit);
            prop_assert!(kept.len() <= limit);
            prop_assert_eq!(kept.len(), count.min(limit));
        }
    }
}
