//! Fixture builders shared by the integration tests

#![allow(dead_code)]

use serde_json::{json, Value};
use tubesearch_core::ClientConfig;
use wiremock::MockServer;

pub const PAGE_VERSION: &str = "2.20240801.00.00";

/// Client configuration pointing at the mock server, without delays
pub fn config(server: &MockServer) -> ClientConfig {
    ClientConfig {
        requests_per_second: 1000.0,
        timeout_secs: 5,
        max_retries: 0,
        base_url: server.uri(),
        ..Default::default()
    }
}

pub fn video(id: &str) -> Value {
    json!({"videoRenderer": {
        "videoId": id,
        "title": {"runs": [{"text": format!("Video {}", id)}]},
        "viewCountText": {"simpleText": "1,000 views"},
        "lengthText": {"simpleText": "4:20"},
        "thumbnail": {"thumbnails": [
            {"url": format!("https://i.ytimg.com/vi/{}/default.jpg", id), "width": 120, "height": 90},
            {"url": format!("https://i.ytimg.com/vi/{}/hq720.jpg", id), "width": 720, "height": 404}
        ]}
    }})
}

pub fn playlist(id: &str) -> Value {
    json!({"playlistRenderer": {
        "playlistId": id,
        "title": {"simpleText": format!("Playlist {}", id)},
        "videoCount": "12"
    }})
}

pub fn continuation_item(token: &str) -> Value {
    json!({"continuationItemRenderer": {
        "continuationEndpoint": {"continuationCommand": {"token": token}}
    }})
}

/// Initial-shape document with one item section and an optional token
pub fn initial_document(items: Vec<Value>, token: Option<&str>, estimated: &str) -> Value {
    let mut contents = vec![json!({"itemSectionRenderer": {"contents": items}})];
    if let Some(token) = token {
        contents.push(continuation_item(token));
    }

    json!({
        "estimatedResults": estimated,
        "responseContext": {"serviceTrackingParams": [
            {"service": "CSI", "params": [{"key": "cver", "value": PAGE_VERSION}]}
        ]},
        "contents": {"twoColumnSearchResultsRenderer": {"primaryContents": {
            "sectionListRenderer": {
                "contents": contents,
                "subMenu": {"searchSubMenuRenderer": {"groups": [
                    {"searchFilterGroupRenderer": {"filters": []}},
                    {"searchFilterGroupRenderer": {"filters": [
                        {"searchFilterRenderer": {}},
                        {"searchFilterRenderer": {}},
                        {"searchFilterRenderer": {
                            "navigationEndpoint": {"searchEndpoint": {"params": "EgIQAw%3D%3D"}}
                        }}
                    ]}}
                ]}}
            }
        }}}
    })
}

/// Continuation-shape document
pub fn continuation_document(items: Vec<Value>, token: Option<&str>) -> Value {
    let mut list = vec![json!({"itemSectionRenderer": {"contents": items}})];
    if let Some(token) = token {
        list.push(continuation_item(token));
    }

    json!({"onResponseReceivedCommands": [
        {"appendContinuationItemsAction": {"continuationItems": list}}
    ]})
}

/// Results page embedding `seed` the way the live site does
pub fn results_page(seed: &Value) -> String {
    format!(
        "<!DOCTYPE html><html><head><script>var ytcfg = {{}};</script></head><body>\
         <script nonce=\"n\">var ytInitialData = {};</script>\
         <script>ytcfg.set({{\"INNERTUBE_CONTEXT_CLIENT_VERSION\":\"{}\"}});</script>\
         </body></html>",
        seed, PAGE_VERSION
    )
}

/// Results page whose embedded data is cut off mid-object
pub fn truncated_page() -> String {
    format!(
        "<html><body><script>var ytInitialData = {{\"contents\":{{\"twoColumnSearchResultsRenderer\":\
         </script><script>ytcfg.set({{\"INNERTUBE_CONTEXT_CLIENT_VERSION\":\"{}\"}})</script></body></html>",
        PAGE_VERSION
    )
}

pub fn ids(results: &tubesearch_core::SearchResults) -> Vec<String> {
    results.items.iter().map(|item| item.id().to_string()).collect()
}
