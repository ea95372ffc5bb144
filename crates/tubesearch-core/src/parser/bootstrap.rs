//! Bootstrap data extraction for YouTube results pages
//!
//! A results page embeds its first batch of results as a JavaScript
//! assignment (`ytInitialData`) and advertises the web client version in a
//! handful of places. Nothing here ever fails: a page that cannot be read
//! just yields `None` fields and the caller falls back to the JSON API.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Tracking parameter that carries the client version inside the seed
const CLIENT_VERSION_PARAM: &str = "cver";

static CLIENT_VERSION_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r#""INNERTUBE_CONTEXT_CLIENT_VERSION"\s*:\s*"([^"]+)""#)
            .expect("Should be able to parse the client version regex"),
        Regex::new(r#""innertube_context_client_version"\s*:\s*"([^"]+)""#)
            .expect("Should be able to parse the lowercase client version regex"),
    ]
});

/// How the end of the embedded JSON is located
#[derive(Debug, Clone, Copy)]
enum Terminator {
    /// JSON runs until the closing script tag
    ScriptClose,
    /// JSON runs until the first `};`, whose brace must be restored
    TrailingBrace,
}

/// One way of locating the embedded JSON inside a page
#[derive(Debug, Clone, Copy)]
struct Strategy {
    prefix: &'static str,
    terminator: Terminator,
}

const STRATEGIES: [Strategy; 4] = [
    Strategy {
        prefix: "var ytInitialData = ",
        terminator: Terminator::ScriptClose,
    },
    Strategy {
        prefix: "var ytInitialData = ",
        terminator: Terminator::TrailingBrace,
    },
    Strategy {
        prefix: r#"window["ytInitialData"] = "#,
        terminator: Terminator::ScriptClose,
    },
    Strategy {
        prefix: r#"window["ytInitialData"] = "#,
        terminator: Terminator::TrailingBrace,
    },
];

impl Strategy {
    fn apply(&self, body: &str) -> Option<Value> {
        let start = body.find(self.prefix)? + self.prefix.len();
        let rest = &body[start..];

        let fragment = match self.terminator {
            Terminator::ScriptClose => rest[..rest.find(";</script>")?].to_string(),
            Terminator::TrailingBrace => format!("{}}}", &rest[..rest.find("};")?]),
        };

        serde_json::from_str::<Value>(&fragment)
            .ok()
            .filter(Value::is_object)
    }
}

/// Data recovered from a results page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bootstrap {
    /// Embedded `ytInitialData` object
    pub seed: Option<Value>,
    /// Web client version the page was rendered for
    pub client_version: Option<String>,
}

/// Extracts the embedded seed JSON and client version from a page body
///
/// # Arguments
/// * `body` - Raw HTML of a results page
///
/// # Returns
/// A [`Bootstrap`] whose fields are `None` when nothing usable was found
pub fn extract_bootstrap(body: &str) -> Bootstrap {
    let seed = STRATEGIES.iter().find_map(|strategy| strategy.apply(body));

    let client_version = seed
        .as_ref()
        .and_then(client_version_from_seed)
        .or_else(|| client_version_from_text(body));

    Bootstrap {
        seed,
        client_version,
    }
}

/// Reads the client version from the seed's service tracking parameters
pub fn client_version_from_seed(seed: &Value) -> Option<String> {
    seed.pointer("/responseContext/serviceTrackingParams")?
        .as_array()?
        .iter()
        .filter_map(|service| service.get("params")?.as_array())
        .flatten()
        .find(|param| param.get("key").and_then(Value::as_str) == Some(CLIENT_VERSION_PARAM))
        .and_then(|param| param.get("value")?.as_str())
        .filter(|version| !version.is_empty())
        .map(str::to_string)
}

/// Scans the raw page for a client version assignment
pub fn client_version_from_text(body: &str) -> Option<String> {
    CLIENT_VERSION_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(body))
        .map(|captures| captures[1].to_string())
}

/// Reads the search filter that restricts results to playlists
///
/// The filter menu lists result types as the second group; its third entry
/// is "Playlist".
pub fn extract_playlist_params(seed: &Value) -> Option<String> {
    seed.pointer(
        "/contents/twoColumnSearchResultsRenderer/primaryContents/sectionListRenderer\
         /subMenu/searchSubMenuRenderer/groups/1/searchFilterGroupRenderer/filters/2\
         /searchFilterRenderer/navigationEndpoint/searchEndpoint/params",
    )?
    .as_str()
    .filter(|params| !params.is_empty())
    .map(str::to_string)
}

/// Reads the platform's estimated number of matches
///
/// Accepts a number or a numeric string; anything else counts as zero.
pub fn extract_estimated_results(document: &Value) -> u64 {
    match document.get("estimatedResults") {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn page(script: &str) -> String {
        format!(
            "<html><head><script>var ytcfg = {{\"x\": 1}};</script></head>\
             <body><script nonce=\"abc\">{}</script>\
             <script>window.other = function() {{ return 1; }};</script></body></html>",
            script
        )
    }

    #[test]
    fn test_extract_var_assignment() {
        let html = page(r#"var ytInitialData = {"estimatedResults":"42","contents":{}};"#);
        let bootstrap = extract_bootstrap(&html);
        assert_eq!(
            bootstrap.seed,
            Some(json!({"estimatedResults": "42", "contents": {}}))
        );
    }

    #[test]
    fn test_extract_window_assignment() {
        let html = page(r#"window["ytInitialData"] = {"a":[1,2,3]};"#);
        let bootstrap = extract_bootstrap(&html);
        assert_eq!(bootstrap.seed, Some(json!({"a": [1, 2, 3]})));
    }

    #[test]
    fn test_extract_trailing_brace_without_script_close() {
        let html = r#"var ytInitialData = {"a":{"b":true}}; var next = 1;"#;
        let bootstrap = extract_bootstrap(html);
        assert_eq!(bootstrap.seed, Some(json!({"a": {"b": true}})));
    }

    #[test]
    fn test_extract_truncated_json_yields_none() {
        let html = page(r#"var ytInitialData = {"contents":{"twoColumn":{"broken": [1,2"#);
        let bootstrap = extract_bootstrap(&html);
        assert_eq!(bootstrap.seed, None);
        assert_eq!(bootstrap.client_version, None);
    }

    #[test]
    fn test_extract_missing_assignment() {
        let bootstrap = extract_bootstrap("<html><body>nothing here</body></html>");
        assert_eq!(bootstrap, Bootstrap::default());
    }

    #[test]
    fn test_client_version_from_tracking_params() {
        let seed = json!({
            "responseContext": {
                "serviceTrackingParams": [
                    {"service": "GFEEDBACK", "params": [{"key": "logged_in", "value": "0"}]},
                    {"service": "CSI", "params": [
                        {"key": "c", "value": "WEB"},
                        {"key": "cver", "value": "2.20240726.00.00"}
                    ]}
                ]
            }
        });
        let html = page(&format!("var ytInitialData = {};", seed));
        let bootstrap = extract_bootstrap(&html);
        assert_eq!(bootstrap.client_version.as_deref(), Some("2.20240726.00.00"));
    }

    #[test]
    fn test_client_version_from_text_fallbacks() {
        let upper = r#"ytcfg.set({"INNERTUBE_CONTEXT_CLIENT_VERSION":"2.20240101.01.00"});"#;
        assert_eq!(
            client_version_from_text(upper).as_deref(),
            Some("2.20240101.01.00")
        );

        let lower = r#"{"innertube_context_client_version":"2.20230505.00.00"}"#;
        assert_eq!(
            client_version_from_text(lower).as_deref(),
            Some("2.20230505.00.00")
        );

        assert_eq!(client_version_from_text("no version"), None);
    }

    #[test]
    fn test_client_version_text_used_when_seed_lacks_it() {
        let html = page(
            r#"var ytInitialData = {"contents":{}};</script><script>ytcfg.set({"INNERTUBE_CONTEXT_CLIENT_VERSION":"2.1"});"#,
        );
        let bootstrap = extract_bootstrap(&html);
        assert!(bootstrap.seed.is_some());
        assert_eq!(bootstrap.client_version.as_deref(), Some("2.1"));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let html = page(r#"var ytInitialData = {"x":"y"};"#);
        assert_eq!(extract_bootstrap(&html), extract_bootstrap(&html));
    }

    #[test]
    fn test_extract_playlist_params() {
        let seed = json!({
            "contents": {"twoColumnSearchResultsRenderer": {"primaryContents": {"sectionListRenderer": {
                "subMenu": {"searchSubMenuRenderer": {"groups": [
                    {"searchFilterGroupRenderer": {"filters": []}},
                    {"searchFilterGroupRenderer": {"filters": [
                        {"searchFilterRenderer": {"label": {"simpleText": "Video"}}},
                        {"searchFilterRenderer": {"label": {"simpleText": "Channel"}}},
                        {"searchFilterRenderer": {
                            "label": {"simpleText": "Playlist"},
                            "navigationEndpoint": {"searchEndpoint": {"params": "EgIQAw%3D%3D"}}
                        }}
                    ]}}
                ]}}
            }}}}
        });
        assert_eq!(extract_playlist_params(&seed).as_deref(), Some("EgIQAw%3D%3D"));
        assert_eq!(extract_playlist_params(&json!({"contents": {}})), None);
    }

    #[test]
    fn test_extract_estimated_results() {
        assert_eq!(extract_estimated_results(&json!({"estimatedResults": "1234"})), 1234);
        assert_eq!(extract_estimated_results(&json!({"estimatedResults": 99})), 99);
        assert_eq!(extract_estimated_results(&json!({"estimatedResults": "many"})), 0);
        assert_eq!(extract_estimated_results(&json!({})), 0);
    }

    proptest! {
        #[test]
        fn prop_first_strategy_recovers_embedded_object(
            entries in prop::collection::btree_map("[a-z]{1,8}", "[A-Za-z0-9 ]{0,16}", 0..6),
            number in any::<i64>(),
            before in "[A-Za-z0-9 =();.]{0,40}",
            after in "[A-Za-z0-9 =();.]{0,40}",
        ) {
            let mut object = serde_json::Map::new();
            for (key, value) in entries {
                object.insert(key, Value::String(value));
            }
            object.insert("n".to_string(), json!(number));
            let embedded = Value::Object(object);

            let html = format!(
                "<script>{}</script><script>var ytInitialData = {};</script><script>{}</script>",
                before, embedded, after
            );

            let bootstrap = extract_bootstrap(&html);
            prop_assert_eq!(bootstrap.seed, Some(embedded));
        }
    }
}
