//! Renderer normalization
//!
//! Maps one raw renderer object onto a typed [`Entity`]. The platform's
//! renderer schema is loose and changes without notice, so every lookup is
//! optional and anything that does not add up is dropped rather than
//! returned half-filled.

use serde_json::Value;

use crate::types::{Author, Entity, Playlist, Thumbnail, Video};
use crate::url::{absolutize, build_channel_url, build_playlist_url, build_video_url};

/// Renderer kinds this module understands
enum Renderer<'a> {
    Video(&'a Value),
    Playlist(&'a Value),
    Unrecognized,
}

impl<'a> Renderer<'a> {
    fn of(raw: &'a Value) -> Self {
        if let Some(inner) = raw.get("videoRenderer") {
            Renderer::Video(inner)
        } else if let Some(inner) = raw.get("playlistRenderer") {
            Renderer::Playlist(inner)
        } else {
            Renderer::Unrecognized
        }
    }
}

/// Converts a raw renderer into a typed entity
///
/// # Returns
/// `None` for unknown renderer kinds and for renderers missing required
/// fields (id, title).
pub fn normalize(raw: &Value) -> Option<Entity> {
    match Renderer::of(raw) {
        Renderer::Video(inner) => parse_video(inner)
            .filter(Video::is_consistent)
            .map(Entity::Video),
        Renderer::Playlist(inner) => parse_playlist(inner)
            .filter(Playlist::is_consistent)
            .map(Entity::Playlist),
        Renderer::Unrecognized => None,
    }
}

fn parse_video(renderer: &Value) -> Option<Video> {
    let id = renderer.get("videoId")?.as_str()?.to_string();
    let title = renderer.get("title").map(text_of).filter(|t| !t.is_empty())?;

    let badges: Vec<String> = badge_labels(renderer.get("badges"));
    let live = badge_styles(renderer.get("badges"))
        .iter()
        .any(|style| style == "BADGE_STYLE_TYPE_LIVE_NOW")
        || overlay_style(renderer).as_deref() == Some("LIVE");
    let upcoming = renderer.get("upcomingEventData").is_some()
        || overlay_style(renderer).as_deref() == Some("UPCOMING");

    let description = renderer
        .pointer("/detailedMetadataSnippets/0/snippetText")
        .or_else(|| renderer.get("descriptionSnippet"))
        .map(text_of)
        .unwrap_or_default();

    Some(Video {
        url: build_video_url(&id),
        id,
        title,
        thumbnails: thumbnails(renderer.pointer("/thumbnail/thumbnails")),
        live,
        upcoming,
        badges,
        author: parse_author(renderer, &["ownerText", "longBylineText", "shortBylineText"]),
        description,
        views: renderer
            .get("viewCountText")
            .map(text_of)
            .and_then(|text| parse_count(&text)),
        duration: renderer
            .get("lengthText")
            .map(text_of)
            .filter(|t| !t.is_empty()),
        uploaded_at: renderer
            .get("publishedTimeText")
            .map(text_of)
            .filter(|t| !t.is_empty()),
    })
}

fn parse_playlist(renderer: &Value) -> Option<Playlist> {
    let id = renderer.get("playlistId")?.as_str()?.to_string();
    let title = renderer.get("title").map(text_of).filter(|t| !t.is_empty())?;

    let video_count = renderer
        .get("videoCount")
        .and_then(|count| match count {
            Value::String(s) => parse_count(s),
            Value::Number(n) => n.as_u64(),
            _ => None,
        })
        .or_else(|| {
            renderer
                .get("videoCountText")
                .map(text_of)
                .and_then(|text| parse_count(&text))
        })
        .unwrap_or(0);

    let thumbnail_list = renderer
        .pointer("/thumbnails/0/thumbnails")
        .or_else(|| renderer.pointer("/thumbnail/thumbnails"));

    Some(Playlist {
        url: build_playlist_url(&id),
        id,
        title,
        thumbnails: thumbnails(thumbnail_list),
        owner: parse_author(renderer, &["shortBylineText", "longBylineText"]),
        published_at: renderer
            .get("publishedTimeText")
            .map(text_of)
            .filter(|t| !t.is_empty()),
        video_count,
    })
}

/// Reads the channel from the first byline field that has a text run
fn parse_author(renderer: &Value, byline_fields: &[&str]) -> Option<Author> {
    let run = byline_fields
        .iter()
        .find_map(|field| renderer.pointer(&format!("/{}/runs/0", field)))?;

    let name = run.get("text")?.as_str()?.to_string();
    if name.is_empty() {
        return None;
    }

    let browse = run.pointer("/navigationEndpoint/browseEndpoint");
    let id = browse
        .and_then(|b| b.get("browseId"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let url = browse
        .and_then(|b| b.get("canonicalBaseUrl"))
        .and_then(Value::as_str)
        .map(absolutize)
        .or_else(|| {
            run.pointer("/navigationEndpoint/commandMetadata/webCommandMetadata/url")
                .and_then(Value::as_str)
                .map(absolutize)
        })
        .unwrap_or_else(|| {
            if id.is_empty() {
                String::new()
            } else {
                build_channel_url(&id)
            }
        });

    let owner_badges = renderer.get("ownerBadges");
    let badge_names = {
        let tooltips = badge_tooltips(owner_badges);
        if tooltips.is_empty() {
            badge_labels(owner_badges)
        } else {
            tooltips
        }
    };
    let verified = badge_styles(owner_badges)
        .iter()
        .any(|style| style.starts_with("BADGE_STYLE_TYPE_VERIFIED"));

    Some(Author {
        name,
        id,
        url,
        avatars: thumbnails(renderer.pointer(
            "/channelThumbnailSupportedRenderers/channelThumbnailWithLinkRenderer/thumbnail/thumbnails",
        )),
        badges: badge_names,
        verified,
    })
}

/// Joins text runs, or returns `simpleText`
pub fn text_of(value: &Value) -> String {
    if let Some(runs) = value.get("runs").and_then(Value::as_array) {
        return runs
            .iter()
            .filter_map(|run| run.get("text").and_then(Value::as_str))
            .collect();
    }

    value
        .get("simpleText")
        .and_then(Value::as_str)
        .or_else(|| value.as_str())
        .unwrap_or_default()
        .to_string()
}

/// Digits of a display count such as "1,234,567 views"
///
/// Returns `None` when the text holds no digits (e.g., "No views").
pub fn parse_count(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();

    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Thumbnail list sorted by descending width
fn thumbnails(list: Option<&Value>) -> Vec<Thumbnail> {
    let mut thumbs: Vec<Thumbnail> = list
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let url = item.get("url")?.as_str()?;
                    Some(Thumbnail {
                        url: absolutize(url),
                        width: dimension(item.get("width")),
                        height: dimension(item.get("height")),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    thumbs.sort_by(|a, b| b.width.cmp(&a.width));
    thumbs
}

fn dimension(value: Option<&Value>) -> u32 {
    value
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}

fn badge_renderers(badges: Option<&Value>) -> impl Iterator<Item = &Value> {
    badges
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|badge| badge.get("metadataBadgeRenderer"))
}

fn badge_labels(badges: Option<&Value>) -> Vec<String> {
    badge_renderers(badges)
        .filter_map(|b| b.get("label").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

fn badge_tooltips(badges: Option<&Value>) -> Vec<String> {
    badge_renderers(badges)
        .filter_map(|b| b.get("tooltip").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

fn badge_styles(badges: Option<&Value>) -> Vec<String> {
    badge_renderers(badges)
        .filter_map(|b| b.get("style").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

/// Style of the time-status overlay ("DEFAULT", "LIVE", "UPCOMING")
fn overlay_style(renderer: &Value) -> Option<String> {
    renderer
        .get("thumbnailOverlays")?
        .as_array()?
        .iter()
        .find_map(|overlay| overlay.pointer("/thumbnailOverlayTimeStatusRenderer/style"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
