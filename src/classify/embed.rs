//! Embed-type detection.
//!
//! A channel whose playable source is a YouTube embed needs the iframe
//! player instead of the media player, and the list UI badges it, so this
//! runs on every rendered channel. Detection walks a fixed evidence chain,
//! first hit wins; a channel with no evidence is a direct stream. Never
//! panics, regardless of record shape.

use serde_json::Value;

use crate::models::ChannelRecord;

const EMBED_DOMAINS: &[&str] = &["youtube.com", "youtu.be", "youtube-nocookie.com"];
const PLATFORM_NAME: &str = "youtube";

/// Alternate single-URL fields, checked after `url` and the platform hints.
const URL_FIELDS: &[&str] = &[
    "stream", "streamUrl", "embed", "href", "uri", "playlist", "playUrl",
];
/// Array-valued fields whose elements may be raw URLs or `{url|src|href}`
/// objects.
const URL_ARRAY_FIELDS: &[&str] = &["streams", "sources", "urls", "playlists"];
const NESTED_URL_KEYS: &[&str] = &["url", "src", "href"];
/// Descriptive fields searched for the platform name as a last resort.
const TEXT_FIELDS: &[&str] = &["provider", "display", "type", "kind"];

/// Decide whether the channel plays through a YouTube embed.
pub fn is_embed_type(channel: &ChannelRecord) -> bool {
    // 1. The primary URL itself.
    if is_embed_url(&channel.url) {
        return true;
    }

    // 2. First non-empty platform/source/provider hint.
    if platform_hint(channel)
        .map(|hint| hint.contains(PLATFORM_NAME))
        .unwrap_or(false)
    {
        return true;
    }

    // 3. Alternate URL-bearing fields.
    if URL_FIELDS.iter().any(|key| {
        channel
            .field(key)
            .and_then(Value::as_str)
            .map(is_embed_url)
            .unwrap_or(false)
    }) {
        return true;
    }

    // 4. Elements of stream/source arrays.
    if URL_ARRAY_FIELDS.iter().any(|key| {
        channel
            .field(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().any(array_element_is_embed))
            .unwrap_or(false)
    }) {
        return true;
    }

    // 5. Descriptive text mentioning the platform.
    TEXT_FIELDS.iter().any(|key| {
        channel
            .field(key)
            .and_then(Value::as_str)
            .map(|text| text.to_lowercase().contains(PLATFORM_NAME))
            .unwrap_or(false)
    })
}

fn is_embed_url(candidate: &str) -> bool {
    let lowered = candidate.to_lowercase();
    EMBED_DOMAINS.iter().any(|domain| lowered.contains(domain))
}

/// First non-empty of `platform`, `source`, `meta.source`, `provider`,
/// lower-cased.
fn platform_hint(channel: &ChannelRecord) -> Option<String> {
    [
        channel.field("platform"),
        channel.field("source"),
        channel.field("meta").and_then(|meta| meta.get("source")),
        channel.field("provider"),
    ]
    .into_iter()
    .flatten()
    .filter_map(Value::as_str)
    .map(str::to_lowercase)
    .find(|hint| !hint.is_empty())
}

fn array_element_is_embed(element: &Value) -> bool {
    match element {
        Value::String(raw) => is_embed_url(raw),
        Value::Object(fields) => NESTED_URL_KEYS
            .iter()
            .filter_map(|key| fields.get(*key))
            .filter_map(Value::as_str)
            .find(|nested| !nested.is_empty())
            .map(is_embed_url)
            .unwrap_or(false),
        _ => false,
    }
}
