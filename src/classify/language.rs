//! Language classification.
//!
//! Best-effort inference of a channel's spoken language from noisy metadata.
//! Resolution order: structured fields, then a serialized-text scan, then the
//! per-country default. Every path returns a tag from [`VALID_TAGS`] or
//! nothing; misclassification is an accepted outcome, never an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::models::ChannelRecord;

/// ISO 639-1 tags this classifier is allowed to emit.
pub const VALID_TAGS: &[&str] = &[
    "ar", "en", "fr", "es", "pt", "tr", "ur", "he", "de", "ru", "zh", "it", "nl", "pl", "sv",
    "no", "fi", "da", "hi", "bn", "sw", "am", "km", "ms", "vi", "ja", "ko", "ro", "az", "cs",
    "el", "sr", "hr", "bg", "hu", "sk", "sl", "mk", "lt", "lv", "et", "fa", "th",
];

/// Metadata paths scanned for a language value, in priority order. Array
/// values contribute their first element.
const FIELD_CANDIDATES: &[&[&str]] = &[
    &["language"],
    &["lang"],
    &["lang_code"],
    &["language_code"],
    &["languageCode"],
    &["locale"],
    &["iso"],
    &["iso_lang"],
    &["audioLang"],
    &["meta", "language"],
    &["metadata", "language"],
    &["props", "language"],
];

enum NamePattern {
    Prefix(&'static str),
    Contains(&'static str),
}

impl NamePattern {
    fn matches(&self, candidate: &str) -> bool {
        match self {
            NamePattern::Prefix(prefix) => candidate.starts_with(prefix),
            NamePattern::Contains(fragment) => candidate.contains(fragment),
        }
    }
}

/// Language-name heuristics for field values that are not already bare tags.
/// First match wins.
const FIELD_RULES: &[(NamePattern, &str)] = &[
    (NamePattern::Prefix("ara"), "ar"),
    (NamePattern::Prefix("eng"), "en"),
    (NamePattern::Prefix("fra"), "fr"),
    (NamePattern::Contains("franc"), "fr"),
    (NamePattern::Prefix("spa"), "es"),
    (NamePattern::Contains("espa"), "es"),
    (NamePattern::Prefix("por"), "pt"),
    (NamePattern::Contains("portu"), "pt"),
    (NamePattern::Contains("turk"), "tr"),
    (NamePattern::Contains("urdu"), "ur"),
    (NamePattern::Contains("heb"), "he"),
    (NamePattern::Contains("pers"), "fa"),
    (NamePattern::Contains("fars"), "fa"),
];

/// Generic broadcast terms stripped from serialized text before the
/// substring scan, so "Radio X FM" does not misread as a language hint.
const TEXT_NOISE: &[&str] = &[
    "tv", "hd", "fm", "radio", "video", "music", "channel", "news", "live", "feed",
];

/// Language-name fragments searched in the scrubbed text, in priority order.
const TEXT_RULES: &[(&str, &str)] = &[
    ("arab", "ar"),
    ("العرب", "ar"),
    ("english", "en"),
    ("franc", "fr"),
    ("français", "fr"),
    ("espa", "es"),
    ("portu", "pt"),
    ("turk", "tr"),
    ("urdu", "ur"),
    ("hebr", "he"),
    ("pers", "fa"),
    ("fars", "fa"),
    ("chin", "zh"),
    ("mandar", "zh"),
    ("russ", "ru"),
    ("deut", "de"),
    ("german", "de"),
    ("hindi", "hi"),
    ("beng", "bn"),
    ("viet", "vi"),
    ("thai", "th"),
    ("japa", "ja"),
    ("kore", "ko"),
];

static ARABIC_SCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{0600}-\u{06FF}]").unwrap());

/// Infer a language tag for a channel.
///
/// `fallback_tag` is the default language of the channel's country, applied
/// only when no field or text evidence resolves and only when it is itself a
/// valid tag.
pub fn detect_language(channel: &ChannelRecord, fallback_tag: Option<&str>) -> Option<&'static str> {
    if let Some(tag) = field_candidates(channel).find_map(|candidate| field_tag(&candidate)) {
        return Some(tag);
    }

    if let Some(tag) = text_tag(channel) {
        return Some(tag);
    }

    fallback_tag.and_then(allowed_tag)
}

/// Canonical allow-list entry for `candidate`, if it is a valid tag.
fn allowed_tag(candidate: &str) -> Option<&'static str> {
    VALID_TAGS.iter().find(|tag| **tag == candidate).copied()
}

fn field_candidates(channel: &ChannelRecord) -> impl Iterator<Item = String> + '_ {
    FIELD_CANDIDATES.iter().filter_map(|path| {
        let mut value = channel.field(path[0])?;
        for key in &path[1..] {
            value = value.get(key)?;
        }
        scalar_text(value)
    })
}

/// Lower-cased, trimmed text of a scalar value; arrays contribute their
/// first element.
fn scalar_text(value: &Value) -> Option<String> {
    let scalar = match value {
        Value::Array(items) => items.first()?,
        other => other,
    };
    match scalar {
        Value::String(raw) => {
            let trimmed = raw.trim().to_lowercase();
            (!trimmed.is_empty()).then_some(trimmed)
        }
        _ => None,
    }
}

fn field_tag(candidate: &str) -> Option<&'static str> {
    if let Some(tag) = allowed_tag(candidate) {
        return Some(tag);
    }
    FIELD_RULES
        .iter()
        .find(|(pattern, _)| pattern.matches(candidate))
        .map(|(_, tag)| *tag)
}

/// Serialize the whole record, strip the noise terms, then look for script
/// or language-name evidence.
fn text_tag(channel: &ChannelRecord) -> Option<&'static str> {
    let mut text = serde_json::to_string(channel)
        .unwrap_or_default()
        .to_lowercase();
    for word in TEXT_NOISE {
        text = text.replace(word, "");
    }

    if ARABIC_SCRIPT.is_match(&text) {
        return Some("ar");
    }

    TEXT_RULES
        .iter()
        .find(|(fragment, _)| text.contains(fragment))
        .map(|(_, tag)| *tag)
}
