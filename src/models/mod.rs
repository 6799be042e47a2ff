//! Core data types shared across the catalog pipeline and the web layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One playable entity as ingested.
///
/// Catalog sources are heterogeneous: besides the fields named here a record
/// may carry language hints, platform hints, nested stream lists, or anything
/// else. Those land in `extra` and round-trip through serialization
/// untouched; the classifiers read their evidence out of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelRecord {
    /// Display name; identity key within a country.
    pub name: String,
    /// Raw source URL; may be empty or platform shorthand.
    #[serde(default)]
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Provenance stamp added when the per-country catalog is flattened.
    /// Absent on country-scoped results; never part of identity.
    #[serde(rename = "countryName", skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChannelRecord {
    /// Look up an extra metadata field by key.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// A channel as served over the wire: the record plus the classifier
/// outputs, flattened into one JSON object.
///
/// The annotation keys are distinct from any raw metadata key (`language`,
/// `lang`, ...) so a record's own fields are never shadowed.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedChannel {
    #[serde(flatten)]
    pub channel: ChannelRecord,
    #[serde(rename = "detectedLanguage")]
    pub detected_language: Option<&'static str>,
    #[serde(rename = "isEmbedType")]
    pub is_embed_type: bool,
}

/// Static per-country reference data: display name, ISO 3166 code (flag
/// rendering), default language tag (classifier fallback).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryInfo {
    pub name: String,
    pub code: String,
    pub language: String,
}

/// Country directory entry served to the sidebar/globe.
#[derive(Debug, Clone, Serialize)]
pub struct CountrySummary {
    pub name: String,
    pub code: String,
    pub language: String,
    #[serde(rename = "channelCount")]
    pub channel_count: usize,
}

/// Response envelope for the channel list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelsResponse {
    pub channels: Vec<AnnotatedChannel>,
}

/// Response envelope for the country directory endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CountriesResponse {
    pub countries: Vec<CountrySummary>,
}
