//! Catalog views
//!
//! Builds the channel views served by the API: the aggregated cross-country
//! view, the random sample, and the country-scoped view used by the sidebar.
//! Every view normalizes stream URLs and annotates each record with the
//! detected language and embed flag before it leaves the service.

use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::classify::{detect_language, is_embed_type, matches, normalize_stream_url, CategoryQuery};
use crate::models::{AnnotatedChannel, ChannelRecord, CountrySummary};

/// Upper bound on the `random-channel` sample.
const RANDOM_SAMPLE_LIMIT: usize = 40;

/// Read side of the catalog, shared across requests.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Aggregated view over every country.
    ///
    /// Reserved queries short-circuit to an empty set; the caller already
    /// holds the full catalog for those. Otherwise channels are flattened in
    /// catalog order, stamped with their country, URL-normalized, filtered,
    /// and for the random query shuffled down to a bounded sample.
    pub fn channels_by_category(&self, query: &CategoryQuery) -> Vec<AnnotatedChannel> {
        if query.is_global() {
            return Vec::new();
        }

        let mut flattened: Vec<ChannelRecord> = Vec::new();
        for (country, channels) in self.store.iter() {
            for channel in channels {
                let mut channel = channel.clone();
                channel.country_name = Some(country.to_string());
                channel.url = normalize_stream_url(&channel.url);
                flattened.push(channel);
            }
        }

        let mut matched: Vec<ChannelRecord> = flattened
            .into_iter()
            .filter(|channel| matches(channel, query))
            .collect();
        if query.is_random() {
            sample_random(&mut matched);
        }

        matched
            .into_iter()
            .map(|channel| self.annotate(channel, None))
            .collect()
    }

    /// Country-scoped view. Records are not stamped with `countryName`; the
    /// requested country supplies the language fallback instead. An unknown
    /// country is a valid empty result, not an error.
    pub fn channels_by_country(&self, country: &str, query: &CategoryQuery) -> Vec<AnnotatedChannel> {
        let Some(channels) = self.store.channels_for(country) else {
            return Vec::new();
        };

        channels
            .iter()
            .filter(|channel| matches(channel, query))
            .map(|channel| {
                let mut channel = channel.clone();
                channel.url = normalize_stream_url(&channel.url);
                self.annotate(channel, Some(country))
            })
            .collect()
    }

    /// Countries that have a channel list, in catalog order, joined with the
    /// country table for code and default language.
    pub fn countries(&self) -> Vec<CountrySummary> {
        self.store
            .iter()
            .map(|(name, channels)| {
                let info = self.store.country(name);
                CountrySummary {
                    name: name.to_string(),
                    code: info.map(|c| c.code.clone()).unwrap_or_default(),
                    language: info.map(|c| c.language.clone()).unwrap_or_default(),
                    channel_count: channels.len(),
                }
            })
            .collect()
    }

    /// Run the classifiers over one record. The language fallback country is
    /// the explicit one when given (country-scoped view), else the stamped
    /// `countryName` (aggregated view).
    fn annotate(&self, channel: ChannelRecord, country: Option<&str>) -> AnnotatedChannel {
        let fallback = country
            .or(channel.country_name.as_deref())
            .and_then(|name| self.store.default_language(name));

        AnnotatedChannel {
            detected_language: detect_language(&channel, fallback),
            is_embed_type: is_embed_type(&channel),
            channel,
        }
    }
}

/// Uniformly shuffle in place and keep at most [`RANDOM_SAMPLE_LIMIT`]
/// entries.
fn sample_random(channels: &mut Vec<ChannelRecord>) {
    fastrand::shuffle(channels);
    channels.truncate(RANDOM_SAMPLE_LIMIT);
}
