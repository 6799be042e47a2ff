//! Embedded reference data and the catalog store
//!
//! The country table and the per-country channel catalog are compiled into
//! the binary with `rust-embed` and parsed once at startup. The resulting
//! [`CatalogStore`] is immutable and shared by reference across requests;
//! insertion order in the data files defines display order.

use std::collections::HashMap;

use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::errors::{AppError, AppResult};
use crate::models::{ChannelRecord, CountryInfo};

/// Embedded reference data (country table, channel catalog)
#[derive(RustEmbed)]
#[folder = "data/"]
pub struct CatalogAssets;

impl CatalogAssets {
    /// Get a data file by name
    pub fn get_asset(path: &str) -> Option<rust_embed::EmbeddedFile> {
        Self::get(path)
    }

    /// List all embedded data files
    pub fn list_assets() -> impl Iterator<Item = std::borrow::Cow<'static, str>> {
        Self::iter()
    }
}

/// One country's channel list as stored in `channels.json`. The file is an
/// ordered array, not a map, so country iteration order is the file order.
#[derive(Debug, Clone, Deserialize)]
struct CountryChannels {
    country: String,
    channels: Vec<ChannelRecord>,
}

/// Read-only view over the embedded catalog.
#[derive(Debug)]
pub struct CatalogStore {
    countries: Vec<CountryInfo>,
    country_index: HashMap<String, usize>,
    catalog: Vec<CountryChannels>,
    catalog_index: HashMap<String, usize>,
}

impl CatalogStore {
    /// Parse the embedded data files into a store.
    pub fn load() -> AppResult<Self> {
        let countries: Vec<CountryInfo> = parse_asset("countries.json")?;
        let catalog: Vec<CountryChannels> = parse_asset("channels.json")?;

        let country_index = countries
            .iter()
            .enumerate()
            .map(|(i, country)| (country.name.clone(), i))
            .collect();
        let catalog_index = catalog
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.country.clone(), i))
            .collect();

        Ok(Self {
            countries,
            country_index,
            catalog,
            catalog_index,
        })
    }

    /// All known countries, in table order.
    pub fn countries(&self) -> &[CountryInfo] {
        &self.countries
    }

    /// Country table entry by exact name.
    pub fn country(&self, name: &str) -> Option<&CountryInfo> {
        self.country_index
            .get(name)
            .map(|&index| &self.countries[index])
    }

    /// Default language tag for a country, from the country table.
    pub fn default_language(&self, name: &str) -> Option<&str> {
        self.country(name).map(|country| country.language.as_str())
    }

    /// Channel list for one country, in catalog order.
    pub fn channels_for(&self, country: &str) -> Option<&[ChannelRecord]> {
        self.catalog_index
            .get(country)
            .map(|&index| self.catalog[index].channels.as_slice())
    }

    /// Iterate `(country name, channels)` in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ChannelRecord])> {
        self.catalog
            .iter()
            .map(|entry| (entry.country.as_str(), entry.channels.as_slice()))
    }

    /// Number of countries with a channel list.
    pub fn country_count(&self) -> usize {
        self.catalog.len()
    }

    /// Total number of channels across all countries.
    pub fn channel_count(&self) -> usize {
        self.catalog.iter().map(|entry| entry.channels.len()).sum()
    }
}

fn parse_asset<T: DeserializeOwned>(name: &str) -> AppResult<T> {
    let file = CatalogAssets::get_asset(name)
        .ok_or_else(|| AppError::configuration(format!("embedded data file '{name}' is missing")))?;
    Ok(serde_json::from_slice(&file.data)?)
}
