use axum::{
    body::Body,
    extract::{Query, State},
    http::Response,
    response::Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::AppState;
use crate::classify::CategoryQuery;
use crate::errors::AppError;
use crate::models::{ChannelsResponse, CountriesResponse};
use crate::proxy;

#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CountryParams {
    pub country: String,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProxyParams {
    pub url: Option<String>,
    pub key: Option<String>,
}

/// List channels across every country, filtered by category slug.
///
/// Reserved navigation tokens and a missing `category` both resolve to the
/// global query, which short-circuits to an empty list.
pub async fn channels_by_category(
    State(state): State<AppState>,
    Query(params): Query<CategoryParams>,
) -> Json<ChannelsResponse> {
    let query = CategoryQuery::parse(params.category.as_deref());
    let channels = state.catalog.channels_by_category(&query);
    debug!(
        category = params.category.as_deref().unwrap_or(""),
        count = channels.len(),
        "served aggregated channel list"
    );
    Json(ChannelsResponse { channels })
}

/// List a single country's channels, optionally narrowed by category.
///
/// Unknown countries yield an empty list rather than an error.
pub async fn channels_by_country(
    State(state): State<AppState>,
    Query(params): Query<CountryParams>,
) -> Json<ChannelsResponse> {
    let query = CategoryQuery::parse(params.category.as_deref());
    let channels = state.catalog.channels_by_country(&params.country, &query);
    debug!(
        country = %params.country,
        count = channels.len(),
        "served country channel list"
    );
    Json(ChannelsResponse { channels })
}

/// List every country in the directory with its channel count.
pub async fn countries(State(state): State<AppState>) -> Json<CountriesResponse> {
    Json(CountriesResponse {
        countries: state.catalog.countries(),
    })
}

/// Relay an upstream stream through the server.
///
/// Validates the `url` parameter and the optional access key before opening
/// the upstream connection; see [`crate::proxy`] for the relay itself.
pub async fn proxy_stream(
    State(state): State<AppState>,
    Query(params): Query<ProxyParams>,
) -> Result<Response<Body>, AppError> {
    let Some(url) = params.url.as_deref().filter(|url| !url.is_empty()) else {
        return Err(AppError::validation("Missing 'url' parameter"));
    };

    proxy::check_access_key(state.config.proxy.api_key.as_deref(), params.key.as_deref())?;
    proxy::relay_stream(&state.http_client, url).await
}

pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": "globe-tv",
        "countries": state.catalog.store().country_count(),
        "channels": state.catalog.store().channel_count(),
    }))
}
