use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tower::ServiceExt;

use globe_tv::{
    catalog::CatalogStore,
    config::Config,
    proxy,
    services::CatalogService,
    web::{AppState, WebServer},
};

// Build the real application router, optionally gated by a relay access key
fn test_app(api_key: Option<&str>) -> Router {
    let mut config = Config::default();
    config.proxy.api_key = api_key.map(str::to_string);

    let store = CatalogStore::load().expect("embedded catalog should load");
    let state = AppState {
        config,
        catalog: CatalogService::new(Arc::new(store)),
        http_client: proxy::build_client().expect("client should build"),
    };

    WebServer::create_router(state)
}

// Helper function to send requests to the app
async fn send_request(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json: Value = if body_bytes.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(json!({}))
    };

    (status, json)
}

fn channels_of(response: &Value) -> &Vec<Value> {
    response["channels"]
        .as_array()
        .expect("response should carry a channels array")
}

fn find_channel<'a>(channels: &'a [Value], name: &str) -> &'a Value {
    channels
        .iter()
        .find(|c| c["name"] == name)
        .unwrap_or_else(|| panic!("channel {name} missing from response"))
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app(None);

    let (status, response) = send_request(&app, Method::GET, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "healthy");
    assert_eq!(response["service"], "globe-tv");
    assert!(response.get("timestamp").is_some());
    assert!(response["countries"].as_u64().unwrap() > 0);
    assert!(response["channels"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_channels_by_category_aggregates_all_countries() {
    let app = test_app(None);

    let (status, response) =
        send_request(&app, Method::GET, "/api/channels-by-category?category=news").await;

    assert_eq!(status, StatusCode::OK);
    let channels = channels_of(&response);
    // 17 channels carry the news category and Weathernews matches by name.
    assert_eq!(channels.len(), 18);

    let countries: HashSet<&str> = channels
        .iter()
        .map(|c| c["countryName"].as_str().expect("countryName stamped"))
        .collect();
    assert!(countries.len() >= 10);

    let france24 = find_channel(channels, "France 24 Français");
    assert_eq!(france24["countryName"], "France");
    assert_eq!(france24["url"], "https://www.youtube.com/watch?v=l8PMl7tUDIE");
    assert_eq!(france24["isEmbedType"], true);
    assert_eq!(france24["detectedLanguage"], "fr");

    let aljazeera = find_channel(channels, "Al Jazeera Arabic");
    assert_eq!(aljazeera["countryName"], "Qatar");
    assert_eq!(aljazeera["url"], "https://www.youtube.com/watch?v=bNyUyrR0PHo");
    assert_eq!(aljazeera["isEmbedType"], true);
    assert_eq!(aljazeera["detectedLanguage"], "ar");

    // No language metadata on the record, so detection leans on the country.
    let tagesschau = find_channel(channels, "Tagesschau24");
    assert_eq!(tagesschau["detectedLanguage"], "de");
    assert_eq!(tagesschau["isEmbedType"], false);

    let weathernews = find_channel(channels, "Weathernews");
    assert_eq!(weathernews["countryName"], "Japan");
    assert_eq!(weathernews["detectedLanguage"], "ja");
}

#[tokio::test]
async fn test_channels_by_category_alias_and_case_handling() {
    let app = test_app(None);

    // The alias accepts categorized news channels but not name-only matches.
    let (status, response) =
        send_request(&app, Method::GET, "/api/channels-by-category?category=top-news").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(channels_of(&response).len(), 17);

    // Slug matching is case-insensitive.
    let (status, response) =
        send_request(&app, Method::GET, "/api/channels-by-category?category=News").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(channels_of(&response).len(), 18);

    // Kids and animation are interchangeable.
    let (_, kids) =
        send_request(&app, Method::GET, "/api/channels-by-category?category=kids").await;
    let (_, animation) =
        send_request(&app, Method::GET, "/api/channels-by-category?category=animation").await;
    let kids_names: HashSet<&str> = channels_of(&kids)
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    let animation_names: HashSet<&str> = channels_of(&animation)
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(kids_names.len(), 6);
    assert_eq!(kids_names, animation_names);

    // Unknown categories are valid queries with no matches.
    let (status, response) =
        send_request(&app, Method::GET, "/api/channels-by-category?category=telenovela").await;
    assert_eq!(status, StatusCode::OK);
    assert!(channels_of(&response).is_empty());
}

#[tokio::test]
async fn test_reserved_and_missing_category_yield_empty() {
    let app = test_app(None);

    for uri in [
        "/api/channels-by-category",
        "/api/channels-by-category?category=",
        "/api/channels-by-category?category=all-channels",
        "/api/channels-by-category?category=about",
        "/api/channels-by-category?category=privacy-policy",
        "/api/channels-by-category?category=faq",
    ] {
        let (status, response) = send_request(&app, Method::GET, uri).await;
        assert_eq!(status, StatusCode::OK, "uri: {uri}");
        assert!(channels_of(&response).is_empty(), "uri: {uri}");
    }
}

#[tokio::test]
async fn test_random_channel_sampling() {
    let app = test_app(None);

    let (status, response) = send_request(
        &app,
        Method::GET,
        "/api/channels-by-category?category=random-channel",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let channels = channels_of(&response);
    // The whole catalog fits under the sampling cap, so every channel shows up.
    assert_eq!(channels.len(), 36);
    assert!(channels.iter().all(|c| c.get("countryName").is_some()));
}

#[tokio::test]
async fn test_channels_by_country_scoped_view() {
    let app = test_app(None);

    let (status, response) =
        send_request(&app, Method::GET, "/api/channels-by-country?country=Germany").await;

    assert_eq!(status, StatusCode::OK);
    let channels = channels_of(&response);
    assert_eq!(channels.len(), 3);

    // Catalog order is preserved and the country is implied, not stamped.
    assert_eq!(channels[0]["name"], "DW Deutsch");
    assert_eq!(channels[1]["name"], "Tagesschau24");
    assert_eq!(channels[2]["name"], "KiKA");
    assert!(channels.iter().all(|c| c.get("countryName").is_none()));

    // Already-canonical watch URLs pass through unchanged.
    assert_eq!(
        channels[0]["url"],
        "https://www.youtube.com/watch?v=NvqKZHpKs-g"
    );
    assert_eq!(channels[0]["isEmbedType"], true);
    assert_eq!(channels[0]["detectedLanguage"], "de");

    // KiKA has no language hints at all and falls back to the country default.
    assert_eq!(channels[2]["detectedLanguage"], "de");
}

#[tokio::test]
async fn test_channels_by_country_category_filter() {
    let app = test_app(None);

    let (status, response) = send_request(
        &app,
        Method::GET,
        "/api/channels-by-country?country=Germany&category=kids",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let channels = channels_of(&response);
    assert_eq!(channels.len(), 1);
    assert_eq!(channels[0]["name"], "KiKA");

    let uri = format!(
        "/api/channels-by-country?country={}&category=sports",
        urlencoding::encode("United States of America")
    );
    let (status, response) = send_request(&app, Method::GET, &uri).await;
    assert_eq!(status, StatusCode::OK);
    let channels = channels_of(&response);
    assert_eq!(channels.len(), 1);
    assert_eq!(channels[0]["name"], "CBS Sports HQ");
}

#[tokio::test]
async fn test_channels_by_country_unknown_or_missing() {
    let app = test_app(None);

    let (status, response) =
        send_request(&app, Method::GET, "/api/channels-by-country?country=Atlantis").await;
    assert_eq!(status, StatusCode::OK);
    assert!(channels_of(&response).is_empty());

    // The country parameter is required.
    let (status, _) = send_request(&app, Method::GET, "/api/channels-by-country").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_countries_listing() {
    let app = test_app(None);

    let (status, response) = send_request(&app, Method::GET, "/api/countries").await;

    assert_eq!(status, StatusCode::OK);
    let countries = response["countries"]
        .as_array()
        .expect("countries array expected");
    assert_eq!(countries.len(), 14);

    let germany = countries
        .iter()
        .find(|c| c["name"] == "Germany")
        .expect("Germany listed");
    assert_eq!(germany["code"], "DE");
    assert_eq!(germany["language"], "de");
    assert_eq!(germany["channelCount"], 3);

    let france = countries
        .iter()
        .find(|c| c["name"] == "France")
        .expect("France listed");
    assert_eq!(france["channelCount"], 4);

    let total: u64 = countries
        .iter()
        .map(|c| c["channelCount"].as_u64().unwrap())
        .sum();
    assert_eq!(total, 36);
}

#[tokio::test]
async fn test_annotation_preserves_raw_metadata() {
    let app = test_app(None);

    let (_, response) =
        send_request(&app, Method::GET, "/api/channels-by-category?category=news").await;
    let channels = channels_of(&response);

    // The raw metadata field survives next to the derived tag.
    let france24 = find_channel(channels, "France 24 Français");
    assert_eq!(france24["language"], "français");
    assert_eq!(france24["detectedLanguage"], "fr");
}

#[tokio::test]
async fn test_proxy_requires_url() {
    let app = test_app(None);

    let (status, response) = send_request(&app, Method::GET, "/api/proxy").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "Missing 'url' parameter");

    let (status, response) = send_request(&app, Method::GET, "/api/proxy?url=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "Missing 'url' parameter");
}

#[tokio::test]
async fn test_proxy_rejects_unparseable_url() {
    let app = test_app(None);

    let (status, response) = send_request(&app, Method::GET, "/api/proxy?url=not-a-url").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = response["error"].as_str().unwrap();
    assert!(message.starts_with("Invalid 'url' parameter"), "{message}");
}

#[tokio::test]
async fn test_proxy_access_key_gate() {
    let app = test_app(Some("stream-key-123"));

    // Missing url is reported before the key check.
    let (status, response) = send_request(&app, Method::GET, "/api/proxy").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "Missing 'url' parameter");

    let (status, response) =
        send_request(&app, Method::GET, "/api/proxy?url=not-a-url").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(response["error"], "Unauthorized");

    let (status, response) =
        send_request(&app, Method::GET, "/api/proxy?url=not-a-url&key=wrong").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(response["error"], "Unauthorized");

    // A matching key reaches URL validation without touching the network.
    let (status, response) = send_request(
        &app,
        Method::GET,
        "/api/proxy?url=not-a-url&key=stream-key-123",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid 'url' parameter"));
}

#[tokio::test]
async fn test_proxy_blank_access_key_disables_gate() {
    let app = test_app(Some(""));

    let (status, response) = send_request(&app, Method::GET, "/api/proxy?url=not-a-url").await;

    // A blank configured key leaves the relay open.
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid 'url' parameter"));
}
