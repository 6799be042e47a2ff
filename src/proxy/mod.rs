//! Streaming reverse proxy.
//!
//! Fetches an upstream media resource and relays it to the client as a live
//! byte stream. The upstream request carries a browser user agent with
//! `Referer` and `Origin` forged to the target's own origin, which defeats
//! the referrer gating many stream hosts apply.
//!
//! Key behaviors:
//!   - No total request timeout (live streams must remain open).
//!   - Fixed connect timeout for the initial upstream handshake.
//!   - Upstream status and content type are relayed unchanged; a non-success
//!     upstream status surfaces as an error carrying that status.
//!   - The body is never buffered; backpressure propagates through the
//!     pull-based relay stream, and dropping the response drops the fetch.

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Response};
use reqwest::Client;
use tracing::{debug, error, info};
use url::Url;

use crate::errors::{AppError, AppResult};

/// Browser user agent presented upstream; plenty of live streams refuse
/// non-browser clients outright.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const UPSTREAM_CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Build the shared upstream client. Connect timeout only; a total timeout
/// would kill long-running live relays.
pub fn build_client() -> AppResult<Client> {
    Ok(Client::builder()
        .connect_timeout(UPSTREAM_CONNECT_TIMEOUT)
        .pool_max_idle_per_host(8)
        .build()?)
}

/// Enforce the optional proxy access key. An unset or empty server key
/// leaves the proxy open; a configured key requires an exact match.
pub fn check_access_key(server_key: Option<&str>, caller_key: Option<&str>) -> AppResult<()> {
    match server_key.filter(|key| !key.is_empty()) {
        Some(expected) if caller_key != Some(expected) => {
            Err(AppError::unauthorized("Unauthorized"))
        }
        _ => Ok(()),
    }
}

/// Fetch `raw_url` with forged browser headers and relay the response as a
/// live stream, preserving status and content type and adding permissive
/// CORS headers.
pub async fn relay_stream(client: &Client, raw_url: &str) -> AppResult<Response<Body>> {
    let target = Url::parse(raw_url)
        .map_err(|_| AppError::validation(format!("Invalid 'url' parameter: {raw_url}")))?;

    info!("Proxying upstream stream: {}", target);

    let upstream = client
        .get(target.clone())
        .headers(forged_headers(&target))
        .send()
        .await
        .map_err(|e| {
            error!("Failed to reach upstream {}: {}", target, e);
            AppError::Http(e)
        })?;

    let status = upstream.status();
    if !status.is_success() {
        error!("Upstream responded {} for {}", status, target);
        return Err(AppError::upstream(
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
        ));
    }

    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    debug!("Upstream accepted: ct={} url={}", content_type, target);

    let body = Body::from_stream(upstream.bytes_stream());
    let response = Response::builder()
        .status(status.as_u16())
        .header(header::CONTENT_TYPE, content_type)
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(header::ACCESS_CONTROL_ALLOW_METHODS, "GET, OPTIONS")
        .header(header::ACCESS_CONTROL_ALLOW_HEADERS, "*")
        .body(body)
        .map_err(|e| AppError::internal(format!("Failed to build relay response: {e}")))?;

    info!("Streaming relay established for {}", target);
    Ok(response)
}

/// Browser-like request headers with `Referer` and `Origin` pointing at the
/// target's own origin.
fn forged_headers(target: &Url) -> reqwest::header::HeaderMap {
    use reqwest::header::{
        HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONNECTION, ORIGIN,
        REFERER, USER_AGENT,
    };

    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    if let Ok(origin) = HeaderValue::from_str(&origin_of(target)) {
        headers.insert(REFERER, origin.clone());
        headers.insert(ORIGIN, origin);
    }
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers
}

/// `scheme://host[:port]` with default ports elided, as a browser would send
/// in an `Origin` header.
fn origin_of(url: &Url) -> String {
    url.origin().ascii_serialization()
}
