//! Stream URL canonicalization.
//!
//! Catalog data carries YouTube links in several shapes: `youtu.be` short
//! links, `/shorts/`, `/live/` and `/embed/` paths, and the
//! `youtube-nocookie.com` host. The embedded player only accepts the
//! long-form watch URL, so all of those collapse to
//! `https://www.youtube.com/watch?v=<id>`. Everything else passes through
//! untouched.

use url::Url;

const SHORT_HOST: &str = "youtu.be";
const WATCH_HOSTS: &[&str] = &["youtube.com", "youtube-nocookie.com"];
/// Path prefixes that carry the video id as their second segment.
const ID_PATH_PREFIXES: &[&str] = &["shorts", "live", "embed"];

/// Rewrite shorthand/legacy YouTube URLs to the canonical watch form.
///
/// Total and idempotent: empty, relative, unparseable, or unrecognized input
/// comes back unchanged, and an already-canonical URL maps to itself.
pub fn normalize_stream_url(raw: &str) -> String {
    match canonical_watch_url(raw) {
        Some(canonical) => canonical,
        None => raw.to_string(),
    }
}

/// Extract the video id (and any playlist id) from a recognized shorthand
/// shape and rebuild the watch URL. `None` means "leave the input alone".
fn canonical_watch_url(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    let video_id = if host == SHORT_HOST {
        parsed
            .path_segments()
            .and_then(|mut segments| segments.next().map(str::to_string))
            .filter(|id| !id.is_empty())?
    } else if WATCH_HOSTS.contains(&host) {
        let mut segments = parsed.path_segments()?;
        let prefix = segments.next()?;
        if !ID_PATH_PREFIXES.contains(&prefix) {
            return None;
        }
        segments
            .next()
            .filter(|id| !id.is_empty())
            .map(str::to_string)?
    } else {
        return None;
    };

    let playlist = parsed
        .query_pairs()
        .find(|(key, _)| key == "list")
        .map(|(_, value)| value.into_owned());

    Some(match playlist {
        Some(list) => format!("https://www.youtube.com/watch?v={video_id}&list={list}"),
        None => format!("https://www.youtube.com/watch?v={video_id}"),
    })
}
