//! Per-channel classification heuristics
//!
//! Each submodule is a pure, total function over a channel record: URL
//! canonicalization, embed-type detection, language inference, and category
//! matching. They share no state and are safe to run per request.

pub mod category;
pub mod embed;
pub mod language;
pub mod url;

// Re-export commonly used entry points for convenience
pub use category::{matches, CategoryQuery};
pub use embed::is_embed_type;
pub use language::{detect_language, VALID_TAGS};
pub use url::normalize_stream_url;
