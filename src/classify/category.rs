//! Category matching.
//!
//! A category query is a URL slug. Reserved slugs name site sections rather
//! than content categories and match every channel; the aggregated views
//! short-circuit them instead of filtering. Concrete slugs match by exact
//! category, name substring, or a fixed alias table, as a boolean OR.

use crate::models::ChannelRecord;

const RESERVED_TOKENS: &[&str] = &["all-channels", "about"];
const RESERVED_PREFIXES: &[&str] = &["faq", "privacy", "feedback"];

const RANDOM_TOKEN: &str = "random-channel";

/// Queries on the left also accept the categories on the right. The table is
/// exact and deliberately asymmetric; pairs not listed here do not match.
const CATEGORY_ALIASES: &[(&str, &[&str])] = &[
    ("top news", &["news"]),
    ("news", &["news"]),
    ("movies", &["movies"]),
    ("music", &["music"]),
    ("kids", &["kids", "animation"]),
    ("animation", &["kids", "animation"]),
    ("sports", &["sports"]),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryQuery {
    /// Absent or reserved slug; matches everything.
    Global,
    /// The random-sample slug; matches everything, sampling is applied by
    /// the caller after filtering.
    Random,
    /// A concrete category slug, normalized to lower-case spaced words.
    Slug(String),
}

impl CategoryQuery {
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return CategoryQuery::Global;
        };
        let slug = raw.to_lowercase();
        if slug.is_empty()
            || RESERVED_TOKENS.contains(&slug.as_str())
            || RESERVED_PREFIXES.iter().any(|prefix| slug.starts_with(prefix))
        {
            return CategoryQuery::Global;
        }
        if slug == RANDOM_TOKEN {
            return CategoryQuery::Random;
        }
        CategoryQuery::Slug(normalize_slug(&slug))
    }

    pub fn is_global(&self) -> bool {
        matches!(self, CategoryQuery::Global)
    }

    pub fn is_random(&self) -> bool {
        matches!(self, CategoryQuery::Random)
    }
}

/// Case and hyphen insensitive form used on both the query and the
/// channel's category.
fn normalize_slug(slug: &str) -> String {
    slug.to_lowercase().replace('-', " ")
}

pub fn matches(channel: &ChannelRecord, query: &CategoryQuery) -> bool {
    let wanted = match query {
        CategoryQuery::Global | CategoryQuery::Random => return true,
        CategoryQuery::Slug(slug) => slug.as_str(),
    };

    let category = channel
        .category
        .as_deref()
        .map(normalize_slug)
        .unwrap_or_default();
    if category == wanted {
        return true;
    }
    if channel.name.to_lowercase().contains(wanted) {
        return true;
    }
    CATEGORY_ALIASES
        .iter()
        .any(|(alias, accepted)| *alias == wanted && accepted.contains(&category.as_str()))
}
