//! ShortLink entity representing a code to URL mapping.

use chrono::{DateTime, Utc};

/// A stored short link with its click counter.
///
/// `id`, `code`, `original_url` and `created_at` never change after creation.
/// `clicks` only grows, and only through a successful redirect resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        id: i64,
        code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        clicks: i64,
    ) -> Self {
        Self {
            id,
            code,
            original_url,
            created_at,
            clicks,
        }
    }
}

/// Input data for inserting a new short link.
///
/// The store assigns `id` and `created_at`; `clicks` always starts at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub code: String,
    pub original_url: String,
}

impl NewShortLink {
    pub fn new(code: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            original_url: original_url.into(),
        }
    }
}
