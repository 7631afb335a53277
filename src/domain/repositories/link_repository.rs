//! Repository trait for the short link mapping store.

use crate::domain::entities::{NewShortLink, ShortLink};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Errors reported by a [`LinkRepository`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Another link already owns this code.
    #[error("short code already exists")]
    CodeCollision,

    /// Another link already maps this original URL.
    #[error("original URL is already shortened")]
    DuplicateUrl,

    #[error("short link not found")]
    NotFound,

    /// The backing store cannot be reached (pool exhausted, connection lost).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("database error: {0}")]
    Database(String),
}

/// Mapping store for short links.
///
/// Implementations must be safe for concurrent use from many request
/// handlers. Uniqueness of `code` and of `original_url` is enforced by the
/// store itself inside [`LinkRepository::insert`]; callers never pre-check
/// and insert as two separate steps.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Atomically inserts a new link.
    ///
    /// # Errors
    ///
    /// - [`StoreError::CodeCollision`] if `code` already exists
    /// - [`StoreError::DuplicateUrl`] if `original_url` already exists
    ///
    /// When both keys clash either error may be reported; the in-memory
    /// store reports `DuplicateUrl`.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError>;

    /// Point lookup by short code. This is the redirect hot path.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, StoreError>;

    /// Exact-match lookup by original URL, used for idempotent creates.
    async fn find_by_url(&self, original_url: &str) -> Result<Option<ShortLink>, StoreError>;

    /// Atomically adds one to the click counter and returns the link as it
    /// is after the increment.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no link owns `code`; the store is
    /// left untouched in that case.
    async fn increment_clicks(&self, code: &str) -> Result<ShortLink, StoreError>;

    /// Lists links, newest first.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<ShortLink>, StoreError>;

    /// Counts all stored links.
    async fn count(&self) -> Result<i64, StoreError>;

    /// Counts links created at or after `since`.
    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<i64, StoreError>;

    /// Sums the click counters of all links.
    async fn total_clicks(&self) -> Result<i64, StoreError>;

    /// Draws the next value of the store's monotonic counter (starts at 1).
    async fn next_sequence(&self) -> Result<u64, StoreError>;

    /// Checks that the backing store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
