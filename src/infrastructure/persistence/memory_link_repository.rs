//! In-process implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{LinkRepository, StoreError};

/// Link repository backed by two concurrent hash maps.
///
/// Selected explicitly with `STORAGE_BACKEND=memory`; contents are lost on
/// restart.
///
/// # Locking
///
/// `insert` holds the `original_url` entry while it claims the `code` entry,
/// so both uniqueness checks and both writes happen as one step. Locks are
/// always taken URL map first, code map second. Click increments run under
/// the code entry's write guard.
#[derive(Debug)]
pub struct MemoryLinkRepository {
    by_code: DashMap<String, ShortLink>,
    by_url: DashMap<String, String>,
    next_id: AtomicI64,
    sequence: AtomicU64,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self {
            by_code: DashMap::new(),
            by_url: DashMap::new(),
            next_id: AtomicI64::new(1),
            sequence: AtomicU64::new(0),
        }
    }

    /// Creates a repository with room for `capacity` links.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            by_code: DashMap::with_capacity(capacity),
            by_url: DashMap::with_capacity(capacity),
            next_id: AtomicI64::new(1),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

impl Default for MemoryLinkRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        let NewShortLink { code, original_url } = new_link;

        let url_slot = match self.by_url.entry(original_url.clone()) {
            Entry::Occupied(_) => return Err(StoreError::DuplicateUrl),
            Entry::Vacant(slot) => slot,
        };

        let code_slot = match self.by_code.entry(code.clone()) {
            Entry::Occupied(_) => return Err(StoreError::CodeCollision),
            Entry::Vacant(slot) => slot,
        };

        let link = ShortLink::new(
            self.next_id.fetch_add(1, Ordering::Relaxed),
            code.clone(),
            original_url,
            Utc::now(),
            0,
        );

        code_slot.insert(link.clone());
        url_slot.insert(code);

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, StoreError> {
        Ok(self.by_code.get(code).map(|link| link.clone()))
    }

    async fn find_by_url(&self, original_url: &str) -> Result<Option<ShortLink>, StoreError> {
        let Some(code) = self.by_url.get(original_url).map(|code| code.clone()) else {
            return Ok(None);
        };

        Ok(self.by_code.get(&code).map(|link| link.clone()))
    }

    async fn increment_clicks(&self, code: &str) -> Result<ShortLink, StoreError> {
        let mut link = self.by_code.get_mut(code).ok_or(StoreError::NotFound)?;
        link.clicks += 1;
        Ok(link.clone())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<ShortLink>, StoreError> {
        let mut links: Vec<ShortLink> = self.by_code.iter().map(|e| e.value().clone()).collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(links
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.by_code.len() as i64)
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<i64, StoreError> {
        Ok(self
            .by_code
            .iter()
            .filter(|e| e.value().created_at >= since)
            .count() as i64)
    }

    async fn total_clicks(&self) -> Result<i64, StoreError> {
        Ok(self.by_code.iter().map(|e| e.value().clicks).sum())
    }

    async fn next_sequence(&self) -> Result<u64, StoreError> {
        Ok(self.sequence.fetch_add(1, Ordering::Relaxed) + 1)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
