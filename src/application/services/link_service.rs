//! Short link creation and resolution service.

use std::sync::Arc;

use chrono::{NaiveTime, Utc};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{LinkRepository, StoreError};
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, CodeStrategy, is_reserved, is_valid_code};
use crate::utils::url_normalizer::normalize_url;

/// Default number of codes tried before a create gives up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Result of a create request.
#[derive(Debug, Clone)]
pub struct CreateOutcome {
    pub link: ShortLink,
    /// `false` when an existing link for the same URL was returned.
    pub created: bool,
}

/// Aggregate counters over all links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStats {
    pub total_urls: i64,
    pub urls_created_today: i64,
    pub total_clicks: i64,
}

/// Service for creating, resolving and listing short links.
///
/// # Create protocol
///
/// 1. Validate and normalize the URL
/// 2. Return the existing link if the URL is already shortened
/// 3. Generate a code and insert atomically
/// 4. On a code collision, regenerate (random strategy) up to `max_attempts`
///    times; with the sequence strategy a collision is fatal
/// 5. If another request inserted the same URL first, re-read and return
///    its link
///
/// # Resolve protocol
///
/// Look up the code, increment its click counter exactly once, and return
/// the original URL.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    generator: Arc<dyn CodeGenerator>,
    max_attempts: usize,
    public_base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `public_base_url` is the prefix of every `short_url`; a trailing slash
    /// is ignored. `max_attempts` is raised to at least one.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        generator: Arc<dyn CodeGenerator>,
        max_attempts: usize,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            generator,
            max_attempts: max_attempts.max(1),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Creates a short link, or returns the existing one for the same URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] if the input is not an absolute
    /// `http`/`https` URL; nothing is stored in that case.
    ///
    /// Returns [`AppError::AllocationFailed`] if no unique code was found
    /// within `max_attempts` tries, or the sequence strategy collided.
    pub async fn create_short_link(&self, original_url: &str) -> Result<CreateOutcome, AppError> {
        let normalized = normalize_url(original_url).map_err(|e| {
            AppError::invalid_url(e.to_string(), json!({ "original_url": original_url }))
        })?;

        if let Some(existing) = self.repository.find_by_url(&normalized).await? {
            debug!(code = %existing.code, "URL already shortened");
            return Ok(CreateOutcome {
                link: existing,
                created: false,
            });
        }

        let strategy = self.generator.strategy();

        for attempt in 1..=self.max_attempts {
            let code = self.generator.generate(&normalized).await?;

            if is_reserved(&code) {
                debug!(attempt, code, "Generated code is reserved, regenerating");
                continue;
            }

            match self
                .repository
                .insert(NewShortLink::new(code.clone(), normalized.clone()))
                .await
            {
                Ok(link) => {
                    info!(code = %link.code, url = %link.original_url, "Created short link");
                    return Ok(CreateOutcome {
                        link,
                        created: true,
                    });
                }
                Err(StoreError::DuplicateUrl) => {
                    debug!("Lost create race for URL, returning the stored link");
                    return self.read_existing(&normalized).await;
                }
                Err(StoreError::CodeCollision) if strategy == CodeStrategy::Sequence => {
                    return Err(AppError::allocation_failed(
                        "Failed to allocate a short code",
                        json!({ "reason": "sequence produced an existing code", "code": code }),
                    ));
                }
                Err(StoreError::CodeCollision) => {
                    warn!(attempt, code, "Short code collision, regenerating");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::allocation_failed(
            "Failed to allocate a short code",
            json!({ "reason": "too many collisions", "attempts": self.max_attempts }),
        ))
    }

    /// Resolves a code for a redirect and counts the click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link owns `code`; the store is
    /// not modified in that case.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let link = self.get_link_by_code(code).await?;

        let link = self.repository.increment_clicks(&link.code).await?;
        debug!(code = %link.code, clicks = link.clicks, "Resolved short link");

        Ok(link.original_url)
    }

    /// Retrieves a link by its code without counting a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    pub async fn get_link_by_code(&self, code: &str) -> Result<ShortLink, AppError> {
        if !is_valid_code(code) {
            return Err(not_found(code));
        }

        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| not_found(code))
    }

    /// Lists links newest first, together with the total number of links.
    pub async fn list_links(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ShortLink>, i64), AppError> {
        let (links, total) = tokio::try_join!(
            self.repository.list(limit, offset),
            self.repository.count()
        )?;

        Ok((links, total))
    }

    /// Computes aggregate counters. "Today" starts at 00:00 UTC.
    pub async fn stats(&self) -> Result<LinkStats, AppError> {
        let today = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();

        let (total_urls, urls_created_today, total_clicks) = tokio::try_join!(
            self.repository.count(),
            self.repository.count_created_since(today),
            self.repository.total_clicks()
        )?;

        Ok(LinkStats {
            total_urls,
            urls_created_today,
            total_clicks,
        })
    }

    /// Checks that the mapping store is reachable.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await.map_err(Into::into)
    }

    /// Constructs the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.public_base_url, code)
    }

    pub fn strategy(&self) -> CodeStrategy {
        self.generator.strategy()
    }

    async fn read_existing(&self, normalized: &str) -> Result<CreateOutcome, AppError> {
        match self.repository.find_by_url(normalized).await? {
            Some(link) => Ok(CreateOutcome {
                link,
                created: false,
            }),
            None => Err(AppError::internal(
                "Failed to create short link",
                json!({ "reason": "duplicate URL reported but no stored link found" }),
            )),
        }
    }
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("URL not found", json!({ "short_code": code }))
}
