//! DTOs for the short URL endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::ShortLink;

/// Default page size for `GET /api/v1/urls`.
pub const DEFAULT_LIMIT: i64 = 50;

/// Largest page size accepted by `GET /api/v1/urls`.
pub const MAX_LIMIT: i64 = 1000;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    #[validate(length(
        min = 1,
        max = 2048,
        message = "original_url must be between 1 and 2048 characters"
    ))]
    pub original_url: String,
}

/// A short link as returned by the API.
#[derive(Debug, Serialize, Deserialize)]
pub struct UrlResponse {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
}

impl UrlResponse {
    /// Builds the response for `link`; `short_url` is computed by the caller.
    pub fn new(link: ShortLink, short_url: String) -> Self {
        Self {
            id: link.id,
            original_url: link.original_url,
            short_code: link.code,
            short_url,
            created_at: link.created_at,
            clicks: link.clicks,
        }
    }
}

/// One page of short links plus the total count.
#[derive(Debug, Serialize, Deserialize)]
pub struct UrlListResponse {
    pub urls: Vec<UrlResponse>,
    pub total: i64,
}

/// Paging query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub limit: Option<i64>,

    #[serde(default)]
    pub offset: Option<i64>,
}

impl ListParams {
    /// Validates the parameters and applies defaults.
    ///
    /// # Defaults
    ///
    /// - `limit`: 50
    /// - `offset`: 0
    ///
    /// # Returns
    ///
    /// `(limit, offset)` tuple for the store.
    pub fn validate_and_get_limit_offset(&self) -> Result<(i64, i64), String> {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        let offset = self.offset.unwrap_or(0);

        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(format!("limit must be between 1 and {MAX_LIMIT}"));
        }

        if offset < 0 {
            return Err("offset must not be negative".to_string());
        }

        Ok((limit, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(limit: Option<i64>, offset: Option<i64>) -> ListParams {
        ListParams { limit, offset }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(
            params(None, None).validate_and_get_limit_offset().unwrap(),
            (50, 0)
        );
    }

    #[test]
    fn test_custom_values() {
        assert_eq!(
            params(Some(10), Some(30))
                .validate_and_get_limit_offset()
                .unwrap(),
            (10, 30)
        );
    }

    #[test]
    fn test_limit_bounds() {
        assert!(params(Some(0), None).validate_and_get_limit_offset().is_err());
        assert!(params(Some(1), None).validate_and_get_limit_offset().is_ok());
        assert!(params(Some(1000), None).validate_and_get_limit_offset().is_ok());
        assert!(params(Some(1001), None).validate_and_get_limit_offset().is_err());
    }

    #[test]
    fn test_negative_offset_is_error() {
        assert!(params(None, Some(-1)).validate_and_get_limit_offset().is_err());
    }

    #[test]
    fn test_create_request_length_validation() {
        let empty = CreateUrlRequest {
            original_url: String::new(),
        };
        assert!(empty.validate().is_err());

        let too_long = CreateUrlRequest {
            original_url: format!("https://example.com/{}", "a".repeat(2048)),
        };
        assert!(too_long.validate().is_err());

        let ok = CreateUrlRequest {
            original_url: "https://example.com/".to_string(),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_url_response_maps_fields() {
        let created_at = Utc::now();
        let link = ShortLink::new(3, "abc1234".into(), "https://e.example/".into(), created_at, 9);

        let response = UrlResponse::new(link, "http://s.example/abc1234".into());

        assert_eq!(response.id, 3);
        assert_eq!(response.short_code, "abc1234");
        assert_eq!(response.short_url, "http://s.example/abc1234");
        assert_eq!(response.original_url, "https://e.example/");
        assert_eq!(response.created_at, created_at);
        assert_eq!(response.clicks, 9);
    }
}
