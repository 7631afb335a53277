//! Shared application state injected into every handler.

use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::services::LinkService;

/// State shared by all request handlers.
///
/// Cheap to clone; every field is reference counted or `Copy`.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    /// Status used for redirect responses (301 or 302).
    pub redirect_status: StatusCode,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService>, redirect_status: StatusCode) -> Self {
        Self {
            link_service,
            redirect_status,
        }
    }
}
