#![allow(dead_code)]

use axum::Router;
use axum::http::StatusCode;
use axum_test::TestServer;
use sqlx::PgPool;
use std::sync::Arc;

use shortlink_core::application::services::LinkService;
use shortlink_core::application::services::link_service::DEFAULT_MAX_ATTEMPTS;
use shortlink_core::domain::repositories::LinkRepository;
use shortlink_core::infrastructure::persistence::{MemoryLinkRepository, PgLinkRepository};
use shortlink_core::routes::app_router;
use shortlink_core::state::AppState;
use shortlink_core::utils::code_generator::{RandomCodeGenerator, SequenceCodeGenerator};

pub const BASE_URL: &str = "http://sho.rt";

pub fn random_service(repo: Arc<dyn LinkRepository>) -> Arc<LinkService> {
    Arc::new(LinkService::new(
        repo,
        Arc::new(RandomCodeGenerator::new(7)),
        DEFAULT_MAX_ATTEMPTS,
        BASE_URL,
    ))
}

pub fn sequence_service(repo: Arc<dyn LinkRepository>) -> Arc<LinkService> {
    Arc::new(LinkService::new(
        repo.clone(),
        Arc::new(SequenceCodeGenerator::new(repo, 6)),
        DEFAULT_MAX_ATTEMPTS,
        BASE_URL,
    ))
}

pub fn memory_service() -> (Arc<LinkService>, Arc<MemoryLinkRepository>) {
    let repo = Arc::new(MemoryLinkRepository::new());
    (random_service(repo.clone()), repo)
}

pub fn create_test_app(service: Arc<LinkService>, redirect_status: StatusCode) -> Router {
    app_router(
        AppState::new(service, redirect_status),
        &["*".to_string()],
    )
}

/// Full application over a fresh in-memory store.
pub fn create_test_server() -> (TestServer, Arc<MemoryLinkRepository>) {
    let (service, repo) = memory_service();
    let server = TestServer::new(create_test_app(service, StatusCode::FOUND)).unwrap();
    (server, repo)
}

pub fn create_pg_state(pool: PgPool) -> AppState {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    AppState::new(random_service(repo), StatusCode::FOUND)
}
