//! Consistency properties of the create and resolve protocols, exercised
//! over the in-memory store.

mod common;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::collections::HashSet;
use std::sync::Arc;
use tower::ServiceExt;

use shortlink_core::application::services::LinkService;
use shortlink_core::domain::repositories::LinkRepository;
use shortlink_core::error::AppError;
use shortlink_core::infrastructure::persistence::MemoryLinkRepository;
use shortlink_core::utils::code_generator::{CodeGenerator, CodeStrategy};

#[tokio::test]
async fn test_ten_thousand_links_get_distinct_codes() {
    let (service, repo) = common::memory_service();

    let mut codes = HashSet::new();
    for i in 0..10_000 {
        let outcome = service
            .create_short_link(&format!("https://example.com/page/{i}"))
            .await
            .unwrap();
        assert!(outcome.created);
        codes.insert(outcome.link.code);
    }

    assert_eq!(codes.len(), 10_000);
    assert_eq!(repo.len(), 10_000);
}

#[tokio::test]
async fn test_sequence_strategy_distinct_codes() {
    let repo = Arc::new(MemoryLinkRepository::new());
    let service = common::sequence_service(repo.clone());

    let mut codes = HashSet::new();
    for i in 0..10_000 {
        let outcome = service
            .create_short_link(&format!("https://example.com/seq/{i}"))
            .await
            .unwrap();
        assert!(outcome.link.code.len() >= 6);
        codes.insert(outcome.link.code);
    }

    assert_eq!(codes.len(), 10_000);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_creates_same_url_yield_one_record() {
    let (service, repo) = common::memory_service();

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create_short_link("https://example.com/contended")
                    .await
            })
        })
        .collect();

    let mut codes = HashSet::new();
    let mut created = 0;
    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        if outcome.created {
            created += 1;
        }
        codes.insert(outcome.link.code);
    }

    assert_eq!(codes.len(), 1);
    assert_eq!(created, 1);
    assert_eq!(repo.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_redirects_lose_no_clicks() {
    let (service, repo) = common::memory_service();
    let link = service
        .create_short_link("https://example.com/hot")
        .await
        .unwrap()
        .link;

    let app = common::create_test_app(service, StatusCode::FOUND);

    let handles: Vec<_> = (0..100)
        .map(|_| {
            let app = app.clone();
            let uri = format!("/api/v1/r/{}", link.code);
            tokio::spawn(async move {
                app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
                    .await
                    .unwrap()
                    .status()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::FOUND);
    }

    let stored = repo.find_by_code(&link.code).await.unwrap().unwrap();
    assert_eq!(stored.clicks, 100);
}

#[tokio::test]
async fn test_repeated_create_does_not_count_clicks() {
    let (service, _repo) = common::memory_service();

    let first = service
        .create_short_link("https://example.com/x")
        .await
        .unwrap();
    let second = service
        .create_short_link("https://example.com/x")
        .await
        .unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.link.code, second.link.code);
    assert_eq!(second.link.clicks, 0);
}

#[tokio::test]
async fn test_unknown_code_mutates_nothing() {
    let (service, repo) = common::memory_service();
    service
        .create_short_link("https://example.com/")
        .await
        .unwrap();

    let err = service.resolve("zzzzzzz").await.unwrap_err();

    assert!(matches!(err, AppError::NotFound { .. }));
    assert_eq!(repo.len(), 1);
    assert_eq!(repo.total_clicks().await.unwrap(), 0);
}

#[tokio::test]
async fn test_invalid_url_stores_nothing() {
    let (service, repo) = common::memory_service();

    let err = service.create_short_link("not-a-url").await.unwrap_err();

    assert!(matches!(err, AppError::InvalidUrl { .. }));
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_create_then_resolve_round_trip() {
    let (service, _repo) = common::memory_service();

    for url in [
        "https://example.com/",
        "http://localhost:8080/a/b?c=d",
        "https://example.com/page?q=1#frag",
    ] {
        let link = service.create_short_link(url).await.unwrap().link;
        assert_eq!(service.resolve(&link.code).await.unwrap(), url);
    }
}

/// Generator that always proposes the same code.
struct StuckGenerator;

#[async_trait]
impl CodeGenerator for StuckGenerator {
    fn strategy(&self) -> CodeStrategy {
        CodeStrategy::Random
    }

    async fn generate(&self, _original_url: &str) -> Result<String, AppError> {
        Ok("stuck01".to_string())
    }
}

#[tokio::test]
async fn test_persistent_collisions_fail_allocation() {
    let repo = Arc::new(MemoryLinkRepository::new());
    let service = LinkService::new(repo.clone(), Arc::new(StuckGenerator), 5, common::BASE_URL);

    service
        .create_short_link("https://a.example/")
        .await
        .unwrap();

    let err = service
        .create_short_link("https://b.example/")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::AllocationFailed { .. }));
    assert_eq!(repo.len(), 1);
    assert!(repo.find_by_url("https://b.example/").await.unwrap().is_none());
}
