mod common;

use serde_json::json;
use shortlink_core::api::dto::stats::StatsResponse;
use shortlink_core::api::dto::url::UrlResponse;

#[tokio::test]
async fn test_stats_empty() {
    let (server, _repo) = common::create_test_server();

    let response = server.get("/api/v1/stats").await;

    assert_eq!(response.status_code(), 200);

    let body: StatsResponse = response.json();
    assert_eq!(body.total_urls, 0);
    assert_eq!(body.urls_created_today, 0);
    assert_eq!(body.total_clicks, 0);
}

#[tokio::test]
async fn test_stats_counts_links_and_clicks() {
    let (server, _repo) = common::create_test_server();

    let a: UrlResponse = server
        .post("/api/v1/urls/")
        .json(&json!({ "original_url": "https://a.example/" }))
        .await
        .json();
    server
        .post("/api/v1/urls/")
        .json(&json!({ "original_url": "https://b.example/" }))
        .await;

    for _ in 0..3 {
        server.get(&format!("/{}", a.short_code)).await;
    }

    let body: StatsResponse = server.get("/api/v1/stats").await.json();
    assert_eq!(body.total_urls, 2);
    assert_eq!(body.urls_created_today, 2);
    assert_eq!(body.total_clicks, 3);
}
