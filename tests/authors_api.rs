mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use common::{app, body_json, empty_request, FailingQueries, MemoryQueries};

#[tokio::test]
async fn list_authors_wraps_collection() {
    let store = Arc::new(MemoryQueries::seeded());
    let resp = app(store.clone())
        .oneshot(empty_request("GET", "/api/v1/authors"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(
        body["authors"][0],
        json!({"id": 1, "name": "Frank Herbert", "bio": "American science-fiction author"})
    );
    assert!(body["authors"][1]["bio"].is_null());
    assert_eq!(store.calls(), 1);
}

#[tokio::test]
async fn list_authors_storage_failure_returns_500() {
    let resp = app(Arc::new(FailingQueries))
        .oneshot(empty_request("GET", "/api/v1/authors"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(resp).await,
        json!({"message": "Failed fetching list of authors"})
    );
}

#[tokio::test]
async fn author_stats_aggregate_books() {
    let store = Arc::new(MemoryQueries::seeded());
    let resp = app(store)
        .oneshot(empty_request("GET", "/api/v1/authors/1/stats"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "stats": {
                "author_id": 1,
                "name": "Frank Herbert",
                "book_count": 2,
                "average_price": "14.25",
                "latest_published": "1969-10-15"
            }
        })
    );
}

#[tokio::test]
async fn author_stats_without_books_has_null_aggregates() {
    let store = Arc::new(MemoryQueries::seeded());
    let resp = app(store)
        .oneshot(empty_request("GET", "/api/v1/authors/2/stats"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["stats"]["book_count"], 0);
    assert!(body["stats"]["average_price"].is_null());
}

#[tokio::test]
async fn author_stats_for_unknown_author_is_a_server_error() {
    let store = Arc::new(MemoryQueries::seeded());
    let resp = app(store)
        .oneshot(empty_request("GET", "/api/v1/authors/999/stats"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(resp).await, json!({"message": "no rows in result set"}));
}

#[tokio::test]
async fn author_stats_storage_failure_returns_raw_error() {
    let resp = app(Arc::new(FailingQueries))
        .oneshot(empty_request("GET", "/api/v1/authors/1/stats"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(resp).await["message"],
        sqlx::Error::PoolTimedOut.to_string()
    );
}

#[tokio::test]
async fn openapi_document_lists_every_route() {
    let resp = app(Arc::new(FailingQueries))
        .oneshot(empty_request("GET", "/docs/openapi.json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let doc = body_json(resp).await;
    for path in [
        "/api/v1/authors",
        "/api/v1/authors/{id}/stats",
        "/api/v1/books",
        "/api/v1/books/{id}",
    ] {
        assert!(doc["paths"].get(path).is_some(), "missing {path}");
    }
}
