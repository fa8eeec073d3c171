use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use tinylink_deriver::Sha256Deriver;
use tinylink_gateway::{App, AppState};
use tinylink_shortener::ShortenerService;
use tinylink_storage::{RedisMappingStore, RedisStoreConfig, RetryPolicy, RetryingStore};
use tinylink_test_infra::redis::{RedisConfig, RedisServer};
use tower::util::ServiceExt;

#[tokio::test]
async fn shorten_and_expand_against_redis() {
    let redis = RedisServer::new(RedisConfig::default())
        .await
        .expect("start redis");
    let config = RedisStoreConfig::builder()
        .address(redis.address().await.unwrap())
        .build();
    let store = RedisMappingStore::connect(&config).await.unwrap();
    let store = RetryingStore::new(store, RetryPolicy::with_retries(2));
    let shortener = ShortenerService::new(store, Sha256Deriver::new());
    let app = App::router(AppState::new(Arc::new(shortener), "http://sho.rt"));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/shorten")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("url=https%3A%2F%2Fexample.com%2Fpage"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"http://sho.rt/NkHF8i");

    let request = Request::builder()
        .uri("/NkHF8i")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://example.com/page"
    );

    let request = Request::builder()
        .uri("/unknowntoken123")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
