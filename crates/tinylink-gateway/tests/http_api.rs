use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tinylink_cache::MokaLinkCache;
use tinylink_gateway::{App, AppState};
use tinylink_generator::seq::SeqGenerator;
use tinylink_shortener::ShortenerService;
use tinylink_storage::InMemoryLinkStore;
use tower::util::ServiceExt;

fn test_app() -> Router {
    let service = ShortenerService::new(
        InMemoryLinkStore::new(),
        MokaLinkCache::new(),
        SeqGenerator::new(),
    );
    let state = AppState::new(Arc::new(service), "http://tiny.link");
    App::router(state)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn create_then_redirect_round_trip() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json("/v1/links", json!({"url": "example.com/foo"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    let code = body["code"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 8);
    assert_eq!(body["short_url"], format!("http://tiny.link/{code}"));

    let response = app.oneshot(get(&format!("/{code}"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "example.com/foo");
}

#[tokio::test]
async fn create_then_resolve_as_json() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/v1/links",
            json!({"url": "https://example.com/bar"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let code = json_body(response).await["code"].as_str().unwrap().to_string();

    let response = app.oneshot(get(&format!("/v1/links/{code}"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["url"], "https://example.com/bar");
}

#[tokio::test]
async fn invalid_url_is_rejected_with_bad_request() {
    let app = test_app();

    let response = app
        .oneshot(post_json("/v1/links", json!({"url": "ftp://example.com"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("invalid url"));
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let app = test_app();

    let response = app.oneshot(get("/00000099")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_code_is_rejected_with_bad_request() {
    let app = test_app();

    let response = app.clone().oneshot(get("/v1/links/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.oneshot(get("/not-a-code")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = test_app();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}
