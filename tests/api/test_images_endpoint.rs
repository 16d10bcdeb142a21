// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! End-to-end tests for GET /api/images

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use nilch_search::{
    api::http_server::{create_app, AppState},
    search::SearchConfig,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_for(server: &MockServer, keys: &[&str]) -> Router {
    let mut config = SearchConfig::default();
    config.providers.brave_api_keys = keys.iter().map(|k| k.to_string()).collect();
    config.providers.brave_base_url = format!("{}/res/v1", server.uri());
    create_app(Arc::new(AppState::from_config(&config).unwrap()))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_missing_query_returns_noquery() {
    let server = MockServer::start().await;
    let (status, body) = get_json(app_for(&server, &["k1"]), "/api/images?safe=off").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("noquery"));
}

#[tokio::test]
async fn test_images_are_projected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/res/v1/images/search"))
        .and(query_param("q", "cats"))
        .and(query_param("safesearch", "moderate"))
        .and(header("X-Subscription-Token", "k1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "images",
            "results": [
                {"title": "Cat", "url": "https://cats.example/1", "thumbnail": {"src": "https://imgs.example/1.jpg"}},
                {"title": "No thumbnail", "url": "https://cats.example/2"},
                {"title": "Cat 3", "url": "https://cats.example/3", "thumbnail": {"src": "https://imgs.example/3.jpg"}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_, body) = get_json(app_for(&server, &["k1"]), "/api/images?q=cats&safe=MODERATE").await;
    assert_eq!(
        body,
        json!([
            {"url": "https://cats.example/1", "img": "https://imgs.example/1.jpg"},
            {"url": "https://cats.example/3", "img": "https://imgs.example/3.jpg"}
        ])
    );
}

#[tokio::test]
async fn test_images_are_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/res/v1/images/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(2)
        .mount(&server)
        .await;

    let app = app_for(&server, &["k1"]);
    let (_, first) = get_json(app.clone(), "/api/images?q=dogs").await;
    let (_, second) = get_json(app, "/api/images?q=dogs").await;
    assert_eq!(first, json!([]));
    assert_eq!(second, json!([]));
}

#[tokio::test]
async fn test_no_keys_returns_noresults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (_, body) = get_json(app_for(&server, &[]), "/api/images?q=cats").await;
    assert_eq!(body, json!("noresults"));
}
