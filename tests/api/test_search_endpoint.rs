// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! End-to-end tests for GET /api/search and GET /health
//!
//! The search provider, dictionary and encyclopedia are served by one
//! wiremock server; requests go through the real router via `oneshot`.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use nilch_search::{
    api::http_server::{create_app, create_app_with_cors, AppState},
    search::SearchConfig,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`
use wiremock::matchers::{header as header_is, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, keys: &[&str]) -> SearchConfig {
    let mut config = SearchConfig::default();
    config.providers.brave_api_keys = keys.iter().map(|k| k.to_string()).collect();
    config.providers.brave_base_url = format!("{}/res/v1", server.uri());
    config.providers.wiktionary_base_url = format!("{}/definition", server.uri());
    config.providers.wikipedia_base_url = format!("{}/summary", server.uri());
    config
}

fn app_for(server: &MockServer, keys: &[&str]) -> Router {
    let state = AppState::from_config(&config_for(server, keys)).unwrap();
    create_app(Arc::new(state))
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

fn web_payload(results: Value) -> Value {
    json!({"type": "search", "web": {"type": "search", "results": results}})
}

#[tokio::test]
async fn test_missing_query_returns_noquery() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = get_json(app_for(&server, &["k1"]), "/api/search").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("noquery"));
}

#[tokio::test]
async fn test_calc_query_with_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/res/v1/web/search"))
        .and(query_param("q", "2+2"))
        .and(query_param("safesearch", "strict"))
        .and(query_param("count", "10"))
        .and(query_param("offset", "0"))
        .and(header_is("X-Subscription-Token", "k1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(web_payload(json!([
            {"title": "Four", "url": "https://example.com/four"}
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get_json(app_for(&server, &["k1"]), "/api/search?q=2%2B2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "infobox": {"infotype": "calc", "equ": "2+2", "result": "4"},
            "results": [{"title": "Four", "url": "https://example.com/four"}]
        })
    );
}

#[tokio::test]
async fn test_repeated_search_is_served_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/res/v1/web/search"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(web_payload(json!([{"title": "a"}]))))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_for(&server, &["k1"]);
    let (_, first) = get_json(app.clone(), "/api/search?q=hello+world").await;
    let (_, second) = get_json(app.clone(), "/api/search?q=hello+world").await;
    assert_eq!(first, second);
    assert_eq!(second["infobox"], json!("null"));

    // Different page is a different search
    Mock::given(method("GET"))
        .and(path("/res/v1/web/search"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(web_payload(json!([{"title": "b"}]))))
        .expect(1)
        .mount(&server)
        .await;
    let (_, paged) = get_json(app, "/api/search?q=hello+world&page=2").await;
    assert_eq!(paged["results"], json!([{"title": "b"}]));
}

#[tokio::test]
async fn test_wikipedia_infobox_from_second_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/res/v1/web/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(web_payload(json!([
            {"title": "Rust Foundation", "url": "https://foundation.rust-lang.org"},
            {"title": "Rust (programming language) - Wikipedia", "url": "https://en.wikipedia.org/wiki/Rust_(programming_language)"},
            {"title": "The Rust Book", "url": "https://doc.rust-lang.org/book"}
        ]))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/summary/Rust_(programming_language)"))
        .and(header_is("user-agent", "nilch/1.0 (jake.stbu@gmail.com)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Rust (programming language)",
            "extract": "Rust is a general-purpose programming language.",
            "content_urls": {"desktop": {"page": "https://en.wikipedia.org/wiki/Rust_(programming_language)"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_, body) = get_json(app_for(&server, &["k1"]), "/api/search?q=rust+language").await;
    assert_eq!(
        body["infobox"],
        json!({
            "infotype": "wikipedia",
            "title": "Rust (programming language)",
            "info": "Rust is a general-purpose programming language.",
            "url": "https://en.wikipedia.org/wiki/Rust_(programming_language)"
        })
    );
    assert_eq!(body["results"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_video_search_skips_infobox() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/res/v1/videos/search"))
        .and(query_param("safesearch", "off"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "videos",
            "results": [{"title": "Two plus two", "url": "https://videos.example/1"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_, body) = get_json(
        app_for(&server, &["k1"]),
        "/api/search?q=2%2B2&videos=true&safe=off",
    )
    .await;
    assert_eq!(body["infobox"], json!("null"));
    assert_eq!(body["results"][0]["title"], "Two plus two");
}

#[tokio::test]
async fn test_exhausted_keys_return_noresults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/res/v1/web/search"))
        .respond_with(ResponseTemplate::new(429))
        .expect(2)
        .mount(&server)
        .await;

    let (status, body) = get_json(app_for(&server, &["k1", "k2"]), "/api/search?q=rust").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("noresults"));
}

#[tokio::test]
async fn test_unknown_safe_value_is_strict() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/res/v1/web/search"))
        .and(query_param("safesearch", "strict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(web_payload(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let (_, body) = get_json(app_for(&server, &["k1"]), "/api/search?q=news&safe=extreme").await;
    assert_eq!(body["results"], json!([]));
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = MockServer::start().await;
    let (status, body) = get_json(app_for(&server, &["k1", "k2"]), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], nilch_search::version::VERSION_NUMBER);
    assert_eq!(body["upstream"], true);
    assert_eq!(body["cache"], json!({"entries": 0, "capacity": 20}));
    assert_eq!(body["credentials"], 2);

    let (_, body) = get_json(app_for(&server, &[]), "/health").await;
    assert_eq!(body["upstream"], false);
    assert_eq!(body["credentials"], 0);
}

#[tokio::test]
async fn test_version_endpoint() {
    let server = MockServer::start().await;
    let (status, body) = get_json(app_for(&server, &["k1"]), "/version").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], nilch_search::version::VERSION_NUMBER);
    assert_eq!(body["build"], nilch_search::version::VERSION);
    assert!(body["features"]
        .as_array()
        .unwrap()
        .iter()
        .any(|f| f == "infobox-wikipedia"));
}

#[tokio::test]
async fn test_cors_headers() {
    let server = MockServer::start().await;
    let config = config_for(&server, &["k1"]);

    let request = |origin: &str| {
        Request::builder()
            .method(Method::GET)
            .uri("/health")
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .unwrap()
    };

    let open = create_app(Arc::new(AppState::from_config(&config).unwrap()));
    let response = open.oneshot(request("http://anywhere.example")).await.unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );

    let restricted = create_app_with_cors(
        Arc::new(AppState::from_config(&config).unwrap()),
        &["https://nilch.org".to_string()],
    );
    let response = restricted
        .clone()
        .oneshot(request("https://nilch.org"))
        .await
        .unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "https://nilch.org"
    );

    let response = restricted.oneshot(request("https://evil.example")).await.unwrap();
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
