//! HTTP API tests
//!
//! Exercise every route through `configure_routes` with an in-memory store.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::Value;

use shortkey::api::configure_routes;
use shortkey::api::services::{
    AppStartTime, BackupSettings, SharedFactory, SharedStore, UrlPayload,
};
use shortkey::keygen::{FactoryOptions, HashIdGenerator, KeyFactory};
use shortkey::store::{KeyValueStore, UrlStore};
use tempfile::TempDir;

// =============================================================================
// Test Setup
// =============================================================================

fn shared_state() -> (SharedStore, SharedFactory) {
    let store: SharedStore = Arc::new(UrlStore::in_memory().expect("Failed to create store"));
    let factory: SharedFactory = Arc::new(KeyFactory::with_options(
        HashIdGenerator::default(),
        store.clone(),
        FactoryOptions::default(),
    ));
    (store, factory)
}

macro_rules! api_app {
    ($store:expr, $factory:expr) => {{
        test::init_service(
            App::new()
                .app_data(web::Data::new($store.clone()))
                .app_data(web::Data::new($factory.clone()))
                .app_data(web::Data::new(BackupSettings {
                    filename: "backup.db".to_string(),
                }))
                .app_data(web::Data::new(AppStartTime::now()))
                .configure(configure_routes),
        )
        .await
    }};
}

fn shorten_request(body: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/v1/url/shorten")
        .insert_header(("Content-Type", "application/json"))
        .set_payload(body.to_string())
}

// =============================================================================
// Shorten
// =============================================================================

#[tokio::test]
async fn test_shorten_returns_short_url_and_stores_mapping() {
    let (store, factory) = shared_state();
    let app = api_app!(store, factory);

    let req = shorten_request(r#"{"URL":"https://example.com/long"}"#).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: UrlPayload = test::read_body_json(resp).await;
    assert!(body.url.starts_with("http://"));
    let key = body
        .url
        .rsplit_once("/u/")
        .map(|(_, key)| key.to_string())
        .expect("short url must contain /u/");
    assert_eq!(key.len(), 7);

    assert_eq!(
        store.get(&key).unwrap().as_deref(),
        Some("https://example.com/long")
    );
}

#[tokio::test]
async fn test_shorten_same_url_twice_keeps_one_entry() {
    let (store, factory) = shared_state();
    let app = api_app!(store, factory);

    for _ in 0..2 {
        let req = shorten_request(r#"{"URL":"https://example.com/dup"}"#).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    assert_eq!(store.size().unwrap(), 1);
}

#[tokio::test]
async fn test_shorten_malformed_json_is_bad_request() {
    let (store, factory) = shared_state();
    let app = api_app!(store, factory);

    let req = shorten_request("{not json").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "E006");
    assert_eq!(store.size().unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_missing_url_field_is_bad_request() {
    let (store, factory) = shared_state();
    let app = api_app!(store, factory);

    let req = shorten_request(r#"{"url":"https://example.com"}"#).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shorten_invalid_url_is_bad_request() {
    let (store, factory) = shared_state();
    let app = api_app!(store, factory);

    let req = shorten_request(r#"{"URL":"not a url"}"#).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "E001");
    assert_eq!(store.size().unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_url_with_control_character_is_bad_request() {
    let (store, factory) = shared_state();
    let app = api_app!(store, factory);

    for body in [
        r#"{"URL":"https://example.com/\n"}"#,
        r#"{"URL":" https://ex\tample.com "}"#,
    ] {
        let req = shorten_request(body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
    assert_eq!(store.size().unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_exhausted_generator_is_unavailable() {
    let store: SharedStore = Arc::new(UrlStore::in_memory().unwrap());
    store.set("taken", "https://example.com/taken").unwrap();
    let factory: SharedFactory = Arc::new(KeyFactory::with_options(
        || "taken".to_string(),
        store.clone(),
        FactoryOptions {
            max_attempts: 3,
            ..FactoryOptions::default()
        },
    ));
    let app = api_app!(store, factory);

    let req = shorten_request(r#"{"URL":"https://example.com/new"}"#).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_shorten_rejects_get() {
    let (store, factory) = shared_state();
    let app = api_app!(store, factory);

    let req = TestRequest::get().uri("/api/v1/url/shorten").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// =============================================================================
// Redirect
// =============================================================================

#[tokio::test]
async fn test_redirect_existing_key() {
    let (store, factory) = shared_state();
    store.set("abc1234", "https://example.com/target").unwrap();
    let app = api_app!(store, factory);

    let req = TestRequest::get().uri("/u/abc1234").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = resp.headers().get("Location").unwrap().to_str().unwrap();
    assert_eq!(location, "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_head_request() {
    let (store, factory) = shared_state();
    store.set("head1", "https://example.com/head").unwrap();
    let app = api_app!(store, factory);

    let req = TestRequest::default()
        .method(actix_web::http::Method::HEAD)
        .uri("/u/head1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn test_redirect_unknown_key_is_not_found() {
    let (store, factory) = shared_state();
    let app = api_app!(store, factory);

    let req = TestRequest::get().uri("/u/missing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_shorten_then_redirect() {
    let (store, factory) = shared_state();
    let app = api_app!(store, factory);

    let req = shorten_request(r#"{"URL":"https://example.com/e2e"}"#).to_request();
    let resp = test::call_service(&app, req).await;
    let body: UrlPayload = test::read_body_json(resp).await;
    let (_, key) = body.url.rsplit_once("/u/").unwrap();

    let req = TestRequest::get().uri(&format!("/u/{}", key)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        resp.headers().get("Location").unwrap(),
        "https://example.com/e2e"
    );
}

// =============================================================================
// Backup
// =============================================================================

#[tokio::test]
async fn test_backup_download_headers_and_content() {
    let (store, factory) = shared_state();
    store.set("a", "https://example.com/a").unwrap();
    store.set("b", "https://example.com/b").unwrap();
    let app = api_app!(store, factory);

    let req = TestRequest::get().uri("/api/v1/url/backup").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "application/octet-stream"
    );
    assert_eq!(
        resp.headers().get("Content-Disposition").unwrap(),
        "attachment; filename=\"backup.db\""
    );

    let bytes = test::read_body(resp).await;
    assert!(!bytes.is_empty());

    // 下载内容本身就是一个可打开的数据库文件
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("downloaded.db");
    std::fs::write(&path, &bytes).unwrap();
    let restored = UrlStore::open(&path).unwrap();
    assert_eq!(restored.size().unwrap(), 2);
    assert_eq!(
        restored.get("b").unwrap().as_deref(),
        Some("https://example.com/b")
    );
}

// =============================================================================
// Health & welcome
// =============================================================================

#[tokio::test]
async fn test_health_reports_entry_count() {
    let (store, factory) = shared_state();
    store.set("h", "https://example.com/h").unwrap();
    let app = api_app!(store, factory);

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["entries"], 1);
}

#[tokio::test]
async fn test_liveness() {
    let (store, factory) = shared_state();
    let app = api_app!(store, factory);

    let req = TestRequest::get().uri("/health/live").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_welcome_page() {
    let (store, factory) = shared_state();
    let app = api_app!(store, factory);

    let req = TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("/api/v1/url/shorten"));
}
