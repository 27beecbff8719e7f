//! Link preview responder against a fake data service.

mod common;

use std::time::Duration;

use common::{FakeBackend, FakeData, client, config, jane, start_app};
use serde_json::json;

async fn get(url: &str) -> (u16, reqwest::header::HeaderMap, String) {
    let response = client().get(url).send().await.unwrap();
    let status = response.status().as_u16();
    let headers = response.headers().clone();
    (status, headers, response.text().await.unwrap())
}

#[tokio::test]
async fn published_card_fills_preview_tags() {
    let backend = FakeBackend::start(FakeData::default().with_rows("business_cards", json!([jane()]))).await;
    let app = start_app(config(Some(backend.credentials()))).await;

    let (status, headers, body) = get(&format!("{app}/c/acme-jane")).await;

    assert_eq!(status, 200);
    assert_eq!(headers["content-type"], "text/html; charset=utf-8");
    assert_eq!(headers["cache-control"], "public, max-age=60");
    assert!(headers.contains_key("etag"));
    assert!(body.contains(r#"property="og:title" content="Jane Doe""#));
    assert!(body.contains(r#"property="og:description" content="CEO at Acme""#));
    assert!(body.contains(r#"property="og:image" content="https://cdn.test/jane.png""#));
    assert!(body.contains(r#"property="og:url" content="https://businesscardsscc.vercel.app/c/acme-jane""#));
    assert!(body.contains(r#"window.location.replace("https://businesscardsscc.vercel.app/c/acme-jane")"#));
    assert_eq!(backend.observed.total(), 1);
}

#[tokio::test]
async fn every_legacy_path_answers_the_same() {
    let backend = FakeBackend::start(FakeData::default().with_rows("business_cards", json!([jane()]))).await;
    let app = start_app(config(Some(backend.credentials()))).await;

    for path in ["/c?slug=acme-jane", "/api/c?slug=acme-jane", "/api/c/acme-jane", "/api/og/acme-jane"] {
        let (status, _, body) = get(&format!("{app}{path}")).await;
        assert_eq!(status, 200, "{path}");
        assert!(body.contains(r#"content="CEO at Acme""#), "{path}");
    }
}

#[tokio::test]
async fn unknown_slug_gets_default_metadata() {
    let backend = FakeBackend::start(FakeData::default().with_rows("business_cards", json!([jane()]))).await;
    let app = start_app(config(Some(backend.credentials()))).await;

    let (status, _, body) = get(&format!("{app}/c/ghost")).await;

    assert_eq!(status, 200);
    assert!(body.contains("<title>Digital Business Card Builder - SCC Infotech LLP</title>"));
    assert!(body.contains(r#"content="https://businesscardsscc.vercel.app/DBCLOGO_2.png""#));
    assert!(body.contains(r#"property="og:url" content="https://businesscardsscc.vercel.app/c/ghost""#));
}

#[tokio::test]
async fn unpublished_card_is_not_previewed() {
    let mut draft = jane();
    draft["is_published"] = json!(false);
    let backend = FakeBackend::start(FakeData::default().with_rows("business_cards", json!([draft]))).await;
    let app = start_app(config(Some(backend.credentials()))).await;

    let (status, _, body) = get(&format!("{app}/c/acme-jane")).await;

    assert_eq!(status, 200);
    assert!(!body.contains("Jane Doe"));
}

#[tokio::test]
async fn hostile_card_text_is_escaped() {
    let mut card = jane();
    card["title"] = json!("<script>alert(1)</script>");
    let backend = FakeBackend::start(FakeData::default().with_rows("business_cards", json!([card]))).await;
    let app = start_app(config(Some(backend.credentials()))).await;

    let (_, _, body) = get(&format!("{app}/c/acme-jane")).await;

    assert!(body.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    // Only the redirect script remains.
    assert_eq!(body.matches("<script>").count(), 1);
}

#[tokio::test]
async fn missing_slug_serves_fallback_without_redirect() {
    let app = start_app(config(None)).await;

    let (status, _, body) = get(&format!("{app}/c")).await;

    assert_eq!(status, 200);
    assert!(body.contains("<title>Digital Business Card Builder - SCC Infotech LLP</title>"));
    assert!(body.contains(r#"name="twitter:site" content="@sccinfotech""#));
    assert!(!body.contains("window.location.replace"));
    assert!(!body.contains("http-equiv"));
}

#[tokio::test]
async fn missing_credentials_is_a_server_error() {
    let app = start_app(config(None)).await;

    let (status, _, body) = get(&format!("{app}/c/acme-jane")).await;

    assert_eq!(status, 500);
    assert!(body.contains("missing Supabase env vars"));
}

#[tokio::test]
async fn upstream_error_falls_back() {
    let backend = FakeBackend::start(
        FakeData::default()
            .with_rows("business_cards", json!([jane()]))
            .failing("business_cards"),
    )
    .await;
    let app = start_app(config(Some(backend.credentials()))).await;

    let (status, _, body) = get(&format!("{app}/c/acme-jane")).await;

    assert_eq!(status, 200);
    assert!(body.contains("<title>Digital Business Card Builder - SCC Infotech LLP</title>"));
    assert!(body.contains("/c/acme-jane"));
}

#[tokio::test]
async fn slow_upstream_falls_back_after_timeout() {
    let backend = FakeBackend::start(FakeData {
        card_delay: Some(Duration::from_secs(5)),
        ..FakeData::default().with_rows("business_cards", json!([jane()]))
    })
    .await;
    let mut config = config(Some(backend.credentials()));
    config.lookup_timeout = Duration::from_millis(200);
    let app = start_app(config).await;

    let started = std::time::Instant::now();
    let (status, _, body) = get(&format!("{app}/c/acme-jane")).await;

    assert_eq!(status, 200);
    assert!(started.elapsed() < Duration::from_secs(3));
    assert!(!body.contains("Jane Doe"));
    assert!(body.contains("<title>Digital Business Card Builder - SCC Infotech LLP</title>"));
}

#[tokio::test]
async fn responder_never_records_views() {
    let backend = FakeBackend::start(FakeData::default().with_rows("business_cards", json!([jane()]))).await;
    let app = start_app(config(Some(backend.credentials()))).await;

    get(&format!("{app}/c/acme-jane")).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(backend.observed.inserts().is_empty());
    assert!(backend.observed.patches().is_empty());
}

#[tokio::test]
async fn health_reports_data_service() {
    let app = start_app(config(None)).await;
    let body: serde_json::Value = client()
        .get(format!("{app}/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "dbcard-preview");
    assert_eq!(body["data_service"], false);
}
