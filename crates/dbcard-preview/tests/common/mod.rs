//! Shared harness for integration tests: an in-process stand-in for the
//! hosted REST data service plus a running preview server.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use dbcard_core::Credentials;
use dbcard_preview::{AppState, Config, router};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::Notify;

pub const ANON_KEY: &str = "test-anon-key";

/// Rows and failure modes served by the fake data service.
#[derive(Default)]
pub struct FakeData {
    /// Rows per table name.
    pub rows: HashMap<String, Vec<Value>>,
    /// Tables whose reads answer 500.
    pub failing: HashSet<String>,
    /// Delay before answering `business_cards` reads.
    pub card_delay: Option<Duration>,
    /// When set, analytics inserts wait for this before answering.
    pub insert_gate: Option<Arc<Notify>>,
    /// Answer analytics inserts with 403, as a row-level-security denial would.
    pub reject_inserts: bool,
}

impl FakeData {
    pub fn with_rows(mut self, table: &str, rows: Value) -> Self {
        let rows = rows.as_array().cloned().unwrap_or_default();
        self.rows.insert(table.to_string(), rows);
        self
    }

    pub fn failing(mut self, table: &str) -> Self {
        self.failing.insert(table.to_string());
        self
    }
}

/// Requests observed by the fake data service.
#[derive(Default)]
pub struct Observed {
    pub reads: Mutex<Vec<String>>,
    pub inserts: Mutex<Vec<Value>>,
    pub patches: Mutex<Vec<(String, Value)>>,
    pub total: AtomicUsize,
}

impl Observed {
    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    pub fn inserts(&self) -> Vec<Value> {
        self.inserts.lock().unwrap().clone()
    }

    pub fn patches(&self) -> Vec<(String, Value)> {
        self.patches.lock().unwrap().clone()
    }
}

struct Fake {
    data: FakeData,
    observed: Arc<Observed>,
}

/// A running fake data service.
pub struct FakeBackend {
    pub url: String,
    pub observed: Arc<Observed>,
}

impl FakeBackend {
    pub async fn start(data: FakeData) -> Self {
        let observed = Arc::new(Observed::default());
        let fake = Arc::new(Fake {
            data,
            observed: observed.clone(),
        });

        let app = Router::new()
            .route(
                "/rest/v1/{table}",
                get(select_rows).post(insert_row).patch(update_row),
            )
            .with_state(fake);

        let url = serve(app).await;
        Self { url, observed }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            url: self.url.clone(),
            anon_key: ANON_KEY.to_string(),
        }
    }

    /// Wait until `n` view-count updates have arrived, or give up after a second.
    pub async fn wait_for_patches(&self, n: usize) -> Vec<(String, Value)> {
        for _ in 0..100 {
            let patches = self.observed.patches();
            if patches.len() >= n {
                return patches;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.observed.patches()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok());
    apikey == Some(ANON_KEY) && bearer == Some(format!("Bearer {ANON_KEY}").as_str())
}

fn field_matches(row: &Value, column: &str, expected: &str) -> bool {
    match row.get(column) {
        Some(Value::String(s)) => s == expected,
        Some(other) => other.to_string() == expected,
        None => false,
    }
}

async fn select_rows(
    State(fake): State<Arc<Fake>>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    fake.observed.total.fetch_add(1, Ordering::SeqCst);
    fake.observed.reads.lock().unwrap().push(table.clone());

    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if table == "business_cards" {
        if let Some(delay) = fake.data.card_delay {
            tokio::time::sleep(delay).await;
        }
    }
    if fake.data.failing.contains(&table) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }

    let filters: Vec<(&str, &str)> = params
        .iter()
        .filter_map(|(k, v)| v.strip_prefix("eq.").map(|v| (k.as_str(), v)))
        .collect();

    let mut rows: Vec<Value> = fake
        .data
        .rows
        .get(&table)
        .map(|rows| {
            rows.iter()
                .filter(|row| filters.iter().all(|(k, v)| field_matches(row, k, v)))
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    if let Some(limit) = params.get("limit").and_then(|l| l.parse().ok()) {
        rows.truncate(limit);
    }

    axum::Json(Value::Array(rows)).into_response()
}

async fn insert_row(
    State(fake): State<Arc<Fake>>,
    Path(table): Path<String>,
    headers: HeaderMap,
    axum::Json(body): axum::Json<Value>,
) -> Response {
    fake.observed.total.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) || table != "card_analytics" {
        return StatusCode::BAD_REQUEST.into_response();
    }
    if let Some(gate) = &fake.data.insert_gate {
        gate.notified().await;
    }
    if fake.data.reject_inserts {
        return (StatusCode::FORBIDDEN, "new row violates row-level security policy").into_response();
    }
    fake.observed.inserts.lock().unwrap().push(body);
    StatusCode::CREATED.into_response()
}

async fn update_row(
    State(fake): State<Arc<Fake>>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    axum::Json(body): axum::Json<Value>,
) -> Response {
    fake.observed.total.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) || table != "business_cards" {
        return StatusCode::BAD_REQUEST.into_response();
    }
    let id = params.get("id").cloned().unwrap_or_default();
    fake.observed.patches.lock().unwrap().push((id, body));
    StatusCode::NO_CONTENT.into_response()
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Test configuration pointing at `credentials`.
pub fn config(credentials: Option<Credentials>) -> Config {
    Config {
        credentials,
        site_name: "Test Cards".to_string(),
        lookup_timeout: Duration::from_secs(2),
        ..Config::default()
    }
}

/// Start the preview server and return its base URL.
pub async fn start_app(config: Config) -> String {
    serve(router(AppState::new(config))).await
}

/// A client that does not follow redirects.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

/// The published Jane Doe card used across tests.
pub fn jane() -> Value {
    serde_json::json!({
        "id": "card-jane",
        "slug": "acme-jane",
        "is_published": true,
        "title": "Jane Doe",
        "company": "Acme",
        "position": "CEO",
        "avatar_url": "https://cdn.test/jane.png",
        "view_count": 41
    })
}
