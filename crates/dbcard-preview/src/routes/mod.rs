//! Route definitions for the preview service.
//!
//! ## Routes
//!
//! - `GET /` - Home page
//! - `GET /health` - Health check (JSON)
//! - `GET /robots.txt` - Crawler instructions
//! - `GET /c/{slug}`, `GET /c?slug=` - Link preview document
//! - `GET /api/c`, `GET /api/c/{slug}`, `GET /api/og/{slug}` - Same, at the
//!   legacy function paths
//! - `GET /card/{slug}` - Public card page (or `.json` for the view model)

mod card;
mod health;
mod home;
pub mod responder;

use axum::Router;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use crate::render;
use crate::state::AppState;

/// Build the complete preview service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::home_page))
        .route("/health", get(health::health_check))
        .route("/robots.txt", get(robots_txt))
        .route("/c", get(responder::preview_by_query))
        .route("/c/{slug}", get(responder::preview_by_path))
        .route("/api/c", get(responder::preview_by_query))
        .route("/api/c/{slug}", get(responder::preview_by_path))
        .route("/api/og/{slug}", get(responder::preview_by_path))
        .route("/card/{slug}", get(card::card_handler))
        .with_state(state)
}

/// Serve robots.txt allowing all crawlers.
///
/// We want crawlers to fetch these pages for link previews.
async fn robots_txt() -> impl IntoResponse {
    (
        [("content-type", "text/plain; charset=utf-8")],
        "User-agent: *\nAllow: /\n",
    )
}

/// Build an HTML response with security headers, an ETag and the given
/// Cache-Control value.
pub(crate) fn html_response(status: StatusCode, html: String, cache_control: &str) -> Response {
    let mut headers = HeaderMap::new();

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );

    // Security headers
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(render::components::CSP_HEADER),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));

    // ETag (xxHash of content)
    let hash = xxhash_rust::xxh3::xxh3_64(html.as_bytes());
    let etag = format!("\"{}\"", hex_fmt::HexFmt(&hash.to_be_bytes()));
    if let Ok(val) = HeaderValue::from_str(&etag) {
        headers.insert(header::ETAG, val);
    }

    if let Ok(val) = HeaderValue::from_str(cache_control) {
        headers.insert(header::CACHE_CONTROL, val);
    }

    (status, headers, html).into_response()
}
