//! Link preview responder.
//!
//! Answers crawlers with a small document whose head carries the card's Open
//! Graph and Twitter tags, and forwards browsers to the card page. Every
//! outcome short of a missing data-service configuration is a 200.

use std::sync::LazyLock;

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use regex::Regex;
use serde::Deserialize;

use crate::error::PreviewError;
use crate::meta::CardMeta;
use crate::render;
use crate::state::AppState;

/// `/c/<slug>` anywhere in a request path.
static CARD_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/c/([^/?#]+)").expect("valid card path regex"));

/// Query string accepted by the responder.
#[derive(Debug, Default, Deserialize)]
pub struct SlugQuery {
    #[serde(default)]
    pub slug: Option<String>,
}

/// Pick the slug from the route parameter, then the `slug` query parameter,
/// then a `/c/<slug>` segment in the raw path. Blank candidates are skipped.
pub fn extract_slug(
    path_param: Option<&str>,
    query_param: Option<&str>,
    raw_path: &str,
) -> Option<String> {
    let from_raw = CARD_PATH_RE
        .captures(raw_path)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());

    [path_param, query_param, from_raw]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// `GET /c/{slug}`, `GET /api/c/{slug}`, `GET /api/og/{slug}`.
pub async fn preview_by_path(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<SlugQuery>,
    OriginalUri(uri): OriginalUri,
) -> Result<Response, PreviewError> {
    let slug = extract_slug(Some(&slug), query.slug.as_deref(), uri.path());
    respond(&state, slug.as_deref()).await
}

/// `GET /c?slug=`, `GET /api/c?slug=`.
pub async fn preview_by_query(
    State(state): State<AppState>,
    Query(query): Query<SlugQuery>,
    OriginalUri(uri): OriginalUri,
) -> Result<Response, PreviewError> {
    let slug = extract_slug(None, query.slug.as_deref(), uri.path());
    respond(&state, slug.as_deref()).await
}

/// Build the preview document for `slug`.
///
/// No slug yields the site's default document without a redirect. A slug
/// that cannot be resolved, for any reason, yields default metadata that
/// still redirects to the slug's card page.
pub async fn respond(state: &AppState, slug: Option<&str>) -> Result<Response, PreviewError> {
    let config = &state.config;

    // No slug needs no lookup, so it is answered before credentials are checked.
    let Some(slug) = slug else {
        tracing::debug!("no slug in request, serving default preview");
        let meta = CardMeta::fallback(&config.defaults, None);
        return Ok(document(state, &meta, false));
    };

    let store = state.require_store()?;

    let meta = match store.fetch_published_card(slug).await {
        Ok(Some(card)) => {
            tracing::debug!(slug = %slug, card_id = %card.id, "preview card found");
            CardMeta::for_card(&card, slug, &config.defaults, &config.meta_style)
        }
        Ok(None) => {
            tracing::debug!(slug = %slug, "no published card for preview");
            CardMeta::fallback(&config.defaults, Some(slug))
        }
        Err(e) => {
            tracing::warn!(
                slug = %slug,
                error = %e,
                timeout = e.is_timeout(),
                "preview lookup failed, serving default metadata"
            );
            CardMeta::fallback(&config.defaults, Some(slug))
        }
    };

    Ok(document(state, &meta, true))
}

fn document(state: &AppState, meta: &CardMeta, redirect: bool) -> Response {
    let config = &state.config;
    let markup = render::redirect::render(meta, config.site_info(), redirect);
    let cache = format!("public, max-age={}", config.cache_max_age);
    super::html_response(StatusCode::OK, markup.into_string(), &cache)
}
