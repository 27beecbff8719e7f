//! Public card page route.
//!
//! Handles `GET /card/{slug}` (server-rendered page, records a view) and
//! `GET /card/{slug}.json` (the same view model as JSON, no view recorded).

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::PreviewError;
use crate::loader::{CardPage, load_public_card};
use crate::meta::CardMeta;
use crate::render;
use crate::state::AppState;
use crate::tracking::{Visitor, track_view};

/// Every page load records a view, so caches must not answer for us.
const CARD_CACHE_CONTROL: &str = "no-store";

/// Handle a public card request.
pub async fn card_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Response, PreviewError> {
    let slug = slug.trim();

    // Dispatch to JSON handler if .json suffix
    if let Some(bare) = slug.strip_suffix(".json") {
        return json_handler(&state, bare).await;
    }

    let store = state.require_store()?;
    let config = &state.config;

    let view = match load_public_card(store, slug).await {
        CardPage::Found(view) => view,
        CardPage::NotFound => {
            let markup = render::card::not_found(&config.defaults, config.site_info());
            return Ok(super::html_response(
                StatusCode::OK,
                markup.into_string(),
                CARD_CACHE_CONTROL,
            ));
        }
    };

    let meta = CardMeta::for_card(&view.card, slug, &config.defaults, &config.meta_style);
    let html = render::card::render(&view, &meta, config.site_info()).into_string();

    // The page is complete; the view is recorded in the background.
    track_view(
        store.clone(),
        view.card.id.clone(),
        view.card.view_count,
        Visitor::from_headers(&headers),
    );

    Ok(super::html_response(StatusCode::OK, html, CARD_CACHE_CONTROL))
}

/// Serve the public view model as JSON.
async fn json_handler(state: &AppState, slug: &str) -> Result<Response, PreviewError> {
    let store = state.require_store()?;

    match load_public_card(store, slug).await {
        CardPage::Found(view) => Ok(Json(view).into_response()),
        CardPage::NotFound => Ok((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": "card not found",
                "slug": slug,
            })),
        )
            .into_response()),
    }
}
