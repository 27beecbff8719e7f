//! Home page route.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;

use crate::render;
use crate::state::AppState;

/// Render the home page.
pub async fn home_page(State(state): State<AppState>) -> Response {
    let config = &state.config;
    let markup = render::home::render(&config.defaults, config.site_info());
    let cache = format!("public, max-age={}", config.cache_max_age);
    super::html_response(StatusCode::OK, markup.into_string(), &cache)
}
