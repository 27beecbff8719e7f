//! Error types for the preview service.
//!
//! Most data-service failures never reach this type: the responder and the
//! card loader degrade to fallback pages instead. What remains is server
//! misconfiguration and genuine internal failures.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use maud::{DOCTYPE, html};

/// Preview service error type.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// No data-service credentials are configured.
    #[error("server misconfiguration: {0}")]
    Misconfigured(&'static str),

    /// Internal server error (rendering, serialization, etc.).
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl PreviewError {
    /// The error for a request that needs the data service when none is configured.
    pub fn missing_credentials() -> Self {
        Self::Misconfigured("missing Supabase env vars")
    }
}

impl IntoResponse for PreviewError {
    fn into_response(self) -> Response {
        match &self {
            Self::Misconfigured(what) => {
                tracing::error!(reason = %what, "server misconfiguration");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                    format!("Server misconfiguration: {what}"),
                )
                    .into_response()
            }
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                let markup = html! {
                    (DOCTYPE)
                    html lang="en" {
                        head {
                            meta charset="utf-8";
                            meta name="viewport" content="width=device-width, initial-scale=1";
                            title { "Internal Error" }
                            meta name="robots" content="noindex";
                            style { (maud::PreEscaped(crate::render::components::ERROR_CSS)) }
                        }
                        body {
                            main class="error-page" {
                                h1 { "Internal Error" }
                                p { "An internal error occurred. Please try again later." }
                                a href="/" { "Go to Homepage" }
                            }
                        }
                    }
                };
                (StatusCode::INTERNAL_SERVER_ERROR, markup).into_response()
            }
        }
    }
}
