//! dbcard Preview - link previews and public pages for digital business cards.
//!
//! This crate provides a lightweight HTTP server in front of the hosted data
//! service. It is designed to be placed behind a CDN for edge caching of the
//! preview documents.
//!
//! # Architecture
//!
//! - **Responder**: resolves a slug to one card row and answers with a tiny
//!   document carrying Open Graph / Twitter Card tags plus a redirect
//! - **Loader**: fetches a published card and its dependent collections for
//!   the server-rendered public page
//! - **Tracking**: records page views as best-effort background tasks
//! - **Render**: generates HTML using maud (compile-time templates)
//!
//! # URL Pattern
//!
//! ```text
//! GET /c/{slug}        preview document, redirects to the card page
//! GET /card/{slug}     public card page
//! GET /card/{slug}.json
//! ```
//!
//! # Security
//!
//! - All dynamic content is HTML-escaped by maud
//! - URLs are validated (HTTPS/HTTP only) before use in attributes
//! - The redirect target is embedded in script as a JSON string literal
//! - X-Frame-Options: DENY prevents clickjacking

pub mod config;
pub mod error;
pub mod loader;
pub mod meta;
pub mod render;
pub mod routes;
pub mod state;
pub mod tracking;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
