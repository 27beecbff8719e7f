//! HTML rendering for card pages and preview documents.
//!
//! All rendering uses [maud](https://maud.lambda.xyz/) for compile-time HTML
//! generation with automatic XSS protection (all dynamic values are escaped).
//! The one inline script, the preview redirect, embeds its target as a
//! JSON string literal.

pub mod card;
pub mod components;
pub mod home;
pub mod redirect;
pub mod text;

pub use components::SiteInfo;
