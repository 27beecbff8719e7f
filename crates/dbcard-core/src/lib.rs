//! Core types and data-service access for public digital business cards.
//!
//! This crate provides:
//! - The row types read from the hosted data service (cards, social links,
//!   media, products, reviews) and the analytics row written per view
//! - Theme/layout configuration coerced from free-form JSON columns
//! - Credential resolution across historical environment variable names
//! - [`CardStore`], an explicitly constructed REST client for the service
//!
//! The data service owns the schema, persistence and access control; nothing
//! here enforces referential integrity.

pub mod credentials;
pub mod device;
mod error;
pub mod model;
pub mod store;
pub mod theme;

pub use credentials::Credentials;
pub use device::DeviceType;
pub use error::{Error, Result};
pub use model::{
    BusinessCard, CardView, InquiryKind, MediaItem, MediaKind, ProductImage, ProductInquiry,
    ProductService, ReviewLink, SocialLink,
};
pub use store::CardStore;
pub use theme::{Alignment, CardLayout, CardShape, CardTheme, LayoutStyle};
