//! Public card loading.
//!
//! Resolves a slug to the full public view model: the card row first, then
//! its dependent collections. Only the first step can turn the page into
//! "not found"; every dependent collection is optional and degrades to empty
//! on failure.

use dbcard_core::{
    BusinessCard, CardStore, MediaItem, ProductImage, ProductInquiry, ProductService, ReviewLink,
    SocialLink,
};
use serde::Serialize;

/// A product together with its images and inquiry buttons.
#[derive(Debug, Clone, Serialize)]
pub struct ProductWithDetails {
    #[serde(flatten)]
    pub product: ProductService,
    pub images: Vec<ProductImage>,
    pub inquiries: Vec<ProductInquiry>,
}

/// Everything shown on a public card page.
#[derive(Debug, Clone, Serialize)]
pub struct PublicCardView {
    pub card: BusinessCard,
    pub social_links: Vec<SocialLink>,
    pub media_items: Vec<MediaItem>,
    pub products: Vec<ProductWithDetails>,
    pub reviews: Vec<ReviewLink>,
}

impl PublicCardView {
    /// A view with no dependent rows.
    pub fn card_only(card: BusinessCard) -> Self {
        Self {
            card,
            social_links: Vec::new(),
            media_items: Vec::new(),
            products: Vec::new(),
            reviews: Vec::new(),
        }
    }
}

/// Outcome of loading a public card.
#[derive(Debug, Clone)]
pub enum CardPage {
    /// A published card and whatever dependent rows could be loaded.
    Found(Box<PublicCardView>),
    /// No published card for the slug, or the lookup failed.
    NotFound,
}

/// Load the public card for `slug`.
pub async fn load_public_card(store: &CardStore, slug: &str) -> CardPage {
    let card = match store.fetch_published_card(slug).await {
        Ok(Some(card)) => card,
        Ok(None) => {
            tracing::debug!(slug = %slug, "no published card for slug");
            return CardPage::NotFound;
        }
        Err(e) => {
            tracing::warn!(slug = %slug, error = %e, "card lookup failed");
            return CardPage::NotFound;
        }
    };

    let card_id = card.id.as_str();
    let (social_links, media_items, products, reviews) = tokio::join!(
        optional("social_links", card_id, store.fetch_social_links(card_id)),
        optional("media_items", card_id, store.fetch_media_items(card_id)),
        load_products(store, card_id),
        optional("review_links", card_id, store.fetch_review_links(card_id)),
    );

    tracing::debug!(
        slug = %slug,
        social_links = social_links.len(),
        media_items = media_items.len(),
        products = products.len(),
        reviews = reviews.len(),
        "public card loaded"
    );

    CardPage::Found(Box::new(PublicCardView {
        card,
        social_links,
        media_items,
        products,
        reviews,
    }))
}

/// Await a collection fetch, turning failure into an empty section.
async fn optional<T, F>(section: &'static str, owner_id: &str, fetch: F) -> Vec<T>
where
    F: std::future::Future<Output = dbcard_core::Result<Vec<T>>>,
{
    match fetch.await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(section, owner_id = %owner_id, error = %e, "section failed to load");
            Vec::new()
        }
    }
}

/// Products for a card, each with its images and inquiries fetched in parallel.
async fn load_products(store: &CardStore, card_id: &str) -> Vec<ProductWithDetails> {
    let products = optional("products_services", card_id, store.fetch_products(card_id)).await;

    let futures = products.into_iter().map(|product| async move {
        let (images, inquiries) = tokio::join!(
            optional(
                "product_image_links",
                &product.id,
                store.fetch_product_images(&product.id)
            ),
            optional(
                "product_inquiries",
                &product.id,
                store.fetch_product_inquiries(&product.id)
            ),
        );
        ProductWithDetails {
            product,
            images,
            inquiries,
        }
    });

    futures::future::join_all(futures).await
}
