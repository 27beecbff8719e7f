//! Public card page renderer.
//!
//! Renders the profile section followed by whichever dependent sections have
//! rows. A section with no rows is left out entirely.

use dbcard_core::model::{non_empty, whatsapp_url};
use dbcard_core::{BusinessCard, MediaItem, MediaKind, ReviewLink, SocialLink};
use maud::{Markup, html};
use reqwest::Url;

use super::components::{SiteInfo, is_safe_url, page_shell, truncate, with_scheme};
use super::text;
use crate::loader::{ProductWithDetails, PublicCardView};
use crate::meta::{CardMeta, DefaultMeta};

/// External QR image service; `data` carries the encoded URL.
const QR_SERVICE: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// Product images shown before collapsing into a "+N more" note.
const MAX_PRODUCT_IMAGES: usize = 4;

/// Render the full public card page.
pub fn render(view: &PublicCardView, meta: &CardMeta, site: SiteInfo<'_>) -> Markup {
    let body = html! {
        (profile(&view.card, &view.social_links, &meta.url))

        @if !view.products.is_empty() {
            section class="section" id="products" {
                h2 { "Products & Services" }
                div class="products" {
                    @for item in &view.products {
                        (product(item))
                    }
                }
            }
        }

        @if !view.media_items.is_empty() {
            section class="section" id="media" {
                h2 { "Media Gallery" }
                div class="media" {
                    @for item in &view.media_items {
                        (media_tile(item))
                    }
                }
            }
        }

        @if !view.reviews.is_empty() {
            section class="section" id="reviews" {
                h2 { "Reviews" }
                div class="reviews" {
                    @for review in &view.reviews {
                        (review_row(review))
                    }
                }
            }
        }
    };

    page_shell(meta, site, body)
}

/// The "Card Not Found" page.
pub fn not_found(defaults: &DefaultMeta, site: SiteInfo<'_>) -> Markup {
    let meta = CardMeta {
        title: "Card Not Found".to_string(),
        ..CardMeta::fallback(defaults, None)
    };
    let body = html! {
        div class="not-found" {
            h1 { "Card Not Found" }
            p { "The business card you're looking for doesn't exist or has been removed." }
            a class="button" href="/" { "Go to Homepage" }
        }
    };
    page_shell(&meta, site, body)
}

fn profile(card: &BusinessCard, social_links: &[SocialLink], card_url: &str) -> Markup {
    let theme = &card.theme;
    let layout = &card.layout;
    let style = format!(
        "--primary:{};--secondary:{};--card-bg:{};--card-fg:{};font-family:'{}',sans-serif",
        theme.primary, theme.secondary, theme.background, theme.text, layout.font
    );
    let class = format!(
        "card style-{} shape-{} align-{}",
        layout.style.as_str(),
        card.shape.as_str(),
        layout.alignment.as_css()
    );
    let name = card.display_name().unwrap_or("Business Card");

    html! {
        section class=(class) style=(style) id="profile" {
            div class="avatar" {
                (card.initial())
                @if let Some(avatar) = non_empty(card.avatar_url.as_deref()) {
                    @if is_safe_url(avatar) {
                        img src=(avatar) alt=(name) loading="lazy";
                    }
                }
            }

            h1 class="card-name" { (name) }
            @if let Some(position) = non_empty(card.position.as_deref()) {
                div class="card-position" { (position) }
            }
            @if let Some(company) = non_empty(card.company.as_deref()) {
                div class="card-company" { (company) }
            }
            @if let Some(bio) = non_empty(card.bio.as_deref()) {
                p class="card-bio" { (bio) }
            }

            (contacts(card))

            (socials(social_links))

            div class="views" {
                (card.view_count) " views"
            }

            @if let Some(qr) = qr_image_url(card_url) {
                details class="qr" {
                    summary { "Show QR code" }
                    img src=(qr) alt="QR code for this card" width="200" height="200";
                }
            }
        }
    }
}

fn contacts(card: &BusinessCard) -> Markup {
    let email = non_empty(card.email.as_deref());
    let phone = non_empty(card.phone.as_deref());
    let whatsapp = non_empty(card.whatsapp.as_deref());
    let website = non_empty(card.website.as_deref()).map(with_scheme);
    let address = non_empty(card.address.as_deref());
    let map_link = non_empty(card.map_link.as_deref()).filter(|u| is_safe_url(u));

    if email.is_none()
        && phone.is_none()
        && whatsapp.is_none()
        && website.is_none()
        && address.is_none()
        && map_link.is_none()
    {
        return html! {};
    }

    html! {
        div class="contacts" {
            @if let Some(email) = email {
                a href=(format!("mailto:{email}")) {
                    span class="contact-label" { "Email" } (email)
                }
            }
            @if let Some(phone) = phone {
                a href=(format!("tel:{phone}")) {
                    span class="contact-label" { "Phone" } (phone)
                }
            }
            @if let Some(whatsapp) = whatsapp {
                a href=(whatsapp_url(whatsapp)) rel="noopener" target="_blank" {
                    span class="contact-label" { "WhatsApp" } (whatsapp)
                }
            }
            @if let Some(website) = website.as_deref() {
                @if is_safe_url(website) {
                    a href=(website) rel="nofollow noopener" target="_blank" {
                        span class="contact-label" { "Website" }
                        (truncate(website.strip_prefix("https://").or_else(|| website.strip_prefix("http://")).unwrap_or(website), 40))
                    }
                }
            }
            @if let Some(address) = address {
                span {
                    span class="contact-label" { "Address" } (address)
                }
            }
            @if let Some(map_link) = map_link {
                a href=(map_link) rel="nofollow noopener" target="_blank" { "View on map" }
            }
        }
    }
}

/// Social links block, rendered inside the profile card.
pub fn socials(links: &[SocialLink]) -> Markup {
    let safe: Vec<&SocialLink> = links.iter().filter(|l| is_safe_url(&l.url)).collect();
    if safe.is_empty() {
        return html! {};
    }
    html! {
        nav class="socials" {
            @for link in safe {
                a class="social" href=(link.url) rel="nofollow noopener" target="_blank"
                    title=[non_empty(link.username.as_deref())] {
                    (platform_label(&link.platform))
                }
            }
        }
    }
}

/// Human label for a stored platform name.
pub fn platform_label(platform: &str) -> &str {
    match platform.trim().to_ascii_lowercase().as_str() {
        "instagram" => "Instagram",
        "linkedin" => "LinkedIn",
        "github" => "GitHub",
        "twitter" | "x" => "Twitter",
        "facebook" => "Facebook",
        "youtube" | "you tube" => "YouTube",
        "website" => "Website",
        "whatsapp" => "WhatsApp",
        "telegram" => "Telegram",
        "" | "custom" | "custom link" => "Link",
        _ => platform.trim(),
    }
}

fn qr_image_url(card_url: &str) -> Option<String> {
    Url::parse_with_params(QR_SERVICE, &[("size", "200x200"), ("data", card_url)])
        .ok()
        .map(String::from)
}

fn product(item: &ProductWithDetails) -> Markup {
    let p = &item.product;
    let safe_images: Vec<_> = item
        .images
        .iter()
        .filter(|image| is_safe_url(&image.image_url))
        .collect();
    let hidden = safe_images.len().saturating_sub(MAX_PRODUCT_IMAGES);

    html! {
        article class="product" {
            @if !safe_images.is_empty() {
                div class="product-images" {
                    @for image in safe_images.iter().take(MAX_PRODUCT_IMAGES) {
                        img src=(image.image_url)
                            alt=(non_empty(image.alt_text.as_deref()).unwrap_or(p.title.as_str()))
                            loading="lazy";
                    }
                }
                @if hidden > 0 {
                    div class="more-images" { "+" (hidden) " more images" }
                }
            }

            div class="product-title" {
                (p.title)
                @if p.is_featured {
                    " " span class="featured" title="Featured" { "★" }
                }
            }
            @if let Some(category) = non_empty(p.category.as_deref()) {
                span class="category" { (category) }
            }
            @if let Some(price) = non_empty(p.price.as_deref()) {
                div class="price" { (price) }
            }
            @if !p.description.trim().is_empty() {
                (text::formatted(&p.description, p.text_alignment))
            }

            @let buttons = inquiry_buttons(item);
            @if !buttons.is_empty() {
                div class="inquiries" {
                    @for (href, label) in &buttons {
                        a class="inquiry" href=(href) rel="nofollow noopener" target="_blank" {
                            (label)
                        }
                    }
                }
            }
        }
    }
}

/// Active inquiries as `(href, label)` pairs with a usable target.
fn inquiry_buttons(item: &ProductWithDetails) -> Vec<(String, &str)> {
    item.inquiries
        .iter()
        .filter(|i| i.is_active)
        .map(|i| (i.href(), i.button_text.as_str()))
        .filter(|(href, _)| is_contact_href(href))
        .collect()
}

/// Inquiry targets that may be placed in an `href`.
fn is_contact_href(href: &str) -> bool {
    is_safe_url(href) || href.starts_with("tel:") || href.starts_with("mailto:")
}

fn media_tile(item: &MediaItem) -> Markup {
    let link = is_safe_url(&item.url).then_some(item.url.as_str());
    let thumbnail = match item.kind {
        MediaKind::Image => link,
        _ => non_empty(item.thumbnail_url.as_deref()).filter(|u| is_safe_url(u)),
    };
    let placeholder = match item.kind {
        MediaKind::Image => "Image",
        MediaKind::Video => "Video",
        MediaKind::Document => "Document",
    };

    let tile = html! {
        @if let Some(src) = thumbnail {
            img src=(src) alt=(item.title) loading="lazy";
        } @else {
            div class="media-placeholder" { (placeholder) }
        }
        span { (item.title) }
    };

    html! {
        @match link {
            Some(href) => {
                a class="media-tile" href=(href) rel="nofollow noopener" target="_blank"
                    title=[non_empty(item.description.as_deref())] { (tile) }
            }
            None => {
                div class="media-tile" { (tile) }
            }
        }
    }
}

fn review_row(review: &ReviewLink) -> Markup {
    html! {
        div class="review" {
            @if is_safe_url(&review.review_url) {
                a href=(review.review_url) rel="nofollow noopener" target="_blank" { (review.title) }
            } @else {
                span { (review.title) }
            }
            @if let Some(at) = review.created_at {
                time datetime=(at.to_rfc3339()) { (at.format("%b %-d, %Y").to_string()) }
            }
        }
    }
}
