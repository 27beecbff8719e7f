//! Rows read from (and written to) the external data service.
//!
//! Field names follow the service's column names so rows deserialize
//! directly from its REST responses. The canonical schema is the
//! `business_cards` table keyed by `slug`, with `title` as the display name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::device::DeviceType;
use crate::theme::{self, Alignment, CardLayout, CardShape, CardTheme};

/// Treat blank strings as absent.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// A published (or unpublished) business card.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BusinessCard {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    /// Public lookup key, unique across cards.
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_published: bool,
    /// Display name of the card owner.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub map_link: Option<String>,
    #[serde(default, deserialize_with = "theme::deserialize_theme")]
    pub theme: CardTheme,
    #[serde(default, deserialize_with = "theme::deserialize_layout")]
    pub layout: CardLayout,
    #[serde(default, deserialize_with = "theme::deserialize_shape")]
    pub shape: CardShape,
    #[serde(default, deserialize_with = "null_as_default")]
    pub view_count: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BusinessCard {
    /// Display name, if set and non-blank.
    pub fn display_name(&self) -> Option<&str> {
        non_empty(self.title.as_deref())
    }

    /// `"{position} at {company}"`, omitting whichever part is blank.
    ///
    /// Returns `None` when both are blank.
    pub fn headline(&self) -> Option<String> {
        let position = non_empty(self.position.as_deref());
        let company = non_empty(self.company.as_deref());
        match (position, company) {
            (Some(p), Some(c)) => Some(format!("{p} at {c}")),
            (Some(p), None) => Some(p.to_string()),
            (None, Some(c)) => Some(format!("at {c}")),
            (None, None) => None,
        }
    }

    /// Uppercased first letter of the display name, for avatar placeholders.
    pub fn initial(&self) -> char {
        self.display_name()
            .and_then(|n| n.chars().next())
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('?')
    }
}

/// A missing key and an explicit `null` both yield the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A link to one of the card owner's social profiles.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SocialLink {
    pub id: String,
    pub card_id: String,
    /// Platform label as chosen in the editor (e.g. "LinkedIn", "You Tube").
    pub platform: String,
    pub url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_order: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_active: bool,
}

/// Kind of media attached to a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Document,
}

impl<'de> Deserialize<'de> for MediaKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "image" => Self::Image,
            "video" => Self::Video,
            _ => Self::Document,
        })
    }
}

/// An image, video or document shown in the card's media gallery.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_order: i32,
}

/// A product or service advertised on the card.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProductService {
    pub id: String,
    pub card_id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "text_alignment")]
    pub text_alignment: Alignment,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_featured: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_order: i32,
}

/// Product descriptions default to left alignment, unlike card layouts.
fn text_alignment<'de, D>(deserializer: D) -> Result<Alignment, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .as_deref()
        .and_then(Alignment::parse)
        .unwrap_or(Alignment::Left))
}

/// One image belonging to a product.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProductImage {
    pub id: String,
    pub product_id: String,
    pub image_url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_order: i32,
}

/// How a product inquiry button reaches the card owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryKind {
    Link,
    Phone,
    Whatsapp,
    Email,
}

impl<'de> Deserialize<'de> for InquiryKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "phone" => Self::Phone,
            "whatsapp" => Self::Whatsapp,
            "email" => Self::Email,
            _ => Self::Link,
        })
    }
}

/// A call-to-action button attached to a product.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProductInquiry {
    pub id: String,
    pub product_id: String,
    #[serde(rename = "inquiry_type")]
    pub kind: InquiryKind,
    pub contact_value: String,
    pub button_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_active: bool,
}

impl ProductInquiry {
    /// Target URL for the inquiry button.
    pub fn href(&self) -> String {
        let value = self.contact_value.trim();
        match self.kind {
            InquiryKind::Phone => format!("tel:{value}"),
            InquiryKind::Whatsapp => whatsapp_url(value),
            InquiryKind::Email => format!("mailto:{value}"),
            InquiryKind::Link => value.to_string(),
        }
    }
}

/// `https://wa.me/<digits>` for a phone number in any notation.
pub fn whatsapp_url(number: &str) -> String {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    format!("https://wa.me/{digits}")
}

/// A link to an external review page.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReviewLink {
    pub id: String,
    pub title: String,
    pub review_url: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Analytics row recorded for every public card view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub card_id: String,
    /// Never known at this layer; recorded as null.
    pub visitor_ip: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub device_type: DeviceType,
}

impl CardView {
    /// Build a view record, classifying the device from the user agent.
    pub fn new(card_id: &str, user_agent: Option<String>, referrer: Option<String>) -> Self {
        let device_type = DeviceType::from_user_agent(user_agent.as_deref().unwrap_or(""));
        Self {
            card_id: card_id.to_string(),
            visitor_ip: None,
            user_agent,
            referrer: referrer.filter(|r| !r.trim().is_empty()),
            device_type,
        }
    }
}
