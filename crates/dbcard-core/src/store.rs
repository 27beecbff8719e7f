//! REST client for the external data service.
//!
//! The service exposes each table at `/rest/v1/<table>` with PostgREST-style
//! filters (`column=eq.value`, `order=column.asc`). Every call is a single
//! attempt bounded by the client timeout; callers decide how to degrade.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::model::{
    BusinessCard, CardView, MediaItem, ProductImage, ProductInquiry, ProductService, ReviewLink,
    SocialLink,
};

/// Default bound on every data-service request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Maximum number of error-body bytes kept for logging.
const ERROR_BODY_LIMIT: usize = 512;

/// Cloneable handle to the data service.
///
/// Construct once at startup and pass it to handlers; clones share the
/// underlying connection pool.
#[derive(Clone)]
pub struct CardStore {
    http: reqwest::Client,
    rest_url: Url,
    anon_key: String,
}

impl std::fmt::Debug for CardStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardStore")
            .field("rest_url", &self.rest_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CardStore {
    /// Build a client for the service described by `credentials`.
    pub fn new(credentials: &Credentials, timeout: Duration) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidUrl {
            url: credentials.url.clone(),
            reason,
        };

        let base = format!("{}/rest/v1/", credentials.url.trim_end_matches('/'));
        let rest_url = Url::parse(&base).map_err(|e| invalid(e.to_string()))?;
        if !matches!(rest_url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", rest_url.scheme())));
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            rest_url,
            anon_key: credentials.anon_key.clone(),
        })
    }

    /// Base URL of the REST interface (ends with `/rest/v1/`).
    pub fn rest_url(&self) -> &Url {
        &self.rest_url
    }

    fn request(&self, method: Method, table: &str) -> Result<RequestBuilder> {
        let url = self.rest_url.join(table).map_err(|e| Error::InvalidUrl {
            url: format!("{}{table}", self.rest_url),
            reason: e.to_string(),
        })?;

        Ok(self
            .http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key))
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let response = self
            .request(Method::GET, table)?
            .query(&[("select", "*")])
            .query(params)
            .send()
            .await?;

        let body = check_status(response).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Look up a published card by slug.
    ///
    /// `Ok(None)` means no published row matched.
    pub async fn fetch_published_card(&self, slug: &str) -> Result<Option<BusinessCard>> {
        let rows: Vec<BusinessCard> = self
            .select(
                "business_cards",
                &[
                    ("slug", eq(slug)),
                    ("is_published", eq("true")),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        Ok(rows.into_iter().next())
    }

    /// Active social links for a card, in display order.
    pub async fn fetch_social_links(&self, card_id: &str) -> Result<Vec<SocialLink>> {
        self.select("social_links", &active_for("card_id", card_id, Some("display_order.asc")))
            .await
    }

    /// Active media items for a card, in display order.
    pub async fn fetch_media_items(&self, card_id: &str) -> Result<Vec<MediaItem>> {
        self.select("media_items", &active_for("card_id", card_id, Some("display_order.asc")))
            .await
    }

    /// Active products and services for a card, in display order.
    pub async fn fetch_products(&self, card_id: &str) -> Result<Vec<ProductService>> {
        self.select(
            "products_services",
            &active_for("card_id", card_id, Some("display_order.asc")),
        )
        .await
    }

    /// Active images for a product, in display order.
    pub async fn fetch_product_images(&self, product_id: &str) -> Result<Vec<ProductImage>> {
        self.select(
            "product_image_links",
            &active_for("product_id", product_id, Some("display_order.asc")),
        )
        .await
    }

    /// Active inquiry buttons for a product.
    pub async fn fetch_product_inquiries(&self, product_id: &str) -> Result<Vec<ProductInquiry>> {
        self.select("product_inquiries", &active_for("product_id", product_id, None))
            .await
    }

    /// Active review links for a card, newest first.
    pub async fn fetch_review_links(&self, card_id: &str) -> Result<Vec<ReviewLink>> {
        self.select("review_links", &active_for("card_id", card_id, Some("created_at.desc")))
            .await
    }

    /// Insert one analytics row.
    pub async fn insert_card_view(&self, view: &CardView) -> Result<()> {
        let response = self
            .request(Method::POST, "card_analytics")?
            .header("Prefer", "return=minimal")
            .json(view)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    /// Overwrite a card's view counter.
    pub async fn set_view_count(&self, card_id: &str, view_count: i64) -> Result<()> {
        let response = self
            .request(Method::PATCH, "business_cards")?
            .header("Prefer", "return=minimal")
            .query(&[("id", eq(card_id))])
            .json(&serde_json::json!({ "view_count": view_count }))
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}

/// PostgREST equality filter value.
fn eq(value: &str) -> String {
    format!("eq.{value}")
}

/// Filters for "active rows belonging to `owner_id`", optionally ordered.
fn active_for(
    owner_column: &'static str,
    owner_id: &str,
    order: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut params = vec![(owner_column, eq(owner_id)), ("is_active", eq("true"))];
    if let Some(order) = order {
        params.push(("order", order.to_string()));
    }
    params
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let mut body = response.text().await.unwrap_or_default();
    if body.len() > ERROR_BODY_LIMIT {
        let mut end = ERROR_BODY_LIMIT;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
    }

    Err(Error::Status {
        status: status.as_u16(),
        body,
    })
}
