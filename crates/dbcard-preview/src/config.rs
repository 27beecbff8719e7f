//! Application configuration loaded from environment variables.

use std::time::Duration;

use dbcard_core::Credentials;

use crate::meta::{DefaultMeta, DescriptionStyle, MetaStyle, TitleStyle};
use crate::render::SiteInfo;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8081").
    pub bind_addr: String,

    /// Data service credentials. `None` when no complete pair is configured;
    /// the server still starts and answers store-backed routes with 500.
    pub credentials: Option<Credentials>,

    /// Site name shown in `og:site_name` and page footers.
    pub site_name: String,

    /// Fallback metadata and the canonical site URL.
    pub defaults: DefaultMeta,

    /// Which card fields feed the preview title and description.
    pub meta_style: MetaStyle,

    /// `max-age` for preview responses, in seconds.
    pub cache_max_age: u32,

    /// Bound on each data-service request.
    pub lookup_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8081".to_string(),
            credentials: None,
            site_name: "Digital Business Card Builder".to_string(),
            defaults: DefaultMeta::default(),
            meta_style: MetaStyle::default(),
            cache_max_age: 60,
            lookup_timeout: dbcard_core::store::DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - None (a missing credential pair is reported per request)
    ///
    /// Optional:
    /// - `SUPABASE_URL` / `SUPABASE_ANON_KEY` (or the `VITE_` / `NEXT_PUBLIC_` variants)
    /// - `PREVIEW_BIND_ADDR`: Server bind address (default: "0.0.0.0:8081")
    /// - `PREVIEW_SITE_URL`: Canonical site URL used for card links
    ///   (default: "https://businesscardsscc.vercel.app"). Must be the client
    ///   app's origin, not this service, or `/c/{slug}` redirects to itself.
    /// - `PREVIEW_SITE_NAME`: Site name (default: "Digital Business Card Builder")
    /// - `PREVIEW_DEFAULT_TITLE`, `PREVIEW_DEFAULT_DESCRIPTION`, `PREVIEW_DEFAULT_IMAGE`,
    ///   `PREVIEW_TWITTER_SITE`: Fallback metadata
    /// - `PREVIEW_TITLE_STYLE`: `name` or `name_company` (default: `name`)
    /// - `PREVIEW_DESCRIPTION_STYLE`: `position_company` or `bio` (default: `position_company`)
    /// - `PREVIEW_CACHE_MAX_AGE`: Seconds of public caching (default: 60)
    /// - `PREVIEW_LOOKUP_TIMEOUT_SECS`: Data-service timeout (default: 5)
    pub fn from_env() -> anyhow::Result<Self> {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let bind_addr = var("PREVIEW_BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8081".to_string());

        let credentials = Credentials::from_env();

        let site_name =
            var("PREVIEW_SITE_NAME").unwrap_or_else(|| "Digital Business Card Builder".to_string());

        let base = DefaultMeta::default();
        let defaults = DefaultMeta {
            title: var("PREVIEW_DEFAULT_TITLE").unwrap_or(base.title),
            description: var("PREVIEW_DEFAULT_DESCRIPTION").unwrap_or(base.description),
            image: var("PREVIEW_DEFAULT_IMAGE").unwrap_or(base.image),
            site_url: var("PREVIEW_SITE_URL")
                .map(|u| u.trim().trim_end_matches('/').to_string())
                .unwrap_or(base.site_url),
            twitter_site: var("PREVIEW_TWITTER_SITE").unwrap_or(base.twitter_site),
        };

        let meta_style = MetaStyle {
            title: match var("PREVIEW_TITLE_STYLE") {
                Some(s) => TitleStyle::parse(&s)
                    .ok_or_else(|| anyhow::anyhow!("PREVIEW_TITLE_STYLE: unknown style '{s}'"))?,
                None => TitleStyle::default(),
            },
            description: match var("PREVIEW_DESCRIPTION_STYLE") {
                Some(s) => DescriptionStyle::parse(&s).ok_or_else(|| {
                    anyhow::anyhow!("PREVIEW_DESCRIPTION_STYLE: unknown style '{s}'")
                })?,
                None => DescriptionStyle::default(),
            },
        };

        let cache_max_age = match var("PREVIEW_CACHE_MAX_AGE") {
            Some(s) => s
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("PREVIEW_CACHE_MAX_AGE '{s}': {e}"))?,
            None => 60,
        };

        let lookup_timeout = match var("PREVIEW_LOOKUP_TIMEOUT_SECS") {
            Some(s) => {
                let secs: u64 = s
                    .trim()
                    .parse()
                    .map_err(|e| anyhow::anyhow!("PREVIEW_LOOKUP_TIMEOUT_SECS '{s}': {e}"))?;
                if secs == 0 {
                    anyhow::bail!("PREVIEW_LOOKUP_TIMEOUT_SECS must be at least 1");
                }
                Duration::from_secs(secs)
            }
            None => dbcard_core::store::DEFAULT_TIMEOUT,
        };

        if credentials.is_none() {
            tracing::warn!("no data service credentials configured; card routes will return 500");
        }
        if redirects_to_self(&defaults.site_url, &bind_addr) {
            tracing::warn!(
                site_url = %defaults.site_url,
                bind_addr = %bind_addr,
                "PREVIEW_SITE_URL points at this service; /c/{{slug}} will redirect to itself"
            );
        }

        tracing::info!(
            bind_addr = %bind_addr,
            site_url = %defaults.site_url,
            site_name = %site_name,
            data_service = credentials.as_ref().map_or("<unset>", |c| c.url.as_str()),
            cache_max_age,
            lookup_timeout_secs = lookup_timeout.as_secs(),
            "preview configuration loaded"
        );

        Ok(Self {
            bind_addr,
            credentials,
            site_name,
            defaults,
            meta_style,
            cache_max_age,
            lookup_timeout,
        })
    }

    /// Site-wide values for page heads.
    pub fn site_info(&self) -> SiteInfo<'_> {
        SiteInfo {
            name: &self.site_name,
            twitter_site: &self.defaults.twitter_site,
        }
    }
}

/// Whether `site_url` resolves to the address this service listens on.
///
/// Loopback hosts in the URL match a loopback or unspecified bind host.
fn redirects_to_self(site_url: &str, bind_addr: &str) -> bool {
    let Ok(url) = reqwest::Url::parse(site_url) else {
        return false;
    };
    let (Some(site_host), Some(site_port)) = (url.host_str(), url.port_or_known_default()) else {
        return false;
    };
    let Some((bind_host, bind_port)) = bind_addr.rsplit_once(':') else {
        return false;
    };
    if bind_port.parse::<u16>().ok() != Some(site_port) {
        return false;
    }

    let unbracket = |h: &str| h.trim_start_matches('[').trim_end_matches(']').to_ascii_lowercase();
    let (site_host, bind_host) = (unbracket(site_host), unbracket(bind_host));
    let loopback = |h: &str| matches!(h, "localhost" | "127.0.0.1" | "::1");

    site_host == bind_host
        || (loopback(&site_host) && (loopback(&bind_host) || matches!(bind_host.as_str(), "0.0.0.0" | "::")))
}
