//! Social-preview metadata derived from a card.
//!
//! One builder serves every preview surface. Variation between deployments
//! (which fields make up the title and description) is configuration, see
//! [`MetaStyle`].

use dbcard_core::BusinessCard;
use dbcard_core::model::non_empty;
use reqwest::Url;
use serde::Serialize;

/// Fallback metadata used when no card is available, and for blank fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultMeta {
    pub title: String,
    pub description: String,
    /// Absolute image URL.
    pub image: String,
    /// Canonical site URL without trailing slash; card links live under `/c/`.
    pub site_url: String,
    /// `twitter:site` handle.
    pub twitter_site: String,
}

impl Default for DefaultMeta {
    fn default() -> Self {
        Self {
            title: "Digital Business Card Builder - SCC Infotech LLP".to_string(),
            description:
                "AI-powered platform for creating and sharing professional digital business cards."
                    .to_string(),
            image: "https://businesscardsscc.vercel.app/DBCLOGO_2.png".to_string(),
            site_url: "https://businesscardsscc.vercel.app".to_string(),
            twitter_site: "@sccinfotech".to_string(),
        }
    }
}

/// How the preview title is composed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TitleStyle {
    /// The card's display name.
    #[default]
    Name,
    /// `"<name> - <company>"`, company omitted when blank.
    NameWithCompany,
}

impl TitleStyle {
    /// Parse a configuration value (`name` or `name_company`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Some(Self::Name),
            "name_company" => Some(Self::NameWithCompany),
            _ => None,
        }
    }
}

/// How the preview description is composed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DescriptionStyle {
    /// `"<position> at <company>"`, either part omitted when blank.
    #[default]
    PositionAtCompany,
    /// The bio, falling back to the position/company line.
    BioFirst,
}

impl DescriptionStyle {
    /// Parse a configuration value (`position_company` or `bio`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "position_company" => Some(Self::PositionAtCompany),
            "bio" => Some(Self::BioFirst),
            _ => None,
        }
    }
}

/// Field selection for preview metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetaStyle {
    pub title: TitleStyle,
    pub description: DescriptionStyle,
}

/// Metadata for one rendered document. Values are unescaped; the renderer
/// escapes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardMeta {
    pub title: String,
    pub description: String,
    pub image: String,
    /// Canonical URL (`og:url`) and redirect target.
    pub url: String,
}

impl CardMeta {
    /// Metadata for a found card.
    pub fn for_card(
        card: &BusinessCard,
        slug: &str,
        defaults: &DefaultMeta,
        style: &MetaStyle,
    ) -> Self {
        let name = card.display_name();
        let company = non_empty(card.company.as_deref());

        let title = match (style.title, name) {
            (_, None) => defaults.title.clone(),
            (TitleStyle::Name, Some(n)) => n.to_string(),
            (TitleStyle::NameWithCompany, Some(n)) => match company {
                Some(c) => format!("{n} - {c}"),
                None => n.to_string(),
            },
        };

        let bio = non_empty(card.bio.as_deref()).map(str::to_string);
        let description = match style.description {
            DescriptionStyle::PositionAtCompany => card.headline(),
            DescriptionStyle::BioFirst => bio.or_else(|| card.headline()),
        }
        .unwrap_or_else(|| defaults.description.clone());

        let image = non_empty(card.avatar_url.as_deref())
            .map_or_else(|| defaults.image.clone(), str::to_string);

        Self {
            title,
            description,
            image,
            url: canonical_card_url(&defaults.site_url, slug),
        }
    }

    /// Metadata when no card is available. With a slug, the canonical URL
    /// still points at that card's route.
    pub fn fallback(defaults: &DefaultMeta, slug: Option<&str>) -> Self {
        Self {
            title: defaults.title.clone(),
            description: defaults.description.clone(),
            image: defaults.image.clone(),
            url: slug.map_or_else(
                || defaults.site_url.clone(),
                |s| canonical_card_url(&defaults.site_url, s),
            ),
        }
    }
}

/// `<site_url>/c/<slug>` with the slug percent-encoded as one path segment.
pub fn canonical_card_url(site_url: &str, slug: &str) -> String {
    let site_url = site_url.trim_end_matches('/');
    match Url::parse(site_url) {
        Ok(mut url) if !url.cannot_be_a_base() => {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.pop_if_empty().push("c").push(slug);
            }
            url.to_string()
        }
        _ => {
            // Relative site URL; only the slug needs protecting.
            let encoded: String = slug
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'))
                .collect();
            format!("{site_url}/c/{encoded}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn card(value: serde_json::Value) -> BusinessCard {
        let mut base = json!({ "id": "c1", "slug": "acme-jane", "is_published": true });
        if let (Some(base), Some(extra)) = (base.as_object_mut(), value.as_object()) {
            base.extend(extra.clone());
        }
        serde_json::from_value(base).unwrap()
    }

    fn meta(value: serde_json::Value, style: MetaStyle) -> CardMeta {
        CardMeta::for_card(&card(value), "acme-jane", &DefaultMeta::default(), &style)
    }

    #[test]
    fn jane_doe_scenario() {
        let m = meta(
            json!({ "title": "Jane Doe", "company": "Acme", "position": "CEO",
                    "avatar_url": "https://cdn.test/jane.png" }),
            MetaStyle::default(),
        );
        assert_eq!(m.title, "Jane Doe");
        assert_eq!(m.description, "CEO at Acme");
        assert_eq!(m.image, "https://cdn.test/jane.png");
        assert_eq!(m.url, "https://businesscardsscc.vercel.app/c/acme-jane");
    }

    #[test]
    fn blank_fields_fall_back() {
        let defaults = DefaultMeta::default();
        let m = meta(
            json!({ "title": "  ", "company": "", "position": null, "avatar_url": "" }),
            MetaStyle::default(),
        );
        assert_eq!(m.title, defaults.title);
        assert_eq!(m.description, defaults.description);
        assert_eq!(m.image, defaults.image);
    }

    #[test]
    fn position_without_company() {
        let m = meta(json!({ "title": "Jane", "position": "CEO" }), MetaStyle::default());
        assert_eq!(m.description, "CEO");
    }

    #[test]
    fn name_with_company_style() {
        let style = MetaStyle {
            title: TitleStyle::NameWithCompany,
            ..Default::default()
        };
        let m = meta(json!({ "title": "Jane Doe", "company": "Acme" }), style);
        assert_eq!(m.title, "Jane Doe - Acme");

        let m = meta(json!({ "title": "Jane Doe" }), style);
        assert_eq!(m.title, "Jane Doe");
    }

    #[test]
    fn bio_first_style() {
        let style = MetaStyle {
            description: DescriptionStyle::BioFirst,
            ..Default::default()
        };
        let m = meta(
            json!({ "bio": "Builds rockets.", "position": "CEO", "company": "Acme" }),
            style,
        );
        assert_eq!(m.description, "Builds rockets.");

        let m = meta(json!({ "bio": " ", "position": "CEO", "company": "Acme" }), style);
        assert_eq!(m.description, "CEO at Acme");
    }

    #[test]
    fn fallback_without_slug_points_home() {
        let defaults = DefaultMeta::default();
        let m = CardMeta::fallback(&defaults, None);
        assert_eq!(m.url, defaults.site_url);
        assert_eq!(m.title, defaults.title);
    }

    #[test]
    fn fallback_with_slug_points_at_card() {
        let m = CardMeta::fallback(&DefaultMeta::default(), Some("ghost"));
        assert_eq!(m.url, "https://businesscardsscc.vercel.app/c/ghost");
    }

    #[test]
    fn canonical_url_encodes_slug() {
        let url = canonical_card_url("https://cards.test", "a b/\"<x>");
        assert!(url.starts_with("https://cards.test/c/"));
        assert!(!url.contains(' '));
        assert!(!url.contains('<'));
        assert!(!url.contains('"'));
        assert!(!url["https://cards.test/c/".len()..].contains('/'));
    }

    #[test]
    fn canonical_url_keeps_site_path() {
        assert_eq!(
            canonical_card_url("https://example.com/cards/", "jane"),
            "https://example.com/cards/c/jane"
        );
    }

    #[test]
    fn canonical_url_relative_site() {
        assert_eq!(canonical_card_url("", "jane"), "/c/jane");
    }

    #[test]
    fn style_parsing() {
        assert_eq!(TitleStyle::parse("NAME_COMPANY"), Some(TitleStyle::NameWithCompany));
        assert_eq!(DescriptionStyle::parse("bio"), Some(DescriptionStyle::BioFirst));
        assert_eq!(DescriptionStyle::parse("haiku"), None);
    }
}
