//! Home page: the marketing landing served at `/`.

use maud::{Markup, PreEscaped, html};

use super::components::{SiteInfo, page_shell};
use crate::meta::{CardMeta, DefaultMeta};

const FEATURES: &[(&str, &str)] = &[
    (
        "Smart Digital Card",
        "Interactive profile that's always up to date, no reprints needed.",
    ),
    (
        "Social Integrations",
        "Instagram, Facebook, LinkedIn, YouTube: link all your channels.",
    ),
    (
        "One-click Share & QR",
        "Share instantly with a link or QR code, perfect for events.",
    ),
    (
        "AI Suggestions",
        "Get recommendations for better bios, CTAs, and link order.",
    ),
    (
        "Analytics",
        "See clicks, top links, and locations to understand your audience.",
    ),
    (
        "Secure & Fast",
        "Backed by modern hosting, privacy friendly, and blazing quick.",
    ),
];

const FAQ: &[(&str, &str)] = &[
    (
        "What is a digital business card?",
        "It's a shareable online profile with your contact info, links, and branding.",
    ),
    (
        "Can I update my card later?",
        "Yes! Edit anytime. Your shared link and QR stay the same.",
    ),
    (
        "Do I need an app?",
        "No app needed. It works in any modern browser.",
    ),
    (
        "Is there a free plan?",
        "Yes, start free and upgrade anytime for analytics and AI features.",
    ),
];

/// Render the home page with the site's default metadata.
pub fn render(defaults: &DefaultMeta, site: SiteInfo<'_>) -> Markup {
    let meta = CardMeta::fallback(defaults, None);

    let body = html! {
        style { (PreEscaped(HOME_CSS)) }
        section class="home" {
            h1 class="home-title" { (site.name) }
            p class="home-tagline" { (meta.description) }
        }

        section class="section" id="features" {
            h2 { "Features" }
            div class="home-features" {
                @for (title, text) in FEATURES {
                    div class="home-feature" {
                        h3 { (title) }
                        p { (text) }
                    }
                }
            }
        }

        section class="section" id="faq" {
            h2 { "Frequently asked questions" }
            @for (i, (question, answer)) in FAQ.iter().enumerate() {
                details class="home-faq" open[i == 0] {
                    summary { (question) }
                    p { (answer) }
                }
            }
        }
    };

    page_shell(&meta, site, body)
}

/// Additional CSS for the home page only.
const HOME_CSS: &str = r#"
.home{display:flex;flex-direction:column;align-items:center;text-align:center;padding:3rem 1rem 1rem}
.home-title{font-size:2.75rem;font-weight:800;letter-spacing:-.04em;color:var(--fg)}
.home-tagline{font-size:1.15rem;color:var(--fg2);margin-top:.5rem;max-width:480px}
.home-features{display:grid;grid-template-columns:repeat(auto-fill,minmax(220px,1fr));gap:1rem}
.home-feature h3{font-size:1rem;margin-bottom:.25rem}
.home-feature p{font-size:.9rem;color:var(--fg2)}
.home-faq{border-bottom:1px solid var(--border);padding:.75rem 0}
.home-faq summary{cursor:pointer;font-weight:600}
.home-faq p{margin-top:.5rem;color:var(--fg2)}
"#;
