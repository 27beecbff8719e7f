//! The crawler-facing preview document.
//!
//! Link-unfurling crawlers read the head and stop. Browsers follow the
//! refresh or the inline script to the client-rendered card page.

use maud::{Markup, PreEscaped, html};

use super::components::{SiteInfo, js_string, meta_tags};
use crate::meta::CardMeta;

/// Render the preview document for `meta`.
///
/// With `redirect` set, the document forwards the visitor to `meta.url`.
pub fn render(meta: &CardMeta, site: SiteInfo<'_>, redirect: bool) -> Markup {
    html! {
        (maud::DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                (meta_tags(meta, site))
                @if redirect {
                    meta http-equiv="refresh" content=(format!("0; url={}", meta.url));
                    script {
                        (PreEscaped(format!("window.location.replace({});", js_string(&meta.url))))
                    }
                }
            }
            body {
                @if redirect {
                    p {
                        "Redirecting to "
                        a href=(meta.url) { (meta.title) }
                        "..."
                    }
                } @else {
                    h1 { (meta.title) }
                    p { (meta.description) }
                    a href=(meta.url) { (site.name) }
                }
            }
        }
    }
}
