//! Shared HTML components used across all pages.
//!
//! These are maud functions that return `Markup` fragments for composition
//! into full pages.

use maud::{Markup, PreEscaped, html};

use crate::meta::CardMeta;

/// Inline CSS for card and home pages.
///
/// Card colors arrive as custom properties on the `.card` element
/// (`--primary`, `--secondary`, `--card-bg`, `--card-fg`).
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
:root{--bg:#f3f4f6;--fg:#111827;--fg2:#4b5563;--fg3:#9ca3af;--accent:#2563eb;--surface:#fff;--border:#e5e7eb}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.6;color:var(--fg);background:var(--bg);min-height:100vh;display:flex;flex-direction:column;align-items:center;padding:1.5rem 1rem}
main{max-width:960px;width:100%;flex:1;display:grid;gap:1.5rem}
a{color:var(--accent);text-decoration:none}
a:hover{text-decoration:underline}
img{max-width:100%;height:auto}
h2{font-size:1.35rem;font-weight:700;margin-bottom:1rem}

.card{--primary:#3B82F6;--secondary:#1E40AF;--card-bg:#fff;--card-fg:#1F2937;background:var(--card-bg);color:var(--card-fg);padding:2rem 1.5rem;border-radius:16px;box-shadow:0 4px 16px rgba(0,0,0,.08);display:flex;flex-direction:column;gap:.75rem}
.card.shape-rounded,.card.shape-hexagon{border-radius:28px}
.card.shape-circle{border-radius:48px}
.card.align-left{align-items:flex-start;text-align:left}
.card.align-center{align-items:center;text-align:center}
.card.align-right{align-items:flex-end;text-align:right}
.avatar{width:112px;height:112px;border-radius:50%;border:4px solid var(--primary);background:var(--primary);color:#fff;font-size:2.5rem;font-weight:700;display:flex;align-items:center;justify-content:center;overflow:hidden;position:relative}
.avatar img{position:absolute;inset:0;width:100%;height:100%;object-fit:cover}
.card-name{font-size:1.75rem;font-weight:700;letter-spacing:-.02em}
.card-position{color:var(--secondary);font-weight:600}
.card-company{font-weight:500}
.card-bio{white-space:pre-wrap;word-break:break-word;opacity:.85}
.contacts{display:flex;flex-direction:column;gap:.4rem;width:100%}
.contacts a,.contacts span{color:var(--card-fg);font-size:.95rem}
.contact-label{color:var(--primary);font-weight:600;margin-right:.35rem}
.socials{display:flex;flex-wrap:wrap;gap:.5rem;justify-content:center}
.social{background:var(--primary);color:#fff;border-radius:100px;padding:.3rem .85rem;font-size:.85rem;font-weight:500}
.social:hover{text-decoration:none;opacity:.9}
.views{font-size:.85rem;color:var(--fg3);border-top:1px solid var(--border);padding-top:.75rem;width:100%}
.qr summary{cursor:pointer;color:var(--primary);font-size:.9rem}
.qr img{margin-top:.5rem;width:200px;height:200px}

.section{background:var(--surface);border:1px solid var(--border);border-radius:16px;padding:1.5rem}
.products{display:grid;grid-template-columns:repeat(auto-fill,minmax(260px,1fr));gap:1rem}
.product{border:1px solid var(--border);border-radius:12px;padding:1rem;display:flex;flex-direction:column;gap:.5rem}
.product-images{display:grid;grid-template-columns:1fr 1fr;gap:.4rem}
.product-images img{width:100%;aspect-ratio:16/9;object-fit:cover;border-radius:8px}
.more-images{font-size:.75rem;color:var(--fg3);text-align:center}
.product-title{font-size:1.15rem;font-weight:700}
.featured{color:#eab308}
.price{color:#16a34a;font-weight:600}
.category{display:inline-block;background:#dbeafe;color:#1d4ed8;font-size:.8rem;border-radius:100px;padding:.1rem .7rem}
.formatted .line{margin-bottom:.2rem}
.formatted .blank{height:.6rem}
.formatted .bullet::before{content:"• ";color:var(--accent);font-weight:700}
.inquiries{display:flex;flex-wrap:wrap;gap:.5rem}
.inquiry{background:var(--accent);color:#fff;border-radius:8px;padding:.4rem .9rem;font-size:.85rem}
.inquiry:hover{text-decoration:none;opacity:.9}
.media{display:grid;grid-template-columns:repeat(auto-fill,minmax(150px,1fr));gap:.75rem}
.media-tile{display:flex;flex-direction:column;gap:.3rem;font-size:.85rem;color:var(--fg2)}
.media-tile img,.media-placeholder{width:100%;height:128px;object-fit:cover;border-radius:8px;background:var(--border);display:flex;align-items:center;justify-content:center;color:var(--fg2);font-weight:600}
.reviews{display:flex;flex-direction:column;gap:.5rem}
.review{display:flex;justify-content:space-between;gap:1rem;border:1px solid var(--border);border-radius:10px;padding:.6rem .9rem}
.review time{font-size:.8rem;color:var(--fg3);white-space:nowrap}

.not-found{text-align:center;max-width:420px;margin:4rem auto;display:flex;flex-direction:column;gap:1rem;align-items:center}
.button{display:inline-block;background:var(--accent);color:#fff;border-radius:8px;padding:.6rem 1.4rem}
.button:hover{text-decoration:none;opacity:.9}

.footer{text-align:center;margin-top:1.5rem;font-size:.8rem;color:var(--fg3);width:100%;max-width:960px}
"#;

/// Inline CSS for error pages.
pub const ERROR_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;display:flex;justify-content:center;align-items:center;min-height:100vh;background:#f9fafb;color:#111827;padding:1rem}
.error-page{text-align:center;max-width:400px}
.error-page h1{font-size:1.5rem;margin-bottom:.75rem}
.error-page p{color:#4b5563;margin-bottom:1rem;line-height:1.5}
.error-page a{color:#2563eb}
"#;

/// Content-Security-Policy header value.
///
/// Inline styles, plus inline script for the preview redirect. Images from
/// any HTTPS origin.
pub const CSP_HEADER: &str = "default-src 'none'; style-src 'unsafe-inline'; script-src 'unsafe-inline'; img-src https: data:; form-action 'none'; frame-ancestors 'none'";

/// Site-wide values rendered into every page head.
#[derive(Debug, Clone, Copy)]
pub struct SiteInfo<'a> {
    /// `og:site_name`.
    pub name: &'a str,
    /// `twitter:site` handle.
    pub twitter_site: &'a str,
}

/// Title, description, Open Graph and Twitter Card tags for `meta`.
pub fn meta_tags(meta: &CardMeta, site: SiteInfo<'_>) -> Markup {
    html! {
        title { (meta.title) }
        meta name="description" content=(meta.description);
        link rel="canonical" href=(meta.url);

        // Open Graph
        meta property="og:title" content=(meta.title);
        meta property="og:description" content=(meta.description);
        meta property="og:image" content=(meta.image);
        meta property="og:url" content=(meta.url);
        meta property="og:type" content="website";
        meta property="og:site_name" content=(site.name);

        // Twitter Card
        meta name="twitter:card" content="summary_large_image";
        meta name="twitter:title" content=(meta.title);
        meta name="twitter:description" content=(meta.description);
        meta name="twitter:image" content=(meta.image);
        @if !site.twitter_site.is_empty() {
            meta name="twitter:site" content=(site.twitter_site);
        }
    }
}

/// Render the full HTML page shell with `<head>` metadata and body content.
pub fn page_shell(meta: &CardMeta, site: SiteInfo<'_>, body_content: Markup) -> Markup {
    html! {
        (maud::DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                (meta_tags(meta, site))
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                main { (body_content) }
                footer class="footer" {
                    a href="/" { (site.name) }
                }
            }
        }
    }
}

/// Encode `s` as a JavaScript string literal that is safe inside `<script>`.
pub fn js_string(s: &str) -> String {
    serde_json::to_string(s)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

/// Check if a URL is safe to use in `src` or `href` attributes.
pub fn is_safe_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

/// Prefix `https://` onto bare hostnames like `acme.com`.
pub fn with_scheme(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Truncate a string to a maximum length, appending "..." if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let mut end = max_len;
        while !s.is_char_boundary(end) && end > 0 {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}
