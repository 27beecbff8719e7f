//! Lightweight formatted text for product descriptions.
//!
//! Each line is rendered on its own. A leading `• ` makes the line a bullet;
//! `**bold**` and `*italic*` spans are recognized inline. Everything else is
//! plain text and goes through maud's escaping.

use std::sync::LazyLock;

use dbcard_core::Alignment;
use maud::{Markup, html};
use regex::Regex;

/// `**bold**` or `*italic*`, non-greedy, no nesting.
static EMPHASIS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*|\*(.+?)\*").expect("valid regex"));

/// Render a multi-line description block.
pub fn formatted(text: &str, alignment: Alignment) -> Markup {
    html! {
        div class="formatted" style=(format!("text-align:{}", alignment.as_css())) {
            @for line in text.lines() {
                @let trimmed = line.trim();
                @if trimmed.is_empty() {
                    div class="blank" {}
                } @else if let Some(item) = trimmed.strip_prefix("• ") {
                    div class="line bullet" { (inline(item)) }
                } @else {
                    div class="line" { (inline(trimmed)) }
                }
            }
        }
    }
}

/// Render bold/italic spans within a single line.
pub fn inline(line: &str) -> Markup {
    let mut last = 0;
    let mut parts: Vec<Span<'_>> = Vec::new();

    for caps in EMPHASIS_RE.captures_iter(line) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            parts.push(Span::Plain(&line[last..whole.start()]));
        }
        if let Some(bold) = caps.get(1) {
            parts.push(Span::Bold(bold.as_str()));
        } else if let Some(italic) = caps.get(2) {
            parts.push(Span::Italic(italic.as_str()));
        }
        last = whole.end();
    }
    if last < line.len() {
        parts.push(Span::Plain(&line[last..]));
    }

    html! {
        @for part in &parts {
            @match part {
                Span::Plain(s) => { (s) }
                Span::Bold(s) => { strong { (s) } }
                Span::Italic(s) => { em { (s) } }
            }
        }
    }
}

enum Span<'a> {
    Plain(&'a str),
    Bold(&'a str),
    Italic(&'a str),
}
