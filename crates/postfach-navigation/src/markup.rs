//! Markup helpers shared by the page parsers

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::NavigationError;
use crate::Result;

pub const FOLDER_LINK: &str = "a.evt-gotoFolder";
pub const ATTACHMENT_LINK: &str = "a.evt-getMailboxAttachment";
pub const MESSAGE_LINK: &str = "a.evt-showMessage";
pub const NEXT_PAGE: &str = "span.pager-navigator-next";

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| NavigationError::InvalidSelector(format!("{css}: {e}")))
}

/// An anchor's visible text and resolved target
pub struct Anchor {
    pub text: String,
    pub href: Option<Url>,
}

/// All anchors matching `css`, in document order
pub fn anchors(doc: &Html, css: &str, base: &Url) -> Result<Vec<Anchor>> {
    let sel = selector(css)?;

    Ok(doc
        .select(&sel)
        .map(|el| Anchor {
            text: element_text(&el),
            href: resolve_href(&el, base),
        })
        .collect())
}

pub fn element_text(el: &ElementRef<'_>) -> String {
    normalize_whitespace(&el.text().collect::<String>())
}

pub fn resolve_href(el: &ElementRef<'_>, base: &Url) -> Option<Url> {
    let href = el.value().attr("href")?.trim();
    if href.is_empty() {
        return None;
    }
    base.join(href).ok()
}

pub fn normalize_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.push(ch);
            last_space = false;
        }
    }
    out.trim().to_string()
}
