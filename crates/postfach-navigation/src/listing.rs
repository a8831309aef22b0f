//! Document listing pages

use postfach_session::Page;
use scraper::ElementRef;
use url::Url;

use crate::error::NavigationError;
use crate::markup::{anchors, resolve_href, selector, ATTACHMENT_LINK, MESSAGE_LINK, NEXT_PAGE};
use crate::Result;

/// A document name and the URL its content is fetched from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    pub name: String,
    pub url: Url,
}

/// How a listed document is reached.
///
/// Newer mailbox entries link straight to the attachment. Older ones link to
/// a message page; opening it selects the message in the session, after
/// which the content is served by the fixed legacy download endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentLink {
    Direct { name: String, url: Url },
    ViaMessagePage { name: String, message_url: Url },
}

impl AttachmentLink {
    pub fn name(&self) -> &str {
        match self {
            AttachmentLink::Direct { name, .. } => name,
            AttachmentLink::ViaMessagePage { name, .. } => name,
        }
    }

    /// Page that has to be opened before the download link is valid
    pub fn context_url(&self) -> Option<&Url> {
        match self {
            AttachmentLink::Direct { .. } => None,
            AttachmentLink::ViaMessagePage { message_url, .. } => Some(message_url),
        }
    }

    /// Where the document content is fetched from
    pub fn download_ref(&self, legacy_endpoint: &Url) -> LinkRef {
        match self {
            AttachmentLink::Direct { name, url } => LinkRef {
                name: name.clone(),
                url: url.clone(),
            },
            AttachmentLink::ViaMessagePage { name, .. } => LinkRef {
                name: name.clone(),
                url: legacy_endpoint.clone(),
            },
        }
    }
}

/// What a single listing page offers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    /// New-style attachments, then old-style messages, each in document order
    pub attachments: Vec<AttachmentLink>,
    pub next_page: Option<Url>,
}

impl ListingPage {
    pub fn parse(page: &Page) -> Result<Self> {
        let doc = page.html();
        let mut attachments = Vec::new();

        for anchor in anchors(&doc, ATTACHMENT_LINK, &page.url)? {
            match anchor.href {
                Some(url) => attachments.push(AttachmentLink::Direct {
                    name: anchor.text,
                    url,
                }),
                None => tracing::debug!(document = %anchor.text, "Skipping attachment without link"),
            }
        }

        for anchor in anchors(&doc, MESSAGE_LINK, &page.url)? {
            match anchor.href {
                Some(message_url) => attachments.push(AttachmentLink::ViaMessagePage {
                    name: anchor.text,
                    message_url,
                }),
                None => tracing::debug!(document = %anchor.text, "Skipping message without link"),
            }
        }

        let marker = selector(NEXT_PAGE)?;
        let next_page = match doc.select(&marker).next() {
            Some(span) => {
                // The target sits on the marker's first child element
                let link = span
                    .children()
                    .filter_map(ElementRef::wrap)
                    .next()
                    .and_then(|child| resolve_href(&child, &page.url))
                    .ok_or_else(|| NavigationError::MalformedPager(page.url.to_string()))?;
                Some(link)
            }
            None => None,
        };

        Ok(Self {
            attachments,
            next_page,
        })
    }
}
