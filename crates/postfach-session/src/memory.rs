//! In-memory portal serving canned pages

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use url::Url;

use crate::error::SessionError;
use crate::form::FormSubmission;
use crate::page::Page;
use crate::portal::Portal;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortalRequest {
    Navigate(Url),
    Submit(FormSubmission),
}

impl PortalRequest {
    pub fn url(&self) -> &Url {
        match self {
            PortalRequest::Navigate(url) => url,
            PortalRequest::Submit(form) => &form.action,
        }
    }
}

/// Portal that answers from a fixed page table and records every request.
///
/// Unknown URLs answer with an empty 404 page. Form submissions are answered
/// with the page registered for the form action.
#[derive(Default)]
pub struct MemoryPortal {
    pages: Mutex<HashMap<String, (u16, Vec<u8>)>>,
    unreachable: Mutex<HashSet<String>>,
    requests: Mutex<Vec<PortalRequest>>,
}

impl MemoryPortal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.insert_page(url, 200, body);
        self
    }

    pub fn insert_page(&self, url: &str, status: u16, body: impl Into<Vec<u8>>) {
        self.pages.lock().insert(key(url), (status, body.into()));
    }

    /// Make every request to `url` fail at the transport level
    pub fn set_unreachable(&self, url: &str) {
        self.unreachable.lock().insert(key(url));
    }

    pub fn requests(&self) -> Vec<PortalRequest> {
        self.requests.lock().clone()
    }

    pub fn navigation_count(&self, url: &str) -> usize {
        let wanted = key(url);
        self.requests
            .lock()
            .iter()
            .filter(|r| matches!(r, PortalRequest::Navigate(u) if u.as_str() == wanted))
            .count()
    }

    /// Position of the first navigation to `url` in the request log
    pub fn first_navigation(&self, url: &str) -> Option<usize> {
        let wanted = key(url);
        self.requests
            .lock()
            .iter()
            .position(|r| matches!(r, PortalRequest::Navigate(u) if u.as_str() == wanted))
    }

    pub fn clear_requests(&self) {
        self.requests.lock().clear();
    }

    fn respond(&self, request: PortalRequest) -> Result<Page> {
        let url = request.url().clone();
        self.requests.lock().push(request);

        let wanted = key(url.as_str());
        if self.unreachable.lock().contains(&wanted) {
            return Err(SessionError::Network(format!("connection refused: {}", url)));
        }

        let page = match self.pages.lock().get(&wanted) {
            Some((status, body)) => Page::new(url, *status, body.clone()),
            None => Page::new(url, 404, Vec::new()),
        };

        Ok(page)
    }
}

/// Normalized lookup key so "https://a.test" and "https://a.test/" match
fn key(url: &str) -> String {
    Url::parse(url)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| url.to_string())
}

#[async_trait]
impl Portal for MemoryPortal {
    async fn navigate(&self, url: &Url) -> Result<Page> {
        self.respond(PortalRequest::Navigate(url.clone()))
    }

    async fn submit(&self, form: &FormSubmission) -> Result<Page> {
        self.respond(PortalRequest::Submit(form.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_registered_pages() {
        let portal = MemoryPortal::new().with_page("https://portal.test", "home");

        let url = Url::parse("https://portal.test/").unwrap();
        let page = portal.navigate(&url).await.unwrap();
        assert_eq!(page.status, 200);
        assert_eq!(page.body, b"home");
        assert_eq!(portal.navigation_count("https://portal.test/"), 1);
    }

    #[tokio::test]
    async fn test_unknown_and_unreachable() {
        let portal = MemoryPortal::new();
        portal.set_unreachable("https://portal.test/down");

        let missing = Url::parse("https://portal.test/missing").unwrap();
        assert_eq!(portal.navigate(&missing).await.unwrap().status, 404);

        let down = Url::parse("https://portal.test/down").unwrap();
        assert!(matches!(
            portal.navigate(&down).await,
            Err(SessionError::Network(_))
        ));
        assert_eq!(portal.requests().len(), 2);
    }
}
