//! Result of a single navigation

use scraper::Html;
use std::borrow::Cow;
use url::Url;

use crate::error::SessionError;
use crate::Result;

#[derive(Debug, Clone)]
pub struct Page {
    /// Final URL after redirects; relative links resolve against it
    pub url: Url,
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: Vec<u8>,
}

impl Page {
    pub fn new(url: Url, status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            url,
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx page into an error
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(SessionError::Status {
                status: self.status,
                url: self.url.to_string(),
            })
        }
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Parse the body as an HTML document.
    ///
    /// The returned tree is not `Send`; extract what is needed before the
    /// next `.await`.
    pub fn html(&self) -> Html {
        Html::parse_document(&self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_for_status() {
        let url = Url::parse("https://portal.test/doc").unwrap();

        let ok = Page::new(url.clone(), 200, b"body".to_vec());
        assert!(ok.error_for_status().is_ok());

        let missing = Page::new(url, 404, Vec::new());
        match missing.error_for_status() {
            Err(SessionError::Status { status, url }) => {
                assert_eq!(status, 404);
                assert_eq!(url, "https://portal.test/doc");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_text_is_lossy() {
        let url = Url::parse("https://portal.test/").unwrap();
        let page = Page::new(url, 200, vec![b'o', b'k', 0xff]);
        assert_eq!(page.text(), "ok\u{fffd}");
    }
}
