//! Pagination guard

use std::collections::HashSet;
use url::Url;

/// Admits listing pages until a URL repeats or the page limit is reached
#[derive(Debug)]
pub struct Pager {
    max_pages: usize,
    visited: HashSet<Url>,
}

impl Pager {
    pub fn new(max_pages: usize) -> Self {
        Self {
            max_pages,
            visited: HashSet::new(),
        }
    }

    /// Record a visit to `url`; false means pagination has to stop
    pub fn admit(&mut self, url: &Url) -> bool {
        if self.visited.len() >= self.max_pages {
            tracing::warn!(
                url = %url,
                max_pages = self.max_pages,
                "Page limit reached, stopping pagination"
            );
            return false;
        }

        if !self.visited.insert(url.clone()) {
            tracing::warn!(url = %url, "Next page was already visited, stopping pagination");
            return false;
        }

        true
    }

    pub fn visited(&self) -> usize {
        self.visited.len()
    }
}
