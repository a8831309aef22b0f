//! Fetch-if-absent downloader

use sha2::{Digest, Sha256};
use std::path::PathBuf;
use url::Url;

use postfach_navigation::{AttachmentLink, LinkRef};
use postfach_session::Portal;

use crate::document::{FetchOutcome, StoredDocument};
use crate::error::{DownloadError, FetchFailure};
use crate::store::DocumentStore;
use crate::Result;

pub struct DocumentFetcher<'p, P: ?Sized> {
    portal: &'p P,
    store: DocumentStore,
    /// Serves old-style message attachments once the message page is open
    legacy_endpoint: Url,
}

impl<'p, P: Portal + ?Sized> DocumentFetcher<'p, P> {
    pub fn new(portal: &'p P, store: DocumentStore, legacy_endpoint: Url) -> Self {
        Self {
            portal,
            store,
            legacy_endpoint,
        }
    }

    /// Download `link` into `folder` unless a file with its name is already
    /// there. A present file is never re-requested.
    pub async fn fetch_if_absent(&self, link: &LinkRef, folder: &str) -> Result<FetchOutcome> {
        match self.absent_path(&link.name, folder).await? {
            Some(path) => self.download(link, folder, path).await,
            None => Ok(self.skipped(&link.name, folder)),
        }
    }

    /// Resolve a listed attachment and download it if absent.
    ///
    /// Old-style links open their message page first, then fetch the
    /// legacy endpoint; neither request is made for a document on disk.
    pub async fn fetch_attachment(
        &self,
        attachment: &AttachmentLink,
        folder: &str,
    ) -> Result<FetchOutcome> {
        let link = attachment.download_ref(&self.legacy_endpoint);
        let Some(path) = self.absent_path(&link.name, folder).await? else {
            return Ok(self.skipped(&link.name, folder));
        };

        // The message page only selects the message in the session so the
        // legacy endpoint serves it; a document on disk needs neither.
        if let Some(message_url) = attachment.context_url() {
            tracing::debug!(document = %link.name, url = %message_url, "Opening message page");
            let opened = self
                .portal
                .navigate(message_url)
                .await
                .map_err(|e| FetchFailure::Network(e.to_string()))
                .and_then(|page| match FetchFailure::from_status(page.status) {
                    Some(failure) => Err(failure),
                    None => Ok(()),
                });
            if let Err(failure) = opened {
                return Err(self.failed(&link.name, folder, failure));
            }
        }

        self.download(&link, folder, path).await
    }

    async fn absent_path(&self, name: &str, folder: &str) -> Result<Option<PathBuf>> {
        let path = self.store.document_path(folder, name);
        if self.store.contains(&path).await? {
            Ok(None)
        } else {
            Ok(Some(path))
        }
    }

    fn skipped(&self, name: &str, folder: &str) -> FetchOutcome {
        tracing::info!(document = %name, folder = %folder, "Skipping document");
        FetchOutcome::Skipped {
            path: self.store.document_path(folder, name),
        }
    }

    fn failed(&self, name: &str, folder: &str, failure: FetchFailure) -> DownloadError {
        tracing::error!(
            document = %name,
            folder = %folder,
            error = %failure,
            "Downloading document failed"
        );
        DownloadError::Fetch {
            document: name.to_string(),
            failure,
        }
    }

    async fn download(&self, link: &LinkRef, folder: &str, path: PathBuf) -> Result<FetchOutcome> {
        let page = match self.portal.navigate(&link.url).await {
            Ok(page) => page,
            Err(e) => {
                let failure = FetchFailure::Network(e.to_string());
                return Err(self.failed(&link.name, folder, failure));
            }
        };

        if let Some(failure) = FetchFailure::from_status(page.status) {
            return Err(self.failed(&link.name, folder, failure));
        }

        tracing::info!(document = %link.name, url = %link.url, "Downloading document");
        self.store.write(&path, &page.body).await?;

        let document = StoredDocument {
            size: page.body.len() as u64,
            sha256: sha256_hex(&page.body),
            path,
        };

        tracing::debug!(
            path = %document.path.display(),
            size = document.size,
            sha256 = %document.sha256,
            "Stored document"
        );

        Ok(FetchOutcome::Created(document))
    }
}

fn sha256_hex(body: &[u8]) -> String {
    let digest = Sha256::digest(body);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
