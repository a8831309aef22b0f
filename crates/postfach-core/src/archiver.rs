//! Archive run coordination

use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use postfach_download::{DocumentFetcher, DocumentStore, DownloadError, FetchOutcome};
use postfach_navigation::{parse_folders, AttachmentLink, FolderRef, ListingPage, Pager};
use postfach_session::{Authenticator, Credentials, Portal};

use crate::config::{Config, FailurePolicy};
use crate::error::CoreError;
use crate::summary::RunSummary;
use crate::Result;

/// Parsed portal endpoints
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub login: Url,
    pub logout: Url,
    pub archive: Url,
    pub legacy_message: Url,
}

impl Endpoints {
    pub fn from_config(config: &Config) -> Result<Self> {
        let parse = |name: &str, value: &str| {
            Url::parse(value).map_err(|e| CoreError::Config(format!("{name}: {e}")))
        };

        Ok(Self {
            login: parse("login_url", &config.login_url)?,
            logout: parse("logout_url", &config.logout_url)?,
            archive: parse("archive_url", &config.archive_url)?,
            legacy_message: parse("legacy_message_url", &config.legacy_message_url)?,
        })
    }
}

/// Downloads the whole mailbox archive through one portal session
pub struct Archiver<P> {
    portal: P,
    endpoints: Endpoints,
    auth: Authenticator,
    store: DocumentStore,
    max_pages: usize,
    delay: Duration,
    policy: FailurePolicy,
    summary_file: Option<PathBuf>,
}

impl<P: Portal> Archiver<P> {
    pub fn new(portal: P, config: Config) -> Result<Self> {
        config.validate()?;
        let endpoints = Endpoints::from_config(&config)?;
        let auth = Authenticator::new(endpoints.login.clone(), endpoints.logout.clone())
            .with_fields(&config.username_field, &config.password_field);
        let store =
            DocumentStore::new(config.data_dir.clone()).with_extension(&config.document_extension);

        Ok(Self {
            portal,
            endpoints,
            auth,
            store,
            max_pages: config.max_pages,
            delay: config.download_delay(),
            policy: config.failure_policy,
            summary_file: config.summary_file,
        })
    }

    pub fn portal(&self) -> &P {
        &self.portal
    }

    /// Login, download the archive, logout.
    ///
    /// Logout is attempted even when the download fails; the download error
    /// takes precedence over a logout error.
    pub async fn run(&self, credentials: &Credentials) -> Result<RunSummary> {
        self.auth.login(&self.portal, credentials).await?;

        let result = self.download_archive().await;
        let logout = self.auth.logout(&self.portal).await;

        let summary = result?;
        logout?;

        if let Some(path) = &self.summary_file {
            summary.save(path).await?;
        }
        Ok(summary)
    }

    pub async fn list_folders(&self) -> Result<Vec<FolderRef>> {
        let page = self
            .portal
            .navigate(&self.endpoints.archive)
            .await?
            .error_for_status()?;

        let folders = parse_folders(&page)?;
        tracing::debug!(count = folders.len(), "Found archive folders");
        Ok(folders)
    }

    /// Walk every archive folder, mirroring it below the data root
    pub async fn download_archive(&self) -> Result<RunSummary> {
        let mut summary = RunSummary::start();
        let fetcher = DocumentFetcher::new(
            &self.portal,
            self.store.clone(),
            self.endpoints.legacy_message.clone(),
        );

        for folder in self.list_folders().await? {
            self.store.ensure_folder(&folder.name).await?;
            self.walk_folder(&fetcher, &folder, &mut summary).await?;
            summary.folders += 1;
        }

        summary.finish();
        tracing::info!("Downloading archive complete");
        summary.log();

        Ok(summary)
    }

    /// Visit the folder's listing pages, following next-page links, and
    /// fetch every listed document.
    pub async fn walk_folder(
        &self,
        fetcher: &DocumentFetcher<'_, P>,
        folder: &FolderRef,
        summary: &mut RunSummary,
    ) -> Result<()> {
        let mut pager = Pager::new(self.max_pages);
        let mut next = Some(folder.url.clone());

        while let Some(url) = next.take() {
            if !pager.admit(&url) {
                break;
            }

            let page = self.portal.navigate(&url).await?.error_for_status()?;
            let listing = ListingPage::parse(&page)?;
            summary.pages += 1;

            tracing::debug!(
                folder = %folder.name,
                page = pager.visited(),
                documents = listing.attachments.len(),
                "Switched to page"
            );

            for attachment in &listing.attachments {
                self.fetch(fetcher, attachment, &folder.name, summary).await?;
            }

            next = listing.next_page;
        }

        Ok(())
    }

    async fn fetch(
        &self,
        fetcher: &DocumentFetcher<'_, P>,
        attachment: &AttachmentLink,
        folder: &str,
        summary: &mut RunSummary,
    ) -> Result<()> {
        match fetcher.fetch_attachment(attachment, folder).await {
            Ok(FetchOutcome::Created(_)) => {
                summary.created += 1;
                if !self.delay.is_zero() {
                    tokio::time::sleep(self.delay).await;
                }
            }
            Ok(FetchOutcome::Skipped { .. }) => summary.skipped += 1,
            Err(DownloadError::Fetch { .. }) if self.policy == FailurePolicy::Continue => {
                summary.failed += 1;
            }
            Err(e) => return Err(e.into()),
        }

        Ok(())
    }
}
