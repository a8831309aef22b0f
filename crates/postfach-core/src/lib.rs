//! Postfach Archiver Core
//!
//! Composes the run: login → folders → pages → documents → logout.
//! All state is either the portal session or the files on disk.

mod archiver;
mod config;
mod error;
mod summary;

pub use archiver::{Archiver, Endpoints};
pub use config::{Config, FailurePolicy};
pub use error::CoreError;
pub use summary::RunSummary;

// Re-export component types
pub use postfach_download::{
    sanitize_segment, DocumentFetcher, DocumentStore, DownloadError, FetchFailure, FetchOutcome,
    StoredDocument,
};
pub use postfach_navigation::{
    parse_folders, AttachmentLink, FolderRef, LinkRef, ListingPage, NavigationError, Pager,
};
pub use postfach_session::{Authenticator, Credentials, HttpPortal, Page, Portal, SessionError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
