//! Postfach Document Downloads
//!
//! - Documents land at `<root>/<folder>/<name>.<extension>`
//! - Remote names are sanitized before they touch the filesystem
//! - An existing file means "already downloaded"; nothing else is tracked
//! - SHA-256 of every stored document is reported

mod document;
mod error;
mod fetcher;
mod store;

pub use document::{FetchOutcome, StoredDocument};
pub use error::{DownloadError, FetchFailure};
pub use fetcher::DocumentFetcher;
pub use store::{sanitize_segment, DocumentStore, DEFAULT_EXTENSION};

pub type Result<T> = std::result::Result<T, DownloadError>;
