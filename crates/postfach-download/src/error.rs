//! Download error types

use thiserror::Error;

/// Why a single document could not be fetched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    #[error("network error: {0}")]
    Network(String),

    #[error("access denied (HTTP {0})")]
    Auth(u16),

    #[error("not found")]
    NotFound,

    #[error("unexpected HTTP status {0}")]
    Status(u16),
}

impl FetchFailure {
    /// Classify a non-2xx status
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            401 | 403 => Some(FetchFailure::Auth(status)),
            404 | 410 => Some(FetchFailure::NotFound),
            _ => Some(FetchFailure::Status(status)),
        }
    }
}

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Downloading {document} failed: {failure}")]
    Fetch {
        document: String,
        failure: FetchFailure,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
