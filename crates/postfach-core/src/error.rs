//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Session error: {0}")]
    Session(#[from] postfach_session::SessionError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] postfach_navigation::NavigationError),

    #[error("Download error: {0}")]
    Download(#[from] postfach_download::DownloadError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
