//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Next-page marker on {0} has no link")]
    MalformedPager(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
