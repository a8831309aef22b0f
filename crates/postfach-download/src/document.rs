//! Download results

use std::path::{Path, PathBuf};

/// A document written by this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    pub path: PathBuf,
    pub size: u64,
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Fetched and written
    Created(StoredDocument),
    /// A file was already there; nothing was requested
    Skipped { path: PathBuf },
}

impl FetchOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, FetchOutcome::Created(_))
    }

    pub fn path(&self) -> &Path {
        match self {
            FetchOutcome::Created(doc) => &doc.path,
            FetchOutcome::Skipped { path } => path,
        }
    }
}
