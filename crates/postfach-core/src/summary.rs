//! Run summary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Folders fully walked
    pub folders: usize,
    /// Listing pages visited
    pub pages: usize,
    pub created: usize,
    pub skipped: usize,
    /// Documents that failed under `FailurePolicy::Continue`
    pub failed: usize,
}

impl RunSummary {
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            folders: 0,
            pages: 0,
            created: 0,
            skipped: 0,
            failed: 0,
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn log(&self) {
        let elapsed = self
            .finished_at
            .map(|end| (end - self.started_at).num_seconds())
            .unwrap_or_default();

        tracing::info!(
            folders = self.folders,
            pages = self.pages,
            created = self.created,
            skipped = self.skipped,
            failed = self.failed,
            elapsed_secs = elapsed,
            "Archive run summary"
        );
    }

    /// Write the summary as pretty JSON, replacing any previous file
    pub async fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        tracing::debug!(path = %path.display(), "Saved run summary");
        Ok(())
    }
}
