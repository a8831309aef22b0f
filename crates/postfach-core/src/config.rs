//! Archiver configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::CoreError;
use crate::Result;

/// What to do when a single document cannot be fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the run on the first failed document
    #[default]
    Abort,
    /// Log the failure, count it and carry on with the next document
    Continue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Login entry point carrying the credential form
    pub login_url: String,
    pub logout_url: String,
    /// Archive index listing the mailbox folders
    pub archive_url: String,
    /// Serves old-style message attachments
    pub legacy_message_url: String,
    pub username_field: String,
    pub password_field: String,
    /// Root directory documents are stored under
    pub data_dir: PathBuf,
    pub document_extension: String,
    /// Pause after each newly stored document
    pub download_delay_ms: u64,
    pub request_timeout_secs: u64,
    /// Upper bound on listing pages per folder
    pub max_pages: usize,
    pub failure_policy: FailurePolicy,
    pub user_agent: String,
    /// Where to write the JSON summary of a finished run; not written if unset
    pub summary_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            login_url: "https://www.dkb.de/banking".to_string(),
            logout_url: "https://www.dkb.de/DkbTransactionBanking/banner.xhtml?$event=logout"
                .to_string(),
            archive_url:
                "https://www.dkb.de/banking/postfach/ordner?$event=gotoFolder&folderNameOrId=archiv"
                    .to_string(),
            legacy_message_url: "https://www.dkb.de/DkbTransactionBanking/content/mailbox/Dialogs/ESafe/Details.xhtml?$event=downloadMessage".to_string(),
            username_field: postfach_session::DEFAULT_USERNAME_FIELD.to_string(),
            password_field: postfach_session::DEFAULT_PASSWORD_FIELD.to_string(),
            data_dir: PathBuf::from("data"),
            document_extension: postfach_download::DEFAULT_EXTENSION.to_string(),
            download_delay_ms: 100,
            request_timeout_secs: 60,
            max_pages: 1000,
            failure_policy: FailurePolicy::Abort,
            user_agent: "Mozilla/5.0 (Postfach Archiver)".to_string(),
            summary_file: None,
        }
    }
}

impl Config {
    /// Load a JSON config file; missing fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise use the defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.is_file() {
            tracing::info!(path = %path.display(), "Loading configuration");
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_pages == 0 {
            return Err(CoreError::Config("max_pages must be at least 1".to_string()));
        }
        if self.username_field.trim().is_empty() || self.password_field.trim().is_empty() {
            return Err(CoreError::Config(
                "login form field names cannot be empty".to_string(),
            ));
        }
        if self.document_extension.trim_start_matches('.').is_empty() {
            return Err(CoreError::Config("document_extension cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn download_delay(&self) -> Duration {
        Duration::from_millis(self.download_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
