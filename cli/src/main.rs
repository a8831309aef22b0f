//! Postfach Archiver
//!
//! Prompts for the portal credentials, then downloads the whole mailbox
//! archive into `data/<folder>/<document>.pdf`.

mod prompt;

use anyhow::{Context, Result};
use std::path::Path;

use postfach_core::{Archiver, Config, HttpPortal};

/// Optional overrides, read from the working directory
const CONFIG_FILE: &str = "postfach.json";

#[tokio::main]
async fn main() -> Result<()> {
    postfach_core::init_logging();

    let config = Config::load_or_default(Path::new(CONFIG_FILE))
        .with_context(|| format!("Failed to load {CONFIG_FILE}"))?;

    let credentials = prompt::credentials()?;

    let portal = HttpPortal::new(config.request_timeout(), &config.user_agent)?;
    let archiver = Archiver::new(portal, config)?;

    let summary = archiver
        .run(&credentials)
        .await
        .context("Archive download failed")?;

    tracing::info!(
        created = summary.created,
        skipped = summary.skipped,
        "Done"
    );

    Ok(())
}
