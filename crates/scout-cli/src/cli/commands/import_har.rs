//! `scout import-har <path>` – replay a HAR capture as one page session.

use anyhow::Result;
use scout_core::config::ScoutConfig;
use scout_core::har;
use scout_core::url_model::normalize_page_url;
use std::path::Path;

use super::{open_host, print_scored};

pub async fn run_import_har(cfg: &ScoutConfig, path: &Path, page_url: Option<&str>) -> Result<()> {
    let page_url = page_url.map(normalize_page_url);
    let (mut host, mut rx) = open_host(cfg)?;
    let summary = har::replay_har_file(&mut host, &mut rx, path, page_url.as_deref()).await?;

    println!(
        "Replayed {} entries for {} ({} blocked)",
        summary.entries, summary.page_url, summary.blocked
    );
    print_scored(&host.ranked_scored());
    Ok(())
}
