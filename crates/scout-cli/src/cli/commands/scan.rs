//! `scout scan <html-file> --page-url <url> [--batch]`

use anyhow::{Context, Result};
use scout_core::config::ScoutConfig;
use scout_core::rank;
use scout_core::url_model::normalize_page_url;
use std::path::Path;

use super::{open_host, print_scored};

pub fn run_scan(cfg: &ScoutConfig, path: &Path, page_url: &str, batch: bool) -> Result<()> {
    let html = std::fs::read_to_string(path)
        .with_context(|| format!("read page: {}", path.display()))?;
    let page_url = normalize_page_url(page_url);

    let (mut host, mut rx) = open_host(cfg)?;
    host.on_navigation_start(&page_url);

    if batch {
        host.request_full_scan(&html);
        host.drain(&mut rx);
        let shown = host.listener().last().unwrap_or_default();
        let scored: Vec<(String, i32)> = shown
            .iter()
            .map(|u| {
                let s = rank::score(u, host.page().host(), host.blocklist());
                (u.clone(), s)
            })
            .collect();
        print_scored(&scored);
    } else {
        host.on_page_load_finished(&page_url, &html);
        host.drain(&mut rx);
        print_scored(&host.ranked_scored());
    }
    Ok(())
}
