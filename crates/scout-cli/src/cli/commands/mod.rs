//! CLI command handlers, one per file.

mod adblock;
mod blocked;
mod import_har;
mod scan;

pub use adblock::run_adblock;
pub use blocked::run_blocked;
pub use import_har::run_import_har;
pub use scan::run_scan;

use anyhow::Result;
use scout_core::blocklist::{self, Blocklist};
use scout_core::config::ScoutConfig;
use scout_core::host::{HostSettings, PageHost, RecordingListener};
use scout_core::sniffer::SnifferMessage;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

pub(crate) fn load_blocklist(cfg: &ScoutConfig) -> Result<Blocklist> {
    Ok(blocklist::load(&cfg.resolved_blocklist_path()?))
}

pub(crate) fn open_host(
    cfg: &ScoutConfig,
) -> Result<(PageHost<RecordingListener>, UnboundedReceiver<SnifferMessage>)> {
    let blocklist = Arc::new(load_blocklist(cfg)?);
    Ok(PageHost::new(
        blocklist,
        HostSettings::from(cfg),
        RecordingListener::default(),
    ))
}

pub(crate) fn print_scored(list: &[(String, i32)]) {
    if list.is_empty() {
        println!("No media sources found.");
        return;
    }
    for (url, score) in list {
        println!("{score:>5}  {url}");
    }
}
