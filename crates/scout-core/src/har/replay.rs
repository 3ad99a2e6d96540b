//! Drive a `PageHost` with a recorded HAR capture.
//!
//! The capture stands in for the browser: its first HTML document is the
//! page, every entry passes through network-layer interception, and once the
//! page has "loaded" the same entries are fed through the sniffer's fetch or
//! XHR hooks with their recorded bodies as manifest bodies.

use anyhow::{Context, Result};
use std::path::Path;

use tokio::sync::mpsc::UnboundedReceiver;

use super::parse::{HarEntry, HarLog};
use crate::host::{CandidatesListener, PageHost, RequestOrigin};
use crate::sniffer::{ResponseMeta, SnifferMessage};

/// Counters for one replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub entries: usize,
    pub blocked: usize,
    pub page_url: String,
}

pub fn load_har(path: &Path) -> Result<HarLog> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read HAR file: {}", path.display()))?;
    let har: HarLog = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse HAR JSON: {}", path.display()))?;
    Ok(har)
}

/// Replay `har` as one page session on `host`.
///
/// `page_url` overrides the page location; otherwise the first HTML document
/// entry (or the very first entry) is used.
pub async fn replay_har<L: CandidatesListener>(
    host: &mut PageHost<L>,
    rx: &mut UnboundedReceiver<SnifferMessage>,
    har: &HarLog,
    page_url: Option<&str>,
) -> Result<ReplaySummary> {
    let entries = &har.log.entries;
    if entries.is_empty() {
        anyhow::bail!("HAR file has no entries");
    }
    if let Some(title) = har.log.pages.first().map(|p| p.title.as_str()) {
        tracing::debug!(title, "replaying HAR page");
    }

    let document = entries.iter().find(|e| e.is_html_document());
    let page_url = page_url
        .map(String::from)
        .or_else(|| document.map(|d| d.request.url.clone()))
        .unwrap_or_else(|| entries[0].request.url.clone());

    host.on_navigation_start(&page_url);

    let mut summary = ReplaySummary {
        entries: entries.len(),
        page_url: page_url.clone(),
        ..Default::default()
    };
    for entry in entries {
        if host
            .intercept_request(&entry.request.url, RequestOrigin::Page)
            .is_blocked()
        {
            summary.blocked += 1;
        }
    }
    host.drain(rx);

    let html = document.and_then(HarEntry::body_text).unwrap_or("");
    let sniffer = host.on_page_load_finished(&page_url, html);

    for entry in entries {
        let response = ResponseMeta::new(&entry.request.url, entry.content_type());
        let body = entry.body_text();
        if entry.is_xhr() {
            sniffer.on_xhr_open(&entry.request.url);
            sniffer.on_xhr_load(&response, body.unwrap_or(""));
        } else {
            sniffer.on_fetch(&entry.request.url);
            let body = body.map(String::from).ok_or("body not captured");
            sniffer.on_fetch_response(&response, async { body }).await;
        }
        host.drain(rx);
    }

    tracing::info!(
        entries = summary.entries,
        blocked = summary.blocked,
        candidates = host.candidates().len(),
        "HAR replay complete"
    );
    Ok(summary)
}

/// Convenience for callers holding a path.
pub async fn replay_har_file<L: CandidatesListener>(
    host: &mut PageHost<L>,
    rx: &mut UnboundedReceiver<SnifferMessage>,
    path: &Path,
    page_url: Option<&str>,
) -> Result<ReplaySummary> {
    let har = load_har(path)?;
    replay_har(host, rx, &har, page_url).await
}
