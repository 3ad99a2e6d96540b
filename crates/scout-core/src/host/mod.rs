//! Host-side page controller.
//!
//! [`PageHost`] owns everything that lives for one top-level page: the
//! candidate set, the page context used for ranking, and the session's
//! sniffer. All mutation happens through `&mut self`, so callers serialize
//! sniffer notifications, lifecycle events and request interception onto a
//! single context.
//!
//! Navigation start is the cancellation boundary: it bumps the session id,
//! and any notification stamped with an older id is dropped on arrival.

mod listener;
mod playback;
mod request;

pub use listener::{CandidatesListener, Notice, RecordingListener};
pub use playback::PlaybackRequest;
pub use request::{InterceptVerdict, RequestOrigin, BLOCKED_STATUS};

use std::fmt::Display;
use std::sync::Arc;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use url::Url;

use crate::aggregator::Aggregator;
use crate::blocklist::Blocklist;
use crate::classify::{looks_like_ad, looks_like_media};
use crate::config::ScoutConfig;
use crate::rank;
use crate::sniffer::{Bridge, Payload, SessionId, Sniffer, SnifferMessage, SnifferOptions};
use crate::url_model::host_of;

/// Knobs the host needs from configuration.
#[derive(Debug, Clone)]
pub struct HostSettings {
    pub adblock_enabled: bool,
    pub sniffer: SnifferOptions,
    pub user_agent: String,
}

impl Default for HostSettings {
    fn default() -> Self {
        HostSettings::from(&ScoutConfig::default())
    }
}

impl From<&ScoutConfig> for HostSettings {
    fn from(cfg: &ScoutConfig) -> Self {
        Self {
            adblock_enabled: cfg.adblock_enabled,
            sniffer: SnifferOptions {
                max_structured_depth: cfg.structured_data_max_depth,
            },
            user_agent: cfg.user_agent.clone(),
        }
    }
}

/// The currently loading/loaded top-level page.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    url: Option<String>,
    host: Option<String>,
}

impl PageContext {
    fn set(&mut self, url: &str) {
        self.url = Some(url.to_string());
        self.host = host_of(url);
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }
}

pub struct PageHost<L> {
    blocklist: Arc<Blocklist>,
    settings: HostSettings,
    aggregator: Aggregator,
    page: PageContext,
    session: SessionId,
    sniffer: Option<Sniffer>,
    tx: UnboundedSender<SnifferMessage>,
    listener: L,
}

impl<L: CandidatesListener> PageHost<L> {
    /// Create a host and the receiving end of its sniffer channel.
    pub fn new(
        blocklist: Arc<Blocklist>,
        settings: HostSettings,
        listener: L,
    ) -> (Self, UnboundedReceiver<SnifferMessage>) {
        let (tx, rx) = unbounded_channel();
        let host = Self {
            blocklist,
            settings,
            aggregator: Aggregator::new(),
            page: PageContext::default(),
            session: SessionId::default(),
            sniffer: None,
            tx,
            listener,
        };
        (host, rx)
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn page(&self) -> &PageContext {
        &self.page
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn blocklist(&self) -> &Blocklist {
        &self.blocklist
    }

    /// Current candidates in insertion order.
    pub fn candidates(&self) -> &[String] {
        self.aggregator.all()
    }

    pub fn adblock_enabled(&self) -> bool {
        self.settings.adblock_enabled
    }

    pub fn set_adblock_enabled(&mut self, enabled: bool) {
        self.settings.adblock_enabled = enabled;
    }

    /// The sniffer of the current session, if one has been created.
    pub fn sniffer(&self) -> Option<&Sniffer> {
        self.sniffer
            .as_ref()
            .filter(|s| s.session() == self.session)
    }

    /// Top-level navigation started: new session, empty candidate set.
    pub fn on_navigation_start(&mut self, url: &str) {
        self.session = self.session.next();
        self.aggregator.reset();
        self.sniffer = None;
        self.page.set(url);
        tracing::info!(session = %self.session, %url, "navigation started");
    }

    /// Page finished loading: install the session's sniffer (once) and run
    /// the automatic passive scan over `document`.
    pub fn on_page_load_finished(&mut self, url: &str, document: &str) -> Sniffer {
        if self.page.url().is_none() {
            self.page.set(url);
        }
        let sniffer = self.session_sniffer(Some(url));
        sniffer.install();
        let hits = sniffer.scan_document(document);
        tracing::info!(session = %self.session, %url, hits, "page load finished");
        sniffer
    }

    /// On-demand full scan. The batch reaches the host through the channel
    /// like any other notification; the list is also returned directly.
    pub fn request_full_scan(&mut self, document: &str) -> Vec<String> {
        self.session_sniffer(None).full_scan(document)
    }

    fn session_sniffer(&mut self, document_url: Option<&str>) -> Sniffer {
        if let Some(s) = self.sniffer() {
            return s.clone();
        }
        // Without a parsable location nothing relative can resolve.
        let location = document_url
            .or(self.page.url())
            .and_then(|u| Url::parse(u).ok())
            .unwrap_or_else(|| Url::parse("about:blank").expect("about:blank is a valid url"));
        let sniffer = Sniffer::new(
            location,
            Bridge::new(self.session, self.tx.clone()),
            self.settings.sniffer,
        );
        self.sniffer = Some(sniffer.clone());
        sniffer
    }

    /// Apply one notification from the page. Returns false for stale ones.
    pub fn handle_message(&mut self, msg: SnifferMessage) -> bool {
        if msg.session != self.session {
            tracing::debug!(
                stale = %msg.session,
                current = %self.session,
                "discarding notification from previous page"
            );
            return false;
        }
        match msg.payload {
            Payload::Hit(url) => {
                self.admit(&url);
            }
            Payload::Batch(json) => self.apply_batch(&json),
        }
        true
    }

    /// Process every queued notification in arrival order.
    pub fn drain(&mut self, rx: &mut UnboundedReceiver<SnifferMessage>) -> usize {
        let mut applied = 0;
        while let Ok(msg) = rx.try_recv() {
            if self.handle_message(msg) {
                applied += 1;
            }
        }
        applied
    }

    /// Await the next notification and apply it. Returns `None` once the
    /// channel is closed.
    pub async fn next_message(&mut self, rx: &mut UnboundedReceiver<SnifferMessage>) -> Option<bool> {
        let msg = rx.recv().await?;
        Some(self.handle_message(msg))
    }

    /// Non-string elements are skipped; a payload that is not a JSON array
    /// counts as an empty batch.
    fn apply_batch(&mut self, json: &str) {
        let list: Vec<String> = match serde_json::from_str::<serde_json::Value>(json) {
            Ok(serde_json::Value::Array(items)) => {
                let list: Vec<String> = items
                    .iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect();
                if list.len() != items.len() {
                    tracing::debug!(
                        skipped = items.len() - list.len(),
                        "ignoring non-string batch entries"
                    );
                }
                list
            }
            Ok(_) => {
                tracing::warn!("batch notification is not an array, treating as empty");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("malformed batch notification, treating as empty: {}", e);
                Vec::new()
            }
        };
        for url in &list {
            self.aggregator.add(url);
        }
        let ranked = rank::rank(&list, self.page.host(), &self.blocklist);
        self.listener.on_candidates_changed(&ranked);
    }

    /// Insert into the candidate set; a successful insertion refreshes the
    /// listener with the full ranked list.
    pub fn add_candidate(&mut self, url: &str) -> bool {
        if !self.aggregator.add(url) {
            return false;
        }
        let ranked = self.ranked();
        self.listener.on_candidates_changed(&ranked);
        true
    }

    /// Live-discovery intake (sniffer hits, intercepted requests): ad-looking
    /// URLs are dropped here rather than ranked.
    fn admit(&mut self, url: &str) -> bool {
        if looks_like_ad(url, &self.blocklist) {
            tracing::debug!(%url, "dropping ad-looking candidate");
            return false;
        }
        self.add_candidate(url)
    }

    /// Network-layer hook for every request the page (or its service worker)
    /// issues. Media-looking URLs become candidates unless they look like ads;
    /// with the ad filter enabled those requests are also hard-blocked.
    pub fn intercept_request(&mut self, url: &str, origin: RequestOrigin) -> InterceptVerdict {
        if self.settings.adblock_enabled && looks_like_ad(url, &self.blocklist) {
            tracing::debug!(%origin, %url, "blocked request");
            return InterceptVerdict::blocked();
        }
        if looks_like_media(url) {
            self.admit(url);
        }
        InterceptVerdict::Allow
    }

    pub fn ranked(&self) -> Vec<String> {
        rank::rank(self.aggregator.all(), self.page.host(), &self.blocklist)
    }

    pub fn ranked_scored(&self) -> Vec<(String, i32)> {
        rank::rank_scored(self.aggregator.all(), self.page.host(), &self.blocklist)
    }

    /// The user activated `url`: build the request the player should make.
    pub fn select(&self, url: &str) -> PlaybackRequest {
        tracing::info!(%url, "candidate selected");
        PlaybackRequest::new(url, self.page.url(), &self.settings.user_agent)
    }

    /// Playback of a selected candidate failed; tell the user, change nothing.
    pub fn report_playback_failure(&mut self, url: &str, error: &dyn Display) {
        tracing::warn!(%url, "playback failed: {}", error);
        self.listener.on_notice(&Notice::PlaybackFailed {
            url: url.to_string(),
            reason: error.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(domains: &[&str]) -> (PageHost<RecordingListener>, UnboundedReceiver<SnifferMessage>) {
        PageHost::new(
            Arc::new(Blocklist::from_domains(domains)),
            HostSettings::default(),
            RecordingListener::default(),
        )
    }

    #[test]
    fn duplicate_hit_notifies_once() {
        let (mut h, _rx) = host(&[]);
        h.on_navigation_start("https://x.com/watch");
        assert!(h.add_candidate("https://x.com/a.m3u8"));
        assert!(!h.add_candidate("https://x.com/a.m3u8"));
        assert_eq!(h.candidates().len(), 1);
        assert_eq!(h.listener().lists.len(), 1);
    }

    #[test]
    fn rejected_candidates_do_not_notify() {
        let (mut h, _rx) = host(&[]);
        h.on_navigation_start("https://x.com/watch");
        assert!(!h.add_candidate("blob:https://x.com/1"));
        assert!(!h.add_candidate("https://x.com/page.html"));
        assert!(h.listener().lists.is_empty());
    }

    #[test]
    fn navigation_resets_and_stale_messages_dropped() {
        let (mut h, mut rx) = host(&[]);
        h.on_navigation_start("https://x.com/one");
        let old = h.on_page_load_finished("https://x.com/one", "");
        h.drain(&mut rx);

        h.add_candidate("https://x.com/first.mp4");
        h.on_navigation_start("https://y.com/two");
        assert!(h.candidates().is_empty());

        // A late completion from the first page.
        assert!(old.on_media_src_assigned("https://x.com/late.mp4"));
        assert_eq!(h.drain(&mut rx), 0);
        assert!(h.candidates().is_empty());
        assert_eq!(h.page().host(), Some("y.com"));
    }

    #[test]
    fn load_finished_installs_once_and_scans() {
        let (mut h, mut rx) = host(&[]);
        h.on_navigation_start("https://x.com/watch");
        let doc = r#"<video src="/v/master.m3u8"></video>"#;
        let s1 = h.on_page_load_finished("https://x.com/watch", doc);
        let s2 = h.on_page_load_finished("https://x.com/watch", doc);
        assert!(s1.is_installed() && s2.is_installed());
        assert_eq!(h.drain(&mut rx), 1);
        assert_eq!(h.candidates(), &["https://x.com/v/master.m3u8".to_string()]);
    }

    #[test]
    fn batch_notifies_ranked_batch() {
        let (mut h, mut rx) = host(&["ads.net"]);
        h.on_navigation_start("https://x.com/watch");
        let doc = r#"
            <a href="https://ads.net/track.mp4"></a>
            <a href="/a/segment001.m3u8"></a>
            <a href="/master.m3u8"></a>"#;
        h.request_full_scan(doc);
        assert_eq!(h.drain(&mut rx), 1);
        assert_eq!(
            h.listener().last().unwrap(),
            &[
                "https://x.com/master.m3u8".to_string(),
                "https://x.com/a/segment001.m3u8".to_string(),
                "https://ads.net/track.mp4".to_string(),
            ]
        );
        assert_eq!(h.candidates().len(), 3);
        assert_eq!(h.listener().lists.len(), 1);
    }

    #[test]
    fn malformed_batch_yields_empty_list() {
        let (mut h, _rx) = host(&[]);
        h.on_navigation_start("https://x.com/");
        let msg = SnifferMessage {
            session: h.session(),
            payload: Payload::Batch("[not json".into()),
        };
        assert!(h.handle_message(msg));
        assert_eq!(h.listener().last(), Some(&[][..]));
    }

    #[test]
    fn batch_skips_non_string_entries() {
        let (mut h, _rx) = host(&[]);
        h.on_navigation_start("https://x.com/");
        let msg = SnifferMessage {
            session: h.session(),
            payload: Payload::Batch(
                r#"["https://x.com/a.mp4", 5, null, "https://x.com/b.m3u8"]"#.into(),
            ),
        };
        assert!(h.handle_message(msg));
        assert_eq!(
            h.listener().last().unwrap(),
            &["https://x.com/b.m3u8".to_string(), "https://x.com/a.mp4".to_string()]
        );
        assert_eq!(h.candidates().len(), 2);

        let not_array = SnifferMessage {
            session: h.session(),
            payload: Payload::Batch(r#"{"url":"https://x.com/c.mp4"}"#.into()),
        };
        assert!(h.handle_message(not_array));
        assert_eq!(h.listener().last(), Some(&[][..]));
        assert_eq!(h.candidates().len(), 2);
    }

    #[test]
    fn intercept_blocks_only_when_enabled() {
        let (mut h, _rx) = host(&["ads.net"]);
        h.on_navigation_start("https://x.com/");
        assert_eq!(
            h.intercept_request("https://cdn.ads.net/pre.mp4", RequestOrigin::Page),
            InterceptVerdict::Block { status: 403, reason: "Blocked" }
        );
        assert!(h.candidates().is_empty());

        h.set_adblock_enabled(false);
        assert_eq!(
            h.intercept_request("https://cdn.ads.net/pre.mp4", RequestOrigin::ServiceWorker),
            InterceptVerdict::Allow
        );
        // Allowed through, but still not a candidate.
        assert!(h.candidates().is_empty());
    }

    #[test]
    fn ad_hits_dropped_but_batch_keeps_them() {
        let (mut h, mut rx) = host(&["ads.net"]);
        h.on_navigation_start("https://x.com/");
        let s = h.on_page_load_finished("https://x.com/", "");
        s.on_media_src_assigned("https://ads.net/track.mp4");
        s.on_media_src_assigned("https://x.com/promo/teaser.mp4");
        h.drain(&mut rx);
        assert!(h.candidates().is_empty());

        h.request_full_scan(r#"<a href="https://ads.net/track.mp4"></a>"#);
        h.drain(&mut rx);
        assert_eq!(h.candidates(), &["https://ads.net/track.mp4".to_string()]);
    }

    #[test]
    fn intercept_collects_media_requests() {
        let (mut h, _rx) = host(&[]);
        h.on_navigation_start("https://x.com/");
        assert!(!h
            .intercept_request("https://x.com/app.js", RequestOrigin::Page)
            .is_blocked());
        h.intercept_request("https://cdn.x.com/hls/master.m3u8", RequestOrigin::ServiceWorker);
        assert_eq!(h.candidates(), &["https://cdn.x.com/hls/master.m3u8".to_string()]);
    }

    #[test]
    fn select_and_playback_failure() {
        let (mut h, _rx) = host(&[]);
        h.on_navigation_start("https://x.com/watch");
        h.add_candidate("https://x.com/a.mp4");
        let req = h.select("https://x.com/a.mp4");
        assert_eq!(req.headers.get("Referer").unwrap(), "https://x.com/watch");

        h.report_playback_failure("https://x.com/a.mp4", &"codec unsupported");
        assert_eq!(h.listener().notices.len(), 1);
        assert_eq!(h.candidates().len(), 1);
    }
}
