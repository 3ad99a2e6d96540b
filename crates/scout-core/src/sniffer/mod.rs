//! In-page sniffer.
//!
//! One [`Sniffer`] exists per page session. It combines a passive scan of the
//! document with interception hooks for fetch, XHR and media `src` changes,
//! and forwards each newly seen media URL across the [`Bridge`] exactly once
//! per session. The interception hooks are inert until [`Sniffer::install`]
//! has been called; installing twice is a no-op.

mod dom;
mod intercept;
mod message;
mod structured;

pub use dom::{collect_candidates, DocumentScan};
pub use intercept::ResponseMeta;
pub use message::{Bridge, Payload, SessionId, SnifferMessage};
pub use structured::{drill, CANDIDATE_KEYS};

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use url::Url;

use crate::classify::looks_like_media;
use crate::error::Rejection;
use crate::url_model::normalize_candidate;

/// Default bound on structured-data nesting.
pub const DEFAULT_STRUCTURED_DEPTH: usize = 16;

#[derive(Debug, Clone, Copy)]
pub struct SnifferOptions {
    pub max_structured_depth: usize,
}

impl Default for SnifferOptions {
    fn default() -> Self {
        Self {
            max_structured_depth: DEFAULT_STRUCTURED_DEPTH,
        }
    }
}

/// Per-session instrumentation handle. Cloning shares state.
#[derive(Debug, Clone)]
pub struct Sniffer {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    document_url: Url,
    bridge: Bridge,
    options: SnifferOptions,
    installed: AtomicBool,
    seen: Mutex<HashSet<String>>,
}

impl Sniffer {
    pub fn new(document_url: Url, bridge: Bridge, options: SnifferOptions) -> Self {
        Self {
            inner: Arc::new(Inner {
                document_url,
                bridge,
                options,
                installed: AtomicBool::new(false),
                seen: Mutex::new(HashSet::new()),
            }),
        }
    }

    pub fn session(&self) -> SessionId {
        self.inner.bridge.session()
    }

    /// Arm the interception hooks. Returns `false` if already installed.
    pub fn install(&self) -> bool {
        let fresh = !self.inner.installed.swap(true, Ordering::SeqCst);
        if fresh {
            tracing::info!(session = %self.session(), url = %self.inner.document_url, "sniffer installed");
        } else {
            tracing::debug!(session = %self.session(), "sniffer already installed");
        }
        fresh
    }

    pub fn is_installed(&self) -> bool {
        self.inner.installed.load(Ordering::SeqCst)
    }

    /// Normalize `raw` against `base` and require a media marker.
    fn accept_against(&self, raw: &str, base: &Url) -> Result<String, Rejection> {
        let url = normalize_candidate(raw, base)?;
        let url = String::from(url);
        if !looks_like_media(&url) {
            return Err(Rejection::NotMedia(url));
        }
        Ok(url)
    }

    /// Offer a raw string to the pipeline; emits a hit the first time a
    /// qualifying URL is seen in this session. Returns whether it emitted.
    pub fn push(&self, raw: &str) -> bool {
        self.push_against(raw, &self.inner.document_url)
    }

    fn push_against(&self, raw: &str, base: &Url) -> bool {
        let url = match self.accept_against(raw, base) {
            Ok(url) => url,
            Err(Rejection::NotMedia(_)) | Err(Rejection::Empty) => return false,
            Err(e) => {
                tracing::debug!("sniffer rejected candidate: {}", e);
                return false;
            }
        };
        let fresh = self
            .inner
            .seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(url.clone());
        if fresh {
            tracing::debug!(session = %self.session(), %url, "sniffed");
            self.inner.bridge.hit(&url);
        }
        fresh
    }

    /// Aggressive-mode passive scan: every new match is emitted individually.
    /// Returns how many hits were emitted.
    pub fn scan_document(&self, html: &str) -> usize {
        let scan = collect_candidates(html, self.inner.options.max_structured_depth);
        let base = scan.base(&self.inner.document_url);
        scan.raw
            .iter()
            .filter(|raw| self.push_against(raw, &base))
            .count()
    }

    /// On-demand full scan: one batch with every unique match from this pass.
    ///
    /// Uses its own dedup set, so URLs already hit in aggressive mode are
    /// still part of the batch.
    pub fn full_scan(&self, html: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let scan = collect_candidates(html, self.inner.options.max_structured_depth);
        let base = scan.base(&self.inner.document_url);
        let list: Vec<String> = scan
            .raw
            .iter()
            .filter_map(|raw| self.accept_against(raw, &base).ok())
            .filter(|url| seen.insert(url.clone()))
            .collect();
        tracing::info!(session = %self.session(), found = list.len(), "full scan complete");
        self.inner.bridge.batch(&list);
        list
    }
}
