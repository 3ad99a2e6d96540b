//! One-way page → host notification channel.
//!
//! The host must not assume exactly-once delivery: the same URL may arrive
//! more than once and the aggregator dedups on its side.

use tokio::sync::mpsc::UnboundedSender;

/// Identifies one top-level page lifetime. Bumped on every navigation start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl SessionId {
    pub fn next(self) -> Self {
        SessionId(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// A single newly observed URL (aggressive mode).
    Hit(String),
    /// JSON array of every unique match from one on-demand full scan.
    Batch(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnifferMessage {
    pub session: SessionId,
    pub payload: Payload,
}

/// Sending half of the channel, stamped with the session it belongs to.
#[derive(Debug, Clone)]
pub struct Bridge {
    session: SessionId,
    tx: UnboundedSender<SnifferMessage>,
}

impl Bridge {
    pub fn new(session: SessionId, tx: UnboundedSender<SnifferMessage>) -> Self {
        Self { session, tx }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn hit(&self, url: &str) {
        self.send(Payload::Hit(url.to_string()));
    }

    pub fn batch(&self, urls: &[String]) {
        let json = serde_json::to_string(urls).unwrap_or_else(|_| "[]".to_string());
        self.send(Payload::Batch(json));
    }

    fn send(&self, payload: Payload) {
        let msg = SnifferMessage {
            session: self.session,
            payload,
        };
        if self.tx.send(msg).is_err() {
            // Host side is gone; the page outlived it.
            tracing::debug!(session = %self.session, "bridge closed, dropping notification");
        }
    }
}
