//! Intake rejection reasons.
//!
//! Every URL offered to the sniffer or the aggregator either passes intake or
//! is rejected with one of these. Rejections are never propagated past the
//! intake call; callers log them at debug level and move on.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Nothing to look at (missing attribute, blank string).
    #[error("empty url")]
    Empty,
    /// `blob:` and `data:` URIs cannot be fetched independently by a player.
    #[error("opaque {scheme}: url")]
    OpaqueScheme { scheme: &'static str },
    /// Still not an absolute URL after resolving against the document.
    #[error("not an absolute url: {0}")]
    Unparsable(String),
    /// Parsed fine but carries no media extension marker.
    #[error("not a media url: {0}")]
    NotMedia(String),
    /// Already a member of the candidate set.
    #[error("already seen: {0}")]
    Duplicate(String),
}
