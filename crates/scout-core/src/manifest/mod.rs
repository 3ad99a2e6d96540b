//! Shallow manifest harvesting.
//!
//! Neither parser validates manifest syntax; both pull nested media URIs out
//! of a body and tolerate arbitrarily malformed or truncated input.

mod hls;
mod scan;

pub use hls::extract_hls_uris;
pub use scan::{extract_uris_by_regex, sweep_document};

/// Streaming manifest formats recognised from a response content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    Hls,
    Dash,
}

impl ManifestKind {
    /// Classify a `Content-Type` header value.
    pub fn from_content_type(content_type: &str) -> Option<ManifestKind> {
        let ct = content_type.to_ascii_lowercase();
        if ct.contains("mpegurl") {
            Some(ManifestKind::Hls)
        } else if ct.contains("dash") || has_word(&ct, "mpd") {
            Some(ManifestKind::Dash)
        } else {
            None
        }
    }

    /// Extract nested URIs from a manifest body of this kind.
    pub fn extract(self, text: &str, base: &str) -> Vec<String> {
        match self {
            ManifestKind::Hls => extract_hls_uris(text, base),
            ManifestKind::Dash => extract_uris_by_regex(text),
        }
    }
}

/// `needle` occurring with no word character directly after it.
fn has_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(i, _)| {
        haystack[i + needle.len()..]
            .chars()
            .next()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '_'))
    })
}
