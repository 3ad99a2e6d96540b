//! Regex sweeps for bare media URLs in arbitrary text.

use regex::Regex;
use std::sync::LazyLock;

/// `http(s)://` + path characters ending in a media extension.
static MEDIA_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)https?://[\w\-./?=&%#:+]+\.(?:m3u8|m3u|mpd|mp4|webm|m4v|mov|ogg)").unwrap()
});

/// Same shape, but the extension must not run on into further word characters.
static DOCUMENT_SWEEP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)https?://[\w\-./?=&%#:+]+\.(?:m3u8|m3u|mpd|mp4|webm|m4v|mov|ogg)\b").unwrap()
});

/// Every media-looking URL in `text`, in text order, duplicates kept.
///
/// Used for DASH and other bodies whose structure is not modeled.
pub fn extract_uris_by_regex(text: &str) -> Vec<String> {
    MEDIA_URL_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Raw sweep of a whole document (inline scripts included).
pub fn sweep_document(html: &str) -> Vec<String> {
    DOCUMENT_SWEEP_REGEX
        .find_iter(html)
        .map(|m| m.as_str().to_string())
        .collect()
}
