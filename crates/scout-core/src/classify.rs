//! URL heuristics: does this look like media, does this look like an ad.
//!
//! Both predicates are pure and lowercase their input. The media test is an
//! extension *substring* test because query strings and path segments often
//! trail the real extension (`video.mp4?token=...`).

use crate::blocklist::Blocklist;

/// Recognised media extensions, highest ranking priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaExtension {
    M3u8,
    Mpd,
    Mp4,
    Webm,
    M4v,
    Mov,
    M3u,
    Ogg,
}

impl MediaExtension {
    /// Priority order matters: `.m3u8` must be tested before `.m3u`.
    pub const ALL: [MediaExtension; 8] = [
        MediaExtension::M3u8,
        MediaExtension::Mpd,
        MediaExtension::Mp4,
        MediaExtension::Webm,
        MediaExtension::M4v,
        MediaExtension::Mov,
        MediaExtension::M3u,
        MediaExtension::Ogg,
    ];

    pub fn marker(self) -> &'static str {
        match self {
            MediaExtension::M3u8 => ".m3u8",
            MediaExtension::Mpd => ".mpd",
            MediaExtension::Mp4 => ".mp4",
            MediaExtension::Webm => ".webm",
            MediaExtension::M4v => ".m4v",
            MediaExtension::Mov => ".mov",
            MediaExtension::M3u => ".m3u",
            MediaExtension::Ogg => ".ogg",
        }
    }

    /// Base ranking score for this extension.
    pub fn base_score(self) -> i32 {
        match self {
            MediaExtension::M3u8 => 100,
            MediaExtension::Mpd => 90,
            MediaExtension::Mp4 => 80,
            MediaExtension::Webm => 75,
            MediaExtension::M4v => 70,
            MediaExtension::Mov => 65,
            MediaExtension::M3u => 60,
            MediaExtension::Ogg => 40,
        }
    }

    /// Highest-priority extension marker contained in `lower`.
    pub fn detect(lower: &str) -> Option<MediaExtension> {
        Self::ALL.into_iter().find(|ext| lower.contains(ext.marker()))
    }
}

/// Path/query keywords that signal ad, tracking or analytics traffic.
const AD_KEYWORDS: [&str; 11] = [
    "/ad",
    "/ads",
    "advert",
    "analytics",
    "pixel",
    "impression",
    "vast",
    "preroll",
    "promo",
    "banner",
    "doubleclick",
];

/// True iff the URL contains one of the media extension markers.
pub fn looks_like_media(url: &str) -> bool {
    MediaExtension::detect(&url.to_ascii_lowercase()).is_some()
}

/// True iff the host is blocklisted or the path/query carries an ad keyword.
///
/// URLs that fail to parse, or have no host, classify as not-ad.
pub fn looks_like_ad(url: &str, blocklist: &Blocklist) -> bool {
    let parsed = match url::Url::parse(url) {
        Ok(u) => u,
        Err(_) => return false,
    };
    let host = match parsed.host_str() {
        Some(h) => h.to_ascii_lowercase(),
        None => return false,
    };
    if blocklist.is_blocked(&host) {
        return true;
    }
    let path = parsed.path().to_ascii_lowercase();
    let query = parsed.query().unwrap_or("").to_ascii_lowercase();
    AD_KEYWORDS
        .iter()
        .any(|k| path.contains(k) || query.contains(k))
}
