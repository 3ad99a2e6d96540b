//! Candidate scoring and ordering.
//!
//! Scores are pure functions of (url, page host, blocklist); ordering is a
//! stable descending sort so ties keep first-appearance order.

use std::cmp::Reverse;
use std::collections::HashSet;

use crate::blocklist::Blocklist;
use crate::classify::{looks_like_ad, MediaExtension};
use crate::url_model::is_same_site;

/// Score for a URL with no recognised extension.
const UNKNOWN_EXTENSION_SCORE: i32 = 10;
const PLAYLIST_BONUS: i32 = 10;
const SEGMENT_PENALTY: i32 = 10;
const AD_PENALTY: i32 = 80;
const SAME_SITE_BONUS: i32 = 8;

const PLAYLIST_MARKERS: [&str; 4] = ["master.m3u8", "playlist.m3u8", "index.m3u8", "hls"];
const SEGMENT_MARKERS: [&str; 3] = ["segment", "chunk", "part"];

/// Integer score, higher is better.
pub fn score(url: &str, page_host: Option<&str>, blocklist: &Blocklist) -> i32 {
    let lower = url.to_ascii_lowercase();
    let mut s = MediaExtension::detect(&lower)
        .map(MediaExtension::base_score)
        .unwrap_or(UNKNOWN_EXTENSION_SCORE);

    if PLAYLIST_MARKERS.iter().any(|m| lower.contains(m)) {
        s += PLAYLIST_BONUS;
    }
    if SEGMENT_MARKERS.iter().any(|m| lower.contains(m)) {
        s -= SEGMENT_PENALTY;
    }
    if looks_like_ad(url, blocklist) {
        s -= AD_PENALTY;
    }
    if let Some(host) = page_host.filter(|h| !h.is_empty()) {
        if is_same_site(url, host) {
            s += SAME_SITE_BONUS;
        }
    }
    s
}

/// Distinct URLs paired with their scores, best first.
pub fn rank_scored<S: AsRef<str>>(
    urls: &[S],
    page_host: Option<&str>,
    blocklist: &Blocklist,
) -> Vec<(String, i32)> {
    let mut seen = HashSet::new();
    let mut scored: Vec<(String, i32)> = urls
        .iter()
        .map(|u| u.as_ref())
        .filter(|u| seen.insert(*u))
        .map(|u| (u.to_string(), score(u, page_host, blocklist)))
        .collect();
    scored.sort_by_key(|(_, s)| Reverse(*s));
    scored
}

/// Distinct URLs, best first.
pub fn rank<S: AsRef<str>>(urls: &[S], page_host: Option<&str>, blocklist: &Blocklist) -> Vec<String> {
    rank_scored(urls, page_host, blocklist)
        .into_iter()
        .map(|(u, _)| u)
        .collect()
}
