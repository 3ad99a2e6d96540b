//! Hand-off of a selected candidate to the playback engine.

use std::collections::HashMap;

/// What the player needs to fetch a candidate the way the page would.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackRequest {
    pub url: String,
    /// Headers the player must send (Referer of the page, browser User-Agent).
    pub headers: HashMap<String, String>,
}

impl PlaybackRequest {
    pub fn new(url: &str, referer: Option<&str>, user_agent: &str) -> Self {
        let mut headers = HashMap::new();
        if let Some(referer) = referer.filter(|r| !r.is_empty()) {
            headers.insert("Referer".to_string(), referer.to_string());
        }
        if !user_agent.is_empty() {
            headers.insert("User-Agent".to_string(), user_agent.to_string());
        }
        Self {
            url: url.to_string(),
            headers,
        }
    }
}
