//! Host-side candidate set for the current page.
//!
//! Insertion-ordered, duplicate-free, O(1) membership. Reset on every
//! top-level navigation start.

use std::collections::HashSet;

use url::Url;

use crate::classify::looks_like_media;
use crate::error::Rejection;
use crate::url_model::opaque_scheme;

#[derive(Debug, Default)]
pub struct Aggregator {
    order: Vec<String>,
    members: HashSet<String>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and insert. The stored form is the parsed absolute URL.
    pub fn try_add(&mut self, url: &str) -> Result<&str, Rejection> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Rejection::Empty);
        }
        if let Some(scheme) = opaque_scheme(url) {
            return Err(Rejection::OpaqueScheme { scheme });
        }
        let normalized = Url::parse(url)
            .map(String::from)
            .map_err(|_| Rejection::Unparsable(url.to_string()))?;
        if !looks_like_media(&normalized) {
            return Err(Rejection::NotMedia(normalized));
        }
        if !self.members.insert(normalized.clone()) {
            return Err(Rejection::Duplicate(normalized));
        }
        self.order.push(normalized);
        Ok(self.order.last().map(String::as_str).unwrap_or_default())
    }

    /// True if `url` was newly inserted; false if rejected or already present.
    pub fn add(&mut self, url: &str) -> bool {
        match self.try_add(url) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("candidate not added: {}", e);
                false
            }
        }
    }

    /// Members in insertion order.
    pub fn all(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn reset(&mut self) {
        self.order.clear();
        self.members.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent() {
        let mut agg = Aggregator::new();
        assert!(agg.add("https://x.com/a.m3u8"));
        assert!(!agg.add("https://x.com/a.m3u8"));
        assert_eq!(agg.all(), &["https://x.com/a.m3u8".to_string()]);
    }

    #[test]
    fn keeps_insertion_order() {
        let mut agg = Aggregator::new();
        agg.add("https://x.com/b.mp4");
        agg.add("https://x.com/a.m3u8");
        agg.add("https://x.com/c.webm");
        assert_eq!(
            agg.all(),
            &[
                "https://x.com/b.mp4".to_string(),
                "https://x.com/a.m3u8".to_string(),
                "https://x.com/c.webm".to_string(),
            ]
        );
    }

    #[test]
    fn rejections_are_typed() {
        let mut agg = Aggregator::new();
        assert_eq!(
            agg.try_add("blob:https://site.com/abc"),
            Err(Rejection::OpaqueScheme { scheme: "blob" })
        );
        assert_eq!(
            agg.try_add("data:video/mp4;base64,AAA"),
            Err(Rejection::OpaqueScheme { scheme: "data" })
        );
        assert!(matches!(agg.try_add("relative/a.mp4"), Err(Rejection::Unparsable(_))));
        assert!(matches!(agg.try_add("https://x.com/page.html"), Err(Rejection::NotMedia(_))));
        assert_eq!(agg.try_add(""), Err(Rejection::Empty));
        assert!(agg.is_empty());
    }

    #[test]
    fn dedup_on_normalized_form() {
        let mut agg = Aggregator::new();
        assert!(agg.add("HTTPS://X.com/a.mp4"));
        assert!(!agg.add("https://x.com/a.mp4"));
        assert_eq!(agg.all(), &["https://x.com/a.mp4".to_string()]);
    }

    #[test]
    fn reset_clears() {
        let mut agg = Aggregator::new();
        agg.add("https://x.com/a.mp4");
        agg.reset();
        assert!(agg.is_empty());
        assert!(agg.add("https://x.com/a.mp4"));
    }
}
